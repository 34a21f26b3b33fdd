use thiserror::Error;

/// Failures raised by the synthesis client and its poll loop.
///
/// `Transport` and `Api` are potentially transient; `Failed` means the
/// remote service itself rejected the job and retrying the same inputs
/// will not help.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The prediction could not be created (non-2xx on submit).
    #[error("prediction submit rejected (status {status}): {message}")]
    Submission { status: u16, message: String },

    /// Non-2xx response while polling an already-submitted prediction.
    #[error("prediction poll returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// Network-layer failure (DNS, connect, timeout, body decode).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service reported the prediction as failed.
    #[error("synthesis failed: {reason}")]
    Failed { reason: String },

    /// The prediction never reached a terminal state within the poll budget.
    #[error("prediction still pending after {attempts} polls")]
    Timeout { attempts: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_display() {
        let err = SynthesisError::Submission {
            status: 401,
            message: "invalid token".into(),
        };
        assert_eq!(
            err.to_string(),
            "prediction submit rejected (status 401): invalid token"
        );
    }

    #[test]
    fn failed_display() {
        let err = SynthesisError::Failed {
            reason: "nsfw content".into(),
        };
        assert_eq!(err.to_string(), "synthesis failed: nsfw content");
    }

    #[test]
    fn timeout_display() {
        let err = SynthesisError::Timeout { attempts: 90 };
        assert_eq!(err.to_string(), "prediction still pending after 90 polls");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SynthesisError>();
    }
}
