use thiserror::Error;

use crate::compositing::CompositingError;
use crate::synthesis::SynthesisError;

/// Top-level error for the matchshot pipeline. Stage errors keep their own
/// taxonomy and are wrapped unmodified in kind.
#[derive(Debug, Error)]
pub enum MatchshotError {
    #[error("config error: {0}")]
    Config(String),

    /// A generation run was requested while one is already in flight.
    #[error("a generation is already in flight")]
    Busy,

    #[error("synthesis: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("compositing: {0}")]
    Compositing(#[from] CompositingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_errors_keep_their_kind() {
        let err = MatchshotError::from(SynthesisError::Failed {
            reason: "nsfw content".into(),
        });
        assert!(matches!(
            err,
            MatchshotError::Synthesis(SynthesisError::Failed { .. })
        ));
        assert_eq!(err.to_string(), "synthesis: synthesis failed: nsfw content");
    }

    #[test]
    fn busy_display() {
        assert_eq!(
            MatchshotError::Busy.to_string(),
            "a generation is already in flight"
        );
    }
}
