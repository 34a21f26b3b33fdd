//! Deterministic stand-in for both remote services.
//!
//! Used when no live credentials are configured. Keeps the latency shape of
//! the real services (synthesis resolves after a fixed delay observed via
//! polling, compositing after a shorter in-call delay) but never performs
//! network I/O. Interface-identical to the live clients, so the
//! orchestrator cannot tell which is active.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::compositing::{CompositingBackend, CompositingError};
use crate::synthesis::{
    ImageParams, JobHandle, JobStatus, Prediction, SynthesisBackend, SynthesisError,
};

/// Canned portrait references a mock synthesis job resolves to.
const SYNTHESIS_IMAGES: [&str; 4] = [
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=512&h=768&fit=crop&crop=face",
    "https://images.unsplash.com/photo-1494790108755-2616c95eb3c7?w=512&h=768&fit=crop&crop=face",
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=512&h=768&fit=crop&crop=face",
    "https://images.unsplash.com/photo-1517365830460-955ce3ccd263?w=512&h=768&fit=crop&crop=face",
];

/// Canned references a mock swap resolves to.
const SWAPPED_IMAGES: [&str; 4] = [
    "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=512&h=768&fit=crop&crop=face",
    "https://images.unsplash.com/photo-1519085360753-af0119f7cbe7?w=512&h=768&fit=crop&crop=face",
    "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?w=512&h=768&fit=crop&crop=face",
    "https://images.unsplash.com/photo-1618077360395-f3068be8e001?w=512&h=768&fit=crop&crop=face",
];

struct MockJob {
    submitted_at: Instant,
    output: &'static str,
}

/// In-process provider implementing both backend seams.
pub struct MockProvider {
    synthesis_delay: Duration,
    swap_delay: Duration,
    jobs: Mutex<HashMap<String, MockJob>>,
}

impl MockProvider {
    /// Provider with the production mock latencies: 2 s until a synthesis
    /// job reads as succeeded, 1.5 s per swap call.
    pub fn new() -> Self {
        Self::with_delays(Duration::from_millis(2000), Duration::from_millis(1500))
    }

    pub fn with_delays(synthesis_delay: Duration, swap_delay: Duration) -> Self {
        Self {
            synthesis_delay,
            swap_delay,
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Uniform pick without carrying a rand dependency.
    fn pick(set: &[&'static str; 4]) -> &'static str {
        let index = Uuid::new_v4().as_bytes()[0] as usize % set.len();
        set[index]
    }

    pub fn canned_synthesis_images() -> &'static [&'static str] {
        &SYNTHESIS_IMAGES
    }

    pub fn canned_swapped_images() -> &'static [&'static str] {
        &SWAPPED_IMAGES
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SynthesisBackend for MockProvider {
    async fn submit(
        &self,
        _prompt: &str,
        _params: &ImageParams,
    ) -> Result<JobHandle, SynthesisError> {
        let id = format!("mock-{}", Uuid::new_v4());
        let job = MockJob {
            submitted_at: Instant::now(),
            output: Self::pick(&SYNTHESIS_IMAGES),
        };
        self.jobs
            .lock()
            .expect("mock job table poisoned")
            .insert(id.clone(), job);
        Ok(JobHandle(id))
    }

    async fn poll(&self, handle: &JobHandle) -> Result<Prediction, SynthesisError> {
        let jobs = self.jobs.lock().expect("mock job table poisoned");
        let job = jobs.get(&handle.0).ok_or_else(|| SynthesisError::Api {
            status: 404,
            message: format!("unknown prediction {handle}"),
        })?;

        if job.submitted_at.elapsed() < self.synthesis_delay {
            return Ok(Prediction {
                id: handle.0.clone(),
                status: JobStatus::Pending,
                output: None,
                error: None,
            });
        }

        Ok(Prediction {
            id: handle.0.clone(),
            status: JobStatus::Succeeded,
            output: Some(vec![job.output.to_string()]),
            error: None,
        })
    }
}

impl CompositingBackend for MockProvider {
    async fn swap(
        &self,
        _source_face: Vec<u8>,
        _target_url: &str,
    ) -> Result<String, CompositingError> {
        tokio::time::sleep(self.swap_delay).await;
        Ok(Self::pick(&SWAPPED_IMAGES).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn synthesis_resolves_to_canned_image_after_delay() {
        let mock = MockProvider::with_delays(Duration::ZERO, Duration::ZERO);
        let handle = mock
            .submit("anything", &ImageParams::default())
            .await
            .unwrap();

        let prediction = mock.poll(&handle).await.unwrap();
        assert_eq!(prediction.status, JobStatus::Succeeded);
        let output = prediction.first_output().unwrap();
        assert!(SYNTHESIS_IMAGES.contains(&output));
    }

    #[tokio::test]
    async fn synthesis_reads_pending_before_delay_elapses() {
        let mock = MockProvider::with_delays(Duration::from_secs(3600), Duration::ZERO);
        let handle = mock.submit("p", &ImageParams::default()).await.unwrap();

        let prediction = mock.poll(&handle).await.unwrap();
        assert_eq!(prediction.status, JobStatus::Pending);
        assert!(prediction.output.is_none());
    }

    #[tokio::test]
    async fn poll_unknown_handle_errors() {
        let mock = MockProvider::with_delays(Duration::ZERO, Duration::ZERO);
        let err = mock
            .poll(&JobHandle("never-submitted".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn swap_resolves_to_canned_image() {
        let mock = MockProvider::with_delays(Duration::ZERO, Duration::ZERO);
        let url = mock.swap(vec![1, 2, 3], "https://any.target").await.unwrap();
        assert!(SWAPPED_IMAGES.contains(&url.as_str()));
    }

    #[tokio::test]
    async fn handles_are_unique_per_submission() {
        let mock = MockProvider::with_delays(Duration::ZERO, Duration::ZERO);
        let a = mock.submit("p", &ImageParams::default()).await.unwrap();
        let b = mock.submit("p", &ImageParams::default()).await.unwrap();
        assert_ne!(a, b);
    }
}
