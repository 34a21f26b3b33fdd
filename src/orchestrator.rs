//! Sequences one generation run: prompt → synthesis job → poll to terminal
//! state → face swap. All-or-nothing: any stage failure aborts the run and
//! surfaces as a classified error; no partial result is ever produced.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::sleep;

use crate::compositing::CompositingBackend;
use crate::error::MatchshotError;
use crate::prompt::{DatingApp, PromptSpec, StyleSelection};
use crate::synthesis::{ImageParams, JobStatus, SynthesisBackend, SynthesisError};

/// Everything one run needs. The face blob is owned here until it is handed
/// to the compositing call; nothing retains it afterwards.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub source_face: Vec<u8>,
    pub prompt_spec: PromptSpec,
}

impl GenerationRequest {
    pub fn styled(source_face: Vec<u8>, selection: StyleSelection) -> Self {
        Self {
            source_face,
            prompt_spec: PromptSpec::Styled(selection),
        }
    }

    pub fn fixed(source_face: Vec<u8>, app: DatingApp) -> Self {
        Self {
            source_face,
            prompt_spec: PromptSpec::Fixed(app),
        }
    }
}

/// The two image references a successful run produces. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    /// The synthesized image before the face swap.
    pub original_image: String,
    /// The composited profile photo.
    pub final_image: String,
}

/// Diagnostic record for a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRecord {
    pub prompt: String,
    pub job_id: String,
    pub poll_count: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub result: GenerationResult,
}

/// Drives the two-stage pipeline over a synthesis backend and a compositing
/// backend. Generic over both seams so live clients, the mock provider and
/// test stubs all plug in unchanged.
pub struct GenerationOrchestrator<S, C> {
    synthesis: S,
    compositing: C,
    params: ImageParams,
    poll_interval: Duration,
    max_poll_attempts: u32,
    // Single-flight guard, independent of any presentation state.
    in_flight: AtomicBool,
}

/// Clears the in-flight flag on drop, cancellation included.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: SynthesisBackend, C: CompositingBackend> GenerationOrchestrator<S, C> {
    pub fn new(
        synthesis: S,
        compositing: C,
        poll_interval: Duration,
        max_poll_attempts: u32,
    ) -> Self {
        Self {
            synthesis,
            compositing,
            params: ImageParams::default(),
            poll_interval,
            max_poll_attempts,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// Rejects with [`MatchshotError::Busy`] if a run is already in flight.
    /// Stateless otherwise: a caller-level retry re-runs from the top.
    pub async fn run(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationRecord, MatchshotError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(MatchshotError::Busy);
        }
        // Releases the flag even if the run future is dropped mid-flight.
        let _guard = FlightGuard(&self.in_flight);
        self.run_pipeline(request).await
    }

    async fn run_pipeline(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationRecord, MatchshotError> {
        let started_at = Utc::now();
        let prompt = request.prompt_spec.resolve();

        let handle = self.synthesis.submit(&prompt, &self.params).await?;

        let mut poll_count: u32 = 0;
        let prediction = loop {
            let prediction = self.synthesis.poll(&handle).await?;
            poll_count += 1;
            if prediction.status.is_terminal() {
                break prediction;
            }
            if poll_count >= self.max_poll_attempts {
                return Err(SynthesisError::Timeout {
                    attempts: poll_count,
                }
                .into());
            }
            sleep(self.poll_interval).await;
        };

        if prediction.status == JobStatus::Failed {
            let reason = prediction
                .error
                .unwrap_or_else(|| "no reason reported".to_string());
            return Err(SynthesisError::Failed { reason }.into());
        }

        // Only the first output is ever used, even when more are returned.
        let original_image = prediction
            .first_output()
            .ok_or_else(|| SynthesisError::Failed {
                reason: "prediction succeeded with no output".to_string(),
            })?
            .to_string();

        let final_image = self
            .compositing
            .swap(request.source_face, &original_image)
            .await?;

        let completed_at = Utc::now();
        Ok(GenerationRecord {
            prompt,
            job_id: handle.0,
            poll_count,
            started_at,
            completed_at,
            duration_ms: (completed_at - started_at).num_milliseconds(),
            result: GenerationResult {
                original_image,
                final_image,
            },
        })
    }
}
