//! Wire types for the prediction-based synthesis service.
//!
//! All structs derive `Serialize`/`Deserialize` matching the JSON the
//! `/predictions` endpoints exchange.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Model version hash submitted with every prediction request.
pub const MODEL_VERSION: &str = "ac732df83cea7fff18b8472768c88ad041fa750ff7682a21affe81863cbe77e4";

/// Image synthesis parameters for one prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageParams {
    pub width: u32,
    pub height: u32,
    /// The service accepts more than one output, but only the first is
    /// ever consumed downstream.
    pub num_outputs: u32,
    pub guidance_scale: f64,
    pub num_inference_steps: u32,
}

impl Default for ImageParams {
    fn default() -> Self {
        Self {
            width: 512,
            height: 768,
            num_outputs: 1,
            guidance_scale: 7.5,
            num_inference_steps: 50,
        }
    }
}

/// Request body for `POST /predictions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Model version hash.
    pub version: String,
    pub input: PredictionInput,
}

/// The `input` object inside a prediction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionInput {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub num_outputs: u32,
    pub guidance_scale: f64,
    pub num_inference_steps: u32,
}

impl PredictionRequest {
    pub fn new(prompt: &str, params: &ImageParams) -> Self {
        Self {
            version: MODEL_VERSION.to_string(),
            input: PredictionInput {
                prompt: prompt.to_string(),
                width: params.width,
                height: params.height,
                num_outputs: params.num_outputs,
                guidance_scale: params.guidance_scale,
                num_inference_steps: params.num_inference_steps,
            },
        }
    }
}

/// Opaque handle to a submitted prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle(pub String);

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a remote prediction. `starting` and `processing`
/// on the wire both read as [`JobStatus::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[serde(alias = "starting", alias = "processing")]
    Pending,
    Succeeded,
    #[serde(alias = "canceled")]
    Failed,
}

impl JobStatus {
    /// Terminal statuses never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Succeeded => write!(f, "succeeded"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Snapshot of a remote prediction as reported by the service. Mutated
/// only by poll responses; once `status` is terminal it never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: JobStatus,
    /// Image references; present once the prediction succeeded.
    #[serde(default)]
    pub output: Option<Vec<String>>,
    /// Human-readable failure reason; present once the prediction failed.
    #[serde(default)]
    pub error: Option<String>,
}

impl Prediction {
    /// First output image, the only one the pipeline consumes.
    pub fn first_output(&self) -> Option<&str> {
        self.output
            .as_deref()
            .and_then(|refs| refs.first())
            .map(String::as_str)
    }
}
