pub mod client;
pub mod error;
pub mod types;

pub use client::{ReplicateClient, SynthesisBackend};
pub use error::SynthesisError;
pub use types::{ImageParams, JobHandle, JobStatus, Prediction, PredictionRequest};
