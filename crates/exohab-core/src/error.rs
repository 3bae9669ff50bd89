//! Error types for the store and the prediction providers.

use thiserror::Error;

/// Failures reading or writing persisted slots.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// A slot exists but does not hold what it should.
    #[error("Slot '{slot}' is corrupt: {reason}")]
    Corrupt { slot: String, reason: String },
}

/// Failures producing a prediction.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Parameter '{field}' is not a finite number")]
    NonFiniteInput { field: &'static str },
    /// The remote prediction service could not answer.
    #[error("Prediction failed: {reason}")]
    Unavailable { reason: String },
    #[error("Remote prediction requested but this build has no 'remote' feature")]
    RemoteDisabled,
}

/// Failures fetching catalog data from a remote service.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Fetch failed: {reason}")]
    Unavailable { reason: String },
    #[error("Remote catalog requested but this build has no 'remote' feature")]
    RemoteDisabled,
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
