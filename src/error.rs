//! Error taxonomy for the synthesis pipeline.

/// Errors produced anywhere along the load/condition/infer path.
///
/// Every variant is recovered at the submission boundary: the worker reports
/// the failure to the caller and stays available for the next submission.
#[derive(thiserror::Error, Debug)]
pub enum SynthesisError {
    #[error("model asset missing: {0}")]
    AssetMissing(String),
    #[error("failed to stage model asset '{name}': {source}")]
    CopyFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("native model initialization failed")]
    InitializationFailed,
    #[error("reference audio processing failed")]
    ReferenceProcessingFailed,
    #[error("native inference failed")]
    InferenceFailed,
    #[error("WAV encoding error: {0}")]
    Encode(#[from] hound::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("pipeline worker is no longer running")]
    WorkerUnavailable,
}
