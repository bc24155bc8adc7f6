use thiserror::Error;

/// Errors from the inference gateway.
///
/// Artifact errors occur once, at load time, and leave the interactive
/// surface unusable; inference errors are per-request and do not stop the
/// gateway from serving subsequent requests. Neither kind warrants a retry.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("model artifact not found: {0}")]
    ArtifactNotFound(std::path::PathBuf),

    #[error("failed to load model artifact: {0}")]
    ArtifactLoad(String),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("empty document submitted for inference")]
    EmptyDocument,

    #[error("missing '{0}' column in request batch")]
    MissingColumn(&'static str),

    #[error("invalid label map: {0}")]
    LabelMap(#[from] newscheck_core::LabelMapError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
