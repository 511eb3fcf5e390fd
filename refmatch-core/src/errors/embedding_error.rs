/// Embedding subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("failed to load model {path}: {reason}")]
    ModelLoadFailed { path: String, reason: String },

    #[error("encoding failed: {reason}")]
    EncodeFailed { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("no embedding provider available: {provider}")]
    ProviderUnavailable { provider: String },
}
