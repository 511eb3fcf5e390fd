//! Error taxonomy for the matching engine.
//!
//! One enum per subsystem, aggregated into `RefMatchError` with `#[from]`
//! conversions. Capability absence and corpus-quality problems degrade at
//! their call sites and never surface here; these types cover the failures
//! that genuinely stop an operation.

mod embedding_error;
mod index_error;
mod snapshot_error;
mod training_error;

pub use embedding_error::EmbeddingError;
pub use index_error::IndexError;
pub use snapshot_error::SnapshotError;
pub use training_error::TrainingError;

/// Top-level error for all RefMatch operations.
#[derive(Debug, thiserror::Error)]
pub enum RefMatchError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Training(#[from] TrainingError),

    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Convenience alias used throughout the workspace.
pub type RefMatchResult<T> = Result<T, RefMatchError>;
