/// Expertise-index persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("corrupt index artifact {path}: {reason}")]
    CorruptArtifact { path: String, reason: String },

    #[error("metadata mismatch: index has {index_rows} rows, metadata has {profiles} profiles")]
    MetadataMismatch { index_rows: usize, profiles: usize },
}
