/// Snapshot-corpus errors.
///
/// `RootMissing` is the single fatal configuration class; a parse failure
/// is normally handled as skip-with-warn at the call site and only carried
/// here when a caller asks for one specific file.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot root not found or unreadable: {path}")]
    RootMissing { path: String },

    #[error("failed to parse snapshot {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("I/O error reading {path}: {reason}")]
    Io { path: String, reason: String },
}
