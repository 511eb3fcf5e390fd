/// Predictor training errors.
///
/// Too few samples is NOT an error (it is a structured `TrainStatus`);
/// these variants cover a fit that genuinely failed on adequate data,
/// and artifact I/O.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("classifier fit failed: {reason}")]
    FitFailed { reason: String },

    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("model serialization failed: {reason}")]
    Serialization { reason: String },
}
