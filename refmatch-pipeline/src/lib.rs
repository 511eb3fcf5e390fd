//! # refmatch-pipeline
//!
//! The orchestration layer external callers talk to: `ModelTrainer` runs
//! the full build/train/persist loop and owns the append-only feedback
//! log; `RecommendPipeline` turns one manuscript into a ranked,
//! conflict-free candidate list.

mod feedback;
mod recommend;
pub mod telemetry;
mod trainer;

pub use feedback::FeedbackLog;
pub use recommend::RecommendPipeline;
pub use trainer::ModelTrainer;
