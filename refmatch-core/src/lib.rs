//! # refmatch-core
//!
//! Foundation crate for the RefMatch referee-recommendation engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{EmbeddingSettings, MatchConfig, RankWeights};
pub use errors::{RefMatchError, RefMatchResult};
pub use models::{
    Author, ConflictInput, FeedbackRecord, FeedbackStats, Manuscript, ManuscriptQuery,
    OpposedReferee, Recommendation, Referee, ReferenceProfile, ScoredReferee, Snapshot,
    TrainReport, TrainStatus, TrainingSummary, WebProfile,
};
pub use traits::IEmbeddingProvider;
