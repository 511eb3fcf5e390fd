//! Record types for the matching engine.
//!
//! Snapshot records are validated once at the ingestion boundary
//! (`refmatch-corpus`); everything downstream works with these typed
//! structs, never raw JSON.

mod conflict;
mod degradation_event;
mod feedback;
mod manuscript;
mod profile;
mod query;
mod report;

pub use conflict::ConflictInput;
pub use degradation_event::DegradationEvent;
pub use feedback::{FeedbackRecord, FeedbackStats};
pub use manuscript::{Author, Manuscript, OpposedReferee, Referee, Snapshot, WebProfile};
pub use profile::ReferenceProfile;
pub use query::ManuscriptQuery;
pub use report::{Recommendation, ScoredReferee, TrainReport, TrainStatus, TrainingSummary};
