//! # refmatch-index
//!
//! The expertise index: materializes a deduplicated referee-profile corpus
//! from extraction snapshots, embeds it, and answers manuscript queries
//! with similarity-ranked referee candidates.

mod dedup;
mod derive;
mod engine;

pub use dedup::dedup_profiles;
pub use derive::derive_profile;
pub use engine::ExpertiseIndex;
