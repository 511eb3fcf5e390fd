//! # refmatch-conflicts
//!
//! Pure, side-effect-free conflict-of-interest detection. An empty result
//! means "no known conflict was detected" over the available enrichment
//! data, not "provably no conflict".

mod checker;
pub mod matchers;

pub use checker::{check_conflicts, ConflictContext, Matchers};
