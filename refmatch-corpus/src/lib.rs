//! # refmatch-corpus
//!
//! Read access to the extraction-snapshot corpus: one subdirectory per
//! journal code under the snapshot root, each holding `*_extraction_*.json`
//! files written by the (out-of-scope) scraping subsystem. This crate is
//! the single validation boundary — everything downstream receives typed
//! records.

mod store;

pub use store::SnapshotStore;
