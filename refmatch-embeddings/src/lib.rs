//! # refmatch-embeddings
//!
//! Turns free text into fixed-length unit vectors and runs nearest-neighbor
//! search over them. Providers degrade through a fallback chain: ONNX
//! encoders (behind the `onnx` feature) down to a locally-fit lexical
//! vectorizer that is always available, so embedding never hard-fails for
//! lack of an ML runtime.

mod cache;
mod degradation;
mod engine;
mod index;
pub mod providers;

pub use cache::L1MemoryCache;
pub use degradation::DegradationChain;
pub use engine::EmbeddingEngine;
pub use index::DenseIndex;
