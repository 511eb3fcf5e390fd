/// RefMatch system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default embedding vector dimensionality.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

/// Default max entry count for the L1 embedding cache.
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;

/// Default number of candidates returned by an expertise search.
pub const DEFAULT_SEARCH_K: usize = 30;

/// Maximum top-paper titles folded into one referee profile.
pub const MAX_TOP_PAPERS_PER_PROFILE: usize = 5;

/// Minimum labeled samples required to fit a predictor.
pub const MIN_TRAINING_SAMPLES: usize = 10;

/// Upper bound on cross-validation folds.
pub const MAX_CV_FOLDS: usize = 5;

/// Over-fetch factor applied before conflict filtering in the pipeline.
pub const CANDIDATE_OVERSAMPLE: usize = 3;

/// Placeholder substituted for empty strings in batch embedding.
pub const EMPTY_TEXT_PLACEHOLDER: &str = "[empty]";

/// Persisted artifact file names (under the models directory).
pub const INDEX_FILE: &str = "referee_index.bin";
pub const METADATA_FILE: &str = "referee_metadata.json";
pub const TRAINING_RESULTS_FILE: &str = "training_results.json";
pub const RESPONSE_MODEL_FILE: &str = "response_model.json";
pub const OUTCOME_MODEL_FILE: &str = "outcome_model.json";

/// Suffix of per-journal append-only feedback logs.
pub const FEEDBACK_SUFFIX: &str = "_outcomes.jsonl";
