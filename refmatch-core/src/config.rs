//! Engine configuration.
//!
//! All sections default sensibly so a `MatchConfig::default()` is usable
//! in tests without a config file. A TOML file can override any subset
//! of fields thanks to `#[serde(default)]` on every struct.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::{RefMatchError, RefMatchResult};

/// Top-level configuration for the matching engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Root directory holding one subdirectory per journal code.
    pub snapshot_root: PathBuf,
    /// Directory where trained artifacts and feedback logs are written.
    pub models_dir: PathBuf,
    pub embedding: EmbeddingSettings,
    pub ranking: RankWeights,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            snapshot_root: PathBuf::from("data/snapshots"),
            models_dir: PathBuf::from("data/models"),
            embedding: EmbeddingSettings::default(),
            ranking: RankWeights::default(),
        }
    }
}

impl MatchConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> RefMatchResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RefMatchError::Config {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        toml::from_str(&content).map_err(|e| RefMatchError::Config {
            reason: format!("cannot parse {}: {e}", path.display()),
        })
    }
}

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Output dimensionality of every provider (lexical vectors are
    /// zero-padded up to this).
    pub dimensions: usize,
    /// Max entry count of the in-memory embedding cache.
    pub l1_cache_size: u64,
    /// Path to a domain-specialized scientific-text ONNX encoder.
    /// Tried first when the `onnx` feature is compiled in.
    pub scientific_model_path: Option<PathBuf>,
    /// Path to a general-purpose sentence ONNX encoder. Tried second.
    pub general_model_path: Option<PathBuf>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            dimensions: constants::DEFAULT_EMBEDDING_DIMENSIONS,
            l1_cache_size: constants::DEFAULT_L1_CACHE_SIZE,
            scientific_model_path: None,
            general_model_path: None,
        }
    }
}

/// Weights for the final candidate ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankWeights {
    pub semantic: f64,
    pub response: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            semantic: 0.7,
            response: 0.3,
        }
    }
}
