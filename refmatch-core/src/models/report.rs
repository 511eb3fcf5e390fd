//! Status reports produced by training and query operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::ReferenceProfile;

/// Outcome of one predictor training run. Low data is a status, not an
/// error — `train()` never fails for lack of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainStatus {
    Trained,
    InsufficientData,
    Empty,
}

/// Report from one predictor's `train()` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    pub status: TrainStatus,
    pub n_samples: usize,
    /// Mean k-fold cross-validated accuracy; present only when trained.
    pub cv_accuracy: Option<f64>,
    /// Distinct label classes seen in the training data.
    pub classes: Vec<String>,
}

impl TrainReport {
    pub fn empty() -> Self {
        Self {
            status: TrainStatus::Empty,
            n_samples: 0,
            cv_accuracy: None,
            classes: Vec::new(),
        }
    }

    pub fn insufficient(n_samples: usize, classes: Vec<String>) -> Self {
        Self {
            status: TrainStatus::InsufficientData,
            n_samples,
            cv_accuracy: None,
            classes,
        }
    }
}

/// Aggregated report from `ModelTrainer::train_all`, persisted as
/// `training_results.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub referees_indexed: usize,
    pub response: TrainReport,
    pub outcome: TrainReport,
    /// Wall-clock seconds per stage: [index, response, outcome].
    pub stage_seconds: [f64; 3],
    pub trained_at: DateTime<Utc>,
}

/// A search hit: one profile copy with its similarity to the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredReferee {
    #[serde(flatten)]
    pub profile: ReferenceProfile,
    pub semantic_similarity: f32,
}

/// A fully ranked, conflict-free pipeline candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub profile: ReferenceProfile,
    pub semantic_similarity: f32,
    /// Predicted likelihood of agreeing to review (0.5 = no predictor).
    pub response_score: f64,
    /// Weighted combination of the above; ranking key.
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_status_serializes_snake_case() {
        let json = serde_json::to_string(&TrainStatus::InsufficientData).unwrap();
        assert_eq!(json, "\"insufficient_data\"");
    }

    #[test]
    fn scored_referee_flattens_profile() {
        let scored = ScoredReferee {
            profile: ReferenceProfile {
                name: "Jane Doe".to_string(),
                email: "jane@uni.edu".to_string(),
                institution: String::new(),
                department: String::new(),
                country: String::new(),
                topics: vec![],
                h_index: 12,
                top_papers: vec![],
                journal: "MOR".to_string(),
                text: "stochastic control".to_string(),
            },
            semantic_similarity: 0.5,
        };
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["name"], "Jane Doe");
        assert_eq!(value["semantic_similarity"], 0.5);
    }
}
