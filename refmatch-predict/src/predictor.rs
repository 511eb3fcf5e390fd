//! The two corpus-trained predictors.
//!
//! Both scan the same snapshot corpus as the expertise index, differ only
//! in label extraction, and degrade to a structured status when labeled
//! data is scarce.

use std::path::PathBuf;

use ndarray::Array2;
use tracing::info;

use refmatch_core::config::MatchConfig;
use refmatch_core::constants::{
    MAX_CV_FOLDS, MIN_TRAINING_SAMPLES, OUTCOME_MODEL_FILE, RESPONSE_MODEL_FILE,
};
use refmatch_core::errors::{RefMatchResult, TrainingError};
use refmatch_core::models::{Manuscript, Referee, TrainReport, TrainStatus};
use refmatch_corpus::SnapshotStore;

use crate::classifier::{cross_validate, Classifier};
use crate::features::{candidate_features, FEATURE_DIM};
use crate::labels;

/// Referee response predictor: will this referee agree to review?
/// Labels come from historically recorded statuses
/// (accepted / declined / agreed).
pub struct ResponsePredictor {
    inner: CorpusPredictor,
}

impl ResponsePredictor {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            inner: CorpusPredictor::new(config, RESPONSE_MODEL_FILE, extract_response),
        }
    }

    /// Train on the latest snapshots; never raises on low data.
    pub fn train(&mut self, journals: Option<&[String]>) -> RefMatchResult<TrainReport> {
        self.inner.train("response", journals)
    }

    /// Persist the model; returns whether anything was saved (only a
    /// trained model is).
    pub fn save(&self) -> RefMatchResult<bool> {
        self.inner.save()
    }

    /// Restore a previously saved model.
    pub fn load(&mut self) -> RefMatchResult<bool> {
        self.inner.load()
    }

    pub fn predict(&self, features: &[f64]) -> Option<String> {
        self.inner.predict(features)
    }

    /// Score a candidate's likelihood of agreeing to review.
    /// Neutral 0.5 when no model is loaded or the label is unknown.
    pub fn response_score(&self, features: &[f64]) -> f64 {
        match self.predict(features).as_deref() {
            Some("accepted") | Some("agreed") => 1.0,
            Some("declined") => 0.0,
            _ => 0.5,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.inner.model.is_some()
    }
}

/// Manuscript outcome predictor: labels are final editorial decisions
/// normalized to accept / reject / revise.
pub struct OutcomePredictor {
    inner: CorpusPredictor,
}

impl OutcomePredictor {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            inner: CorpusPredictor::new(config, OUTCOME_MODEL_FILE, extract_outcome),
        }
    }

    pub fn train(&mut self, journals: Option<&[String]>) -> RefMatchResult<TrainReport> {
        self.inner.train("outcome", journals)
    }

    pub fn save(&self) -> RefMatchResult<bool> {
        self.inner.save()
    }

    pub fn load(&mut self) -> RefMatchResult<bool> {
        self.inner.load()
    }

    pub fn predict(&self, features: &[f64]) -> Option<String> {
        self.inner.predict(features)
    }

    pub fn is_trained(&self) -> bool {
        self.inner.model.is_some()
    }
}

/// One labeled sample extractor: (manuscript, referee) → label.
type LabelFn = fn(&Manuscript, &Referee) -> Option<&'static str>;

fn extract_response(_manuscript: &Manuscript, referee: &Referee) -> Option<&'static str> {
    labels::response_label(&referee.status)
}

fn extract_outcome(manuscript: &Manuscript, _referee: &Referee) -> Option<&'static str> {
    manuscript
        .decision
        .as_deref()
        .and_then(labels::outcome_label)
}

/// Shared predictor mechanics behind the two public types.
struct CorpusPredictor {
    store: SnapshotStore,
    model_path: PathBuf,
    label_fn: LabelFn,
    model: Option<Classifier>,
}

impl CorpusPredictor {
    fn new(config: &MatchConfig, model_file: &str, label_fn: LabelFn) -> Self {
        Self {
            store: SnapshotStore::new(&config.snapshot_root),
            model_path: config.models_dir.join(model_file),
            label_fn,
            model: None,
        }
    }

    fn train(&mut self, kind: &str, journals: Option<&[String]>) -> RefMatchResult<TrainReport> {
        let loaded = self.store.load_journals(journals)?;

        let mut rows: Vec<f64> = Vec::new();
        let mut sample_labels: Vec<String> = Vec::new();
        for (_journal, snapshot) in &loaded {
            for manuscript in &snapshot.manuscripts {
                for referee in &manuscript.referees {
                    let Some(label) = (self.label_fn)(manuscript, referee) else {
                        continue;
                    };
                    rows.extend(candidate_features(manuscript, referee));
                    sample_labels.push(label.to_string());
                }
            }
        }

        let n_samples = sample_labels.len();
        if n_samples == 0 {
            info!(kind, "no labeled samples in corpus");
            self.model = None;
            return Ok(TrainReport::empty());
        }

        let mut classes: Vec<String> = sample_labels.clone();
        classes.sort();
        classes.dedup();

        if n_samples < MIN_TRAINING_SAMPLES || classes.len() < 2 {
            info!(kind, n_samples, classes = classes.len(), "insufficient data");
            self.model = None;
            return Ok(TrainReport::insufficient(n_samples, classes));
        }

        let records = Array2::from_shape_vec((n_samples, FEATURE_DIM), rows)
            .unwrap_or_else(|e| unreachable!("feature rows are rectangular: {e}"));

        let folds = MAX_CV_FOLDS.min(n_samples / 2);
        let cv_accuracy = cross_validate(&records, &sample_labels, folds);

        let classifier = Classifier::fit(&records, &sample_labels)?;
        self.model = Some(classifier);

        info!(kind, n_samples, ?cv_accuracy, "predictor trained");
        Ok(TrainReport {
            status: TrainStatus::Trained,
            n_samples,
            cv_accuracy,
            classes,
        })
    }

    fn save(&self) -> RefMatchResult<bool> {
        let Some(model) = &self.model else {
            return Ok(false);
        };
        if let Some(parent) = self.model_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TrainingError::Io {
                path: parent.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        model.save(&self.model_path)?;
        Ok(true)
    }

    fn load(&mut self) -> RefMatchResult<bool> {
        if !self.model_path.exists() {
            return Ok(false);
        }
        self.model = Some(Classifier::load(&self.model_path)?);
        Ok(true)
    }

    fn predict(&self, features: &[f64]) -> Option<String> {
        self.model.as_ref().and_then(|m| m.predict_one(features))
    }
}

impl CorpusPredictor {
    #[cfg(test)]
    fn model_path(&self) -> &std::path::Path {
        &self.model_path
    }
}
