//! Three-stage training orchestrator: expertise index, response
//! predictor, outcome predictor.

use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use refmatch_core::config::MatchConfig;
use refmatch_core::constants::TRAINING_RESULTS_FILE;
use refmatch_core::errors::{RefMatchResult, TrainingError};
use refmatch_core::models::{FeedbackStats, TrainStatus, TrainingSummary};
use refmatch_embeddings::EmbeddingEngine;
use refmatch_index::ExpertiseIndex;
use refmatch_predict::{OutcomePredictor, ResponsePredictor};

use crate::feedback::FeedbackLog;

/// Owns the trainable components and runs them in order. Each stage is
/// independent; a low-data predictor stage reports its status and the
/// run carries on.
pub struct ModelTrainer<'a> {
    engine: &'a EmbeddingEngine,
    config: MatchConfig,
    index: ExpertiseIndex<'a>,
    response: ResponsePredictor,
    outcome: OutcomePredictor,
    feedback: FeedbackLog,
}

impl<'a> ModelTrainer<'a> {
    pub fn new(engine: &'a EmbeddingEngine, config: MatchConfig) -> Self {
        let index = ExpertiseIndex::new(engine, &config);
        let response = ResponsePredictor::new(&config);
        let outcome = OutcomePredictor::new(&config);
        let feedback = FeedbackLog::new(&config.models_dir);
        Self {
            engine,
            config,
            index,
            response,
            outcome,
            feedback,
        }
    }

    pub fn index(&self) -> &ExpertiseIndex<'a> {
        &self.index
    }

    pub fn response_predictor(&self) -> &ResponsePredictor {
        &self.response
    }

    pub fn outcome_predictor(&self) -> &OutcomePredictor {
        &self.outcome
    }

    /// Run the full pipeline over the latest snapshots: rebuild and save
    /// the index, then train each predictor, saving only those that
    /// actually fit a model. The summary is also persisted as
    /// `training_results.json` next to the model artifacts.
    pub fn train_all(&mut self, journals: Option<&[String]>) -> RefMatchResult<TrainingSummary> {
        let started = Instant::now();
        let referees_indexed = self.index.build(journals)?;
        self.index.save(None)?;
        let index_secs = started.elapsed().as_secs_f64();
        info!(referees_indexed, seconds = index_secs, "stage 1: index built");

        let started = Instant::now();
        let response = self.response.train(journals)?;
        if response.status == TrainStatus::Trained {
            self.response.save()?;
        }
        let response_secs = started.elapsed().as_secs_f64();
        info!(
            status = ?response.status,
            n_samples = response.n_samples,
            seconds = response_secs,
            "stage 2: response predictor"
        );

        let started = Instant::now();
        let outcome = self.outcome.train(journals)?;
        if outcome.status == TrainStatus::Trained {
            self.outcome.save()?;
        }
        let outcome_secs = started.elapsed().as_secs_f64();
        info!(
            status = ?outcome.status,
            n_samples = outcome.n_samples,
            seconds = outcome_secs,
            "stage 3: outcome predictor"
        );

        for event in self.engine.drain_degradation_events() {
            warn!(
                component = %event.component,
                failure = %event.failure,
                fallback = %event.fallback_used,
                "embedding provider degraded during training"
            );
        }

        let summary = TrainingSummary {
            referees_indexed,
            response,
            outcome,
            stage_seconds: [index_secs, response_secs, outcome_secs],
            trained_at: Utc::now(),
        };
        self.write_summary(&summary)?;
        Ok(summary)
    }

    /// Restore every persisted artifact that exists; absent artifacts are
    /// skipped silently. Returns whether the index itself was loaded.
    pub fn load_artifacts(&mut self) -> RefMatchResult<bool> {
        let loaded = self.index.load(None)?;
        self.response.load()?;
        self.outcome.load()?;
        Ok(loaded)
    }

    /// Record one real-world editorial decision for future retraining.
    pub fn record_outcome(
        &self,
        journal: &str,
        manuscript_id: &str,
        decision: &str,
    ) -> RefMatchResult<()> {
        self.feedback.record_outcome(journal, manuscript_id, decision)
    }

    /// Per-journal aggregation of recorded decisions.
    pub fn feedback_stats(
        &self,
    ) -> RefMatchResult<std::collections::HashMap<String, FeedbackStats>> {
        self.feedback.stats()
    }

    fn write_summary(&self, summary: &TrainingSummary) -> RefMatchResult<()> {
        let path = self.config.models_dir.join(TRAINING_RESULTS_FILE);
        let json =
            serde_json::to_string_pretty(summary).map_err(|e| TrainingError::Serialization {
                reason: e.to_string(),
            })?;
        std::fs::write(&path, json).map_err(|e| TrainingError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}
