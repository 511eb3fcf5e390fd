//! Append-only feedback log: real-world editorial decisions recorded for
//! future retraining.
//!
//! One JSONL file per journal in the models directory, one record per
//! physical line, never rewritten. OS-level append keeps each line intact,
//! but nothing orders writes across processes — the expected deployment is
//! a single writer process.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use tracing::{debug, warn};

use refmatch_core::constants::FEEDBACK_SUFFIX;
use refmatch_core::errors::{RefMatchResult, TrainingError};
use refmatch_core::models::{FeedbackRecord, FeedbackStats};

/// The durable, growing dataset of recorded decisions.
pub struct FeedbackLog {
    models_dir: PathBuf,
}

impl FeedbackLog {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }

    /// Append one decision to the journal's log, creating the file (and
    /// the models directory) on first use.
    pub fn record_outcome(
        &self,
        journal: &str,
        manuscript_id: &str,
        decision: &str,
    ) -> RefMatchResult<()> {
        let record = FeedbackRecord {
            journal: journal.to_string(),
            manuscript_id: manuscript_id.to_string(),
            decision: decision.to_string(),
            timestamp: Utc::now(),
        };

        let path = self.journal_log_path(journal);
        let io_err = |reason: String| TrainingError::Io {
            path: path.display().to_string(),
            reason,
        };

        std::fs::create_dir_all(&self.models_dir).map_err(|e| io_err(e.to_string()))?;

        let line = serde_json::to_string(&record).map_err(|e| TrainingError::Serialization {
            reason: e.to_string(),
        })?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| io_err(e.to_string()))?;
        writeln!(file, "{line}").map_err(|e| io_err(e.to_string()))?;

        debug!(journal, manuscript_id, decision, "outcome recorded");
        Ok(())
    }

    /// Aggregate every journal's log.
    ///
    /// Lines that fail to parse are skipped silently — a torn or
    /// hand-edited line must not sink the whole scan.
    pub fn stats(&self) -> RefMatchResult<HashMap<String, FeedbackStats>> {
        let mut stats: HashMap<String, FeedbackStats> = HashMap::new();

        let entries = match std::fs::read_dir(&self.models_dir) {
            Ok(entries) => entries,
            // No models directory yet means no feedback yet.
            Err(_) => return Ok(stats),
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(journal) = file_name.strip_suffix(FEEDBACK_SUFFIX) else {
                continue;
            };

            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "feedback log unreadable, skipping");
                    continue;
                }
            };

            let journal_stats = stats.entry(journal.to_string()).or_default();
            for line in content.lines() {
                let Ok(record) = serde_json::from_str::<FeedbackRecord>(line) else {
                    continue;
                };
                journal_stats.total += 1;
                *journal_stats.decisions.entry(record.decision).or_default() += 1;
            }
        }

        Ok(stats)
    }

    fn journal_log_path(&self, journal: &str) -> PathBuf {
        self.models_dir.join(format!("{journal}{FEEDBACK_SUFFIX}"))
    }
}
