use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded editorial decision, appended to the per-journal log.
/// One physical JSONL line per record; never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub journal: String,
    pub manuscript_id: String,
    pub decision: String,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate view over one journal's feedback log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub total: usize,
    pub decisions: HashMap<String, usize>,
}
