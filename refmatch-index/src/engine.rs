//! ExpertiseIndex — build, search, and persist the referee corpus.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use refmatch_core::config::MatchConfig;
use refmatch_core::constants::{INDEX_FILE, METADATA_FILE};
use refmatch_core::errors::{IndexError, RefMatchResult};
use refmatch_core::models::{ManuscriptQuery, ReferenceProfile, ScoredReferee};
use refmatch_corpus::SnapshotStore;
use refmatch_embeddings::{DenseIndex, EmbeddingEngine};

use crate::dedup::dedup_profiles;
use crate::derive::derive_profile;

/// The searchable referee-expertise corpus.
///
/// Rebuilt wholesale by each `build` call; the embedded vectors live only
/// inside the `DenseIndex`, positionally aligned with `profiles`.
pub struct ExpertiseIndex<'a> {
    engine: &'a EmbeddingEngine,
    store: SnapshotStore,
    models_dir: PathBuf,
    profiles: Vec<ReferenceProfile>,
    index: Option<DenseIndex>,
}

impl<'a> ExpertiseIndex<'a> {
    pub fn new(engine: &'a EmbeddingEngine, config: &MatchConfig) -> Self {
        Self {
            engine,
            store: SnapshotStore::new(&config.snapshot_root),
            models_dir: config.models_dir.clone(),
            profiles: Vec::new(),
            index: None,
        }
    }

    /// Number of profiles currently indexed.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Build the corpus from the latest snapshot of each journal.
    ///
    /// `None` means every journal under the snapshot root. Profiles with
    /// empty derived text are dropped; duplicates collapse per the dedup
    /// policy. Returns the number of indexed profiles — 0 when no usable
    /// text was found anywhere. Only a missing snapshot root errors.
    pub fn build(&mut self, journals: Option<&[String]>) -> RefMatchResult<usize> {
        let loaded = self.store.load_journals(journals)?;

        let mut raw: Vec<ReferenceProfile> = Vec::new();
        for (journal, snapshot) in &loaded {
            for manuscript in &snapshot.manuscripts {
                for referee in &manuscript.referees {
                    let profile = derive_profile(journal, manuscript, referee);
                    if profile.text.is_empty() {
                        debug!(
                            referee = %profile.name,
                            manuscript = %manuscript.id,
                            "profile has no usable text, dropping"
                        );
                        continue;
                    }
                    raw.push(profile);
                }
            }
        }

        let profiles = dedup_profiles(raw);
        let texts: Vec<String> = profiles.iter().map(|p| p.text.clone()).collect();

        self.index = self.engine.build_index(&texts)?;
        self.profiles = profiles;

        info!(
            journals = loaded.len(),
            profiles = self.profiles.len(),
            "expertise index built"
        );
        Ok(self.profiles.len())
    }

    /// Top-`k` referee candidates for a manuscript, by descending
    /// semantic similarity. Empty when no index has been built or loaded.
    pub fn search(&self, query: &ManuscriptQuery, k: usize) -> Vec<ScoredReferee> {
        let hits = match self
            .engine
            .search_index(&query.search_text(), self.index.as_ref(), k)
        {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "expertise search failed, returning no candidates");
                return Vec::new();
            }
        };

        hits.into_iter()
            .filter_map(|(pos, score)| {
                let profile = self.profiles.get(pos)?.clone();
                Some(ScoredReferee {
                    profile,
                    semantic_similarity: score,
                })
            })
            .collect()
    }

    /// Persist the index binary and its profile sidecar.
    ///
    /// `dir` defaults to the configured models directory. Overwrites are
    /// whole-file and non-atomic; callers should back up a known-good
    /// artifact pair first. A no-op when nothing has been built.
    pub fn save(&self, dir: Option<&Path>) -> RefMatchResult<()> {
        let Some(index) = &self.index else {
            warn!("nothing built yet, skipping save");
            return Ok(());
        };

        let dir = dir.unwrap_or(&self.models_dir);
        std::fs::create_dir_all(dir).map_err(|e| IndexError::Io {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        index.save(&dir.join(INDEX_FILE))?;

        let metadata_path = dir.join(METADATA_FILE);
        let json =
            serde_json::to_string_pretty(&self.profiles).map_err(|e| IndexError::Io {
                path: metadata_path.display().to_string(),
                reason: e.to_string(),
            })?;
        std::fs::write(&metadata_path, json).map_err(|e| IndexError::Io {
            path: metadata_path.display().to_string(),
            reason: e.to_string(),
        })?;

        info!(dir = %dir.display(), profiles = self.profiles.len(), "index saved");
        Ok(())
    }

    /// Restore a persisted index pair.
    ///
    /// Returns `Ok(true)` only when both files are present and consistent;
    /// `Ok(false)` (state untouched) when either file is missing. Corrupt
    /// artifacts surface as errors.
    pub fn load(&mut self, dir: Option<&Path>) -> RefMatchResult<bool> {
        let dir = dir.unwrap_or(&self.models_dir);
        let index_path = dir.join(INDEX_FILE);
        let metadata_path = dir.join(METADATA_FILE);

        if !index_path.exists() || !metadata_path.exists() {
            debug!(dir = %dir.display(), "index artifacts absent, nothing loaded");
            return Ok(false);
        }

        let index = DenseIndex::load(&index_path)?;

        let content =
            std::fs::read_to_string(&metadata_path).map_err(|e| IndexError::Io {
                path: metadata_path.display().to_string(),
                reason: e.to_string(),
            })?;
        let profiles: Vec<ReferenceProfile> =
            serde_json::from_str(&content).map_err(|e| IndexError::CorruptArtifact {
                path: metadata_path.display().to_string(),
                reason: e.to_string(),
            })?;

        if index.len() != profiles.len() {
            return Err(IndexError::MetadataMismatch {
                index_rows: index.len(),
                profiles: profiles.len(),
            }
            .into());
        }

        self.index = Some(index);
        self.profiles = profiles;
        info!(dir = %dir.display(), profiles = self.profiles.len(), "index loaded");
        Ok(true)
    }
}
