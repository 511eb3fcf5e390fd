//! Snapshot discovery and typed loading.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use regex::Regex;
use tracing::{debug, warn};

use refmatch_core::errors::{RefMatchResult, SnapshotError};
use refmatch_core::models::Snapshot;

/// Read-side access to the snapshot directory tree.
///
/// A missing root is the one fatal configuration error in this subsystem;
/// individual files that fail to parse are skipped with a warning so one
/// bad extraction never sinks a whole build.
pub struct SnapshotStore {
    root: PathBuf,
    extraction_pattern: Regex,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            // The extractor's naming convention: <journal>_extraction_<stamp>.json
            extraction_pattern: Regex::new(r"_extraction_.*\.json$")
                .unwrap_or_else(|e| unreachable!("invalid extraction pattern: {e}")),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List all journal subdirectories under the root, sorted by code.
    ///
    /// # Errors
    /// `SnapshotError::RootMissing` when the root does not exist or is
    /// unreadable — there is nothing left to build from.
    pub fn discover_journals(&self) -> RefMatchResult<Vec<String>> {
        let entries = std::fs::read_dir(&self.root).map_err(|_| SnapshotError::RootMissing {
            path: self.root.display().to_string(),
        })?;

        let mut journals: Vec<String> = entries
            .filter_map(|entry| {
                let entry = entry.ok()?;
                if !entry.file_type().ok()?.is_dir() {
                    return None;
                }
                entry.file_name().to_str().map(str::to_string)
            })
            .collect();
        journals.sort();
        Ok(journals)
    }

    /// Path of the most-recently-modified extraction snapshot for one
    /// journal, or `None` when the journal has no matching file.
    pub fn latest_snapshot_path(&self, journal: &str) -> Option<PathBuf> {
        let dir = self.root.join(journal);
        let entries = std::fs::read_dir(&dir).ok()?;

        entries
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let path = entry.path();
                let file_name = path.file_name()?.to_str()?;
                if !self.extraction_pattern.is_match(file_name) {
                    return None;
                }
                let mtime = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                Some((mtime, path))
            })
            // Path as tie-breaker keeps selection deterministic when a
            // filesystem's mtime granularity is coarse.
            .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
            .map(|(_, path)| path)
    }

    /// Parse one snapshot file into typed records.
    pub fn load_snapshot(&self, path: &Path) -> RefMatchResult<Snapshot> {
        let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let snapshot = serde_json::from_str(&content).map_err(|e| SnapshotError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(snapshot)
    }

    /// Load the latest snapshot for each requested journal.
    ///
    /// `None` means "all journals under the root". Journals without a
    /// snapshot and files that fail to parse are skipped with a warning;
    /// only a missing root is fatal.
    pub fn load_journals(
        &self,
        journals: Option<&[String]>,
    ) -> RefMatchResult<Vec<(String, Snapshot)>> {
        let journals: Vec<String> = match journals {
            Some(list) => list.to_vec(),
            None => self.discover_journals()?,
        };

        let mut loaded = Vec::with_capacity(journals.len());
        for journal in journals {
            let Some(path) = self.latest_snapshot_path(&journal) else {
                debug!(journal = %journal, "no extraction snapshot found, skipping");
                continue;
            };
            match self.load_snapshot(&path) {
                Ok(snapshot) => {
                    debug!(
                        journal = %journal,
                        path = %path.display(),
                        manuscripts = snapshot.manuscripts.len(),
                        "snapshot loaded"
                    );
                    loaded.push((journal, snapshot));
                }
                Err(e) => {
                    warn!(
                        journal = %journal,
                        path = %path.display(),
                        error = %e,
                        "snapshot failed to parse, skipping journal"
                    );
                }
            }
        }
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    const MINIMAL: &str = r#"{"manuscripts": [{"id": "M-1"}]}"#;

    #[test]
    fn missing_root_is_fatal() {
        let store = SnapshotStore::new("/nonexistent/snapshots");
        assert!(store.discover_journals().is_err());
        assert!(store.load_journals(None).is_err());
    }

    #[test]
    fn discovers_journal_directories_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("MOR")).unwrap();
        fs::create_dir(dir.path().join("AOP")).unwrap();
        // Loose files at the root are not journals.
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let store = SnapshotStore::new(dir.path());
        assert_eq!(store.discover_journals().unwrap(), vec!["AOP", "MOR"]);
    }

    #[test]
    fn selects_most_recent_extraction_file() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("MOR/mor_extraction_2023.json");
        let new = dir.path().join("MOR/mor_extraction_2024.json");
        write(&old, MINIMAL);
        write(&new, MINIMAL);
        // Push the newer file's mtime clearly ahead.
        let later = SystemTime::now() + std::time::Duration::from_secs(60);
        let file = fs::File::options().write(true).open(&new).unwrap();
        file.set_modified(later).unwrap();

        let store = SnapshotStore::new(dir.path());
        assert_eq!(store.latest_snapshot_path("MOR").unwrap(), new);
    }

    #[test]
    fn ignores_non_extraction_files() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("MOR/report_2024.json"), MINIMAL);

        let store = SnapshotStore::new(dir.path());
        assert!(store.latest_snapshot_path("MOR").is_none());
    }

    #[test]
    fn unparseable_snapshot_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("MOR/mor_extraction_1.json"), "{not json");
        write(&dir.path().join("AOP/aop_extraction_1.json"), MINIMAL);

        let store = SnapshotStore::new(dir.path());
        let loaded = store.load_journals(None).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].0, "AOP");
    }
}
