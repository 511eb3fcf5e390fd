//! Exact inner-product index over unit vectors.
//!
//! A flat row-major f32 matrix scanned brute-force per query. Rows are
//! unit-normalized by the engine, so inner product equals cosine
//! similarity. Persisted as: header (rows: u32 LE, dims: u32 LE) +
//! body (rows * dims * f32 LE).

use std::path::Path;

use refmatch_core::errors::{EmbeddingError, IndexError, RefMatchResult};

/// Dense exact nearest-neighbor index.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseIndex {
    dims: usize,
    /// Row-major storage; vectors never leave this structure.
    data: Vec<f32>,
}

impl DenseIndex {
    /// Build an index from row vectors, all of the same dimension.
    pub fn from_rows(rows: &[Vec<f32>]) -> RefMatchResult<Self> {
        let dims = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * dims);
        for row in rows {
            if row.len() != dims {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: dims,
                    actual: row.len(),
                }
                .into());
            }
            data.extend_from_slice(row);
        }
        Ok(Self { dims, data })
    }

    /// Number of indexed rows.
    pub fn len(&self) -> usize {
        if self.dims == 0 {
            0
        } else {
            self.data.len() / self.dims
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Top-`k` rows by inner product with `query`, descending.
    ///
    /// A zero-norm or dimension-mismatched query scores nothing and
    /// returns empty.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        if query.len() != self.dims || k == 0 {
            return Vec::new();
        }
        let query_norm_sq: f32 = query.iter().map(|x| x * x).sum();
        if query_norm_sq == 0.0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = self
            .data
            .chunks_exact(self.dims)
            .enumerate()
            .map(|(pos, row)| {
                let score: f32 = row.iter().zip(query).map(|(a, b)| a * b).sum();
                (pos, score)
            })
            .filter(|(_, score)| score.is_finite())
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }

    /// Write the index to `path`, overwriting any existing file.
    ///
    /// NOT atomic: a save that fails partway leaves the artifact corrupt
    /// for the next load. Back up a known-good file before overwriting.
    pub fn save(&self, path: &Path) -> RefMatchResult<()> {
        let rows = self.len();
        let mut bytes = Vec::with_capacity(8 + self.data.len() * 4);
        bytes.extend_from_slice(&(rows as u32).to_le_bytes());
        bytes.extend_from_slice(&(self.dims as u32).to_le_bytes());
        for value in &self.data {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        std::fs::write(path, bytes).map_err(|e| {
            IndexError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Read an index back from `path`.
    pub fn load(path: &Path) -> RefMatchResult<Self> {
        let data = std::fs::read(path).map_err(|e| IndexError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let corrupt = |reason: String| IndexError::CorruptArtifact {
            path: path.display().to_string(),
            reason,
        };

        if data.len() < 8 {
            return Err(corrupt(format!("file too small for header: {} bytes", data.len())).into());
        }

        let rows = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
        let dims = u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize;

        // Header values come straight from the file; treat arithmetic
        // overflow as corruption, not a panic.
        let expected = rows
            .checked_mul(dims)
            .and_then(|cells| cells.checked_mul(4))
            .and_then(|body| body.checked_add(8))
            .ok_or_else(|| corrupt(format!("implausible header: {rows}x{dims}")))?;
        if data.len() != expected {
            return Err(corrupt(format!(
                "size mismatch: expected {expected} bytes for {rows}x{dims}, got {}",
                data.len()
            ))
            .into());
        }

        let values = data[8..]
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(Self { dims, data: values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(v: &[f32]) -> Vec<f32> {
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        v.iter().map(|x| x / norm).collect()
    }

    fn sample_index() -> DenseIndex {
        DenseIndex::from_rows(&[
            unit(&[1.0, 0.0, 0.0]),
            unit(&[0.0, 1.0, 0.0]),
            unit(&[1.0, 1.0, 0.0]),
        ])
        .unwrap()
    }

    #[test]
    fn search_ranks_by_inner_product() {
        let index = sample_index();
        let hits = index.search(&unit(&[1.0, 0.0, 0.0]), 3);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].0, 0);
        assert!((hits[0].1 - 1.0).abs() < 1e-6);
        assert!(hits[0].1 >= hits[1].1 && hits[1].1 >= hits[2].1);
    }

    #[test]
    fn search_respects_k() {
        let index = sample_index();
        assert_eq!(index.search(&unit(&[1.0, 1.0, 1.0]), 2).len(), 2);
        assert!(index.search(&unit(&[1.0, 1.0, 1.0]), 0).is_empty());
    }

    #[test]
    fn zero_query_returns_empty() {
        let index = sample_index();
        assert!(index.search(&[0.0, 0.0, 0.0], 3).is_empty());
    }

    #[test]
    fn mismatched_query_returns_empty() {
        let index = sample_index();
        assert!(index.search(&[1.0, 0.0], 3).is_empty());
    }

    #[test]
    fn ragged_rows_rejected() {
        let result = DenseIndex::from_rows(&[vec![1.0, 0.0], vec![1.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn binary_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.bin");
        let index = sample_index();
        index.save(&path).unwrap();

        let loaded = DenseIndex::load(&path).unwrap();
        assert_eq!(loaded, index);
    }

    #[test]
    fn truncated_file_is_corrupt_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.bin");
        let index = sample_index();
        index.save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

        let err = DenseIndex::load(&path);
        assert!(matches!(
            err,
            Err(refmatch_core::RefMatchError::Index(
                IndexError::CorruptArtifact { .. }
            ))
        ));
    }

    #[test]
    fn implausible_header_is_corrupt_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.bin");

        // A header-only file claiming u32::MAX rows and dims would
        // overflow the expected-size computation.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        std::fs::write(&path, bytes).unwrap();

        let err = DenseIndex::load(&path);
        assert!(matches!(
            err,
            Err(refmatch_core::RefMatchError::Index(
                IndexError::CorruptArtifact { .. }
            ))
        ));
    }

    #[test]
    fn empty_index_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bin");
        let index = DenseIndex::from_rows(&[]).unwrap();
        index.save(&path).unwrap();
        let loaded = DenseIndex::load(&path).unwrap();
        assert!(loaded.is_empty());
    }
}
