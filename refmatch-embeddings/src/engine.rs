//! EmbeddingEngine — the main entry point for refmatch-embeddings.
//!
//! Coordinates provider selection, the fallback chain, and the L1 cache,
//! and builds/searches dense indexes over embedded text sets.

use refmatch_core::config::EmbeddingSettings;
use refmatch_core::constants::EMPTY_TEXT_PLACEHOLDER;
use refmatch_core::errors::{EmbeddingError, RefMatchResult};
use refmatch_core::models::DegradationEvent;
use refmatch_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::{content_hash, L1MemoryCache};
use crate::index::DenseIndex;
use crate::providers;
use crate::DegradationChain;

/// The main embedding engine.
///
/// Constructed once by the orchestrator and passed by reference into the
/// expertise index and the pipeline — all methods take `&self`.
pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: L1MemoryCache,
    settings: EmbeddingSettings,
}

impl EmbeddingEngine {
    /// Create a new engine from settings.
    ///
    /// Capability probing happens here, once: ONNX models that fail to
    /// load are left out of the chain and never retried per call.
    pub fn new(settings: EmbeddingSettings) -> Self {
        let chain = providers::build_chain(&settings);
        let cache = L1MemoryCache::new(settings.l1_cache_size);

        info!(
            provider = chain.active_provider_name(),
            dims = settings.dimensions,
            "EmbeddingEngine initialized"
        );

        Self {
            chain,
            cache,
            settings,
        }
    }

    /// Embed a single text into a unit vector.
    ///
    /// Empty or whitespace-only input yields the zero vector of the
    /// configured dimension. Results are cached by blake3 content hash.
    pub fn embed(&self, text: &str) -> RefMatchResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Ok(vec![0.0; self.settings.dimensions]);
        }

        let hash = content_hash(text);
        if let Some(cached) = self.cache.get(&hash) {
            debug!(hash = %hash, "cache hit");
            return Ok(cached);
        }

        let (embedding, _provider) = self.chain.embed(text)?;
        self.validate_dims(&embedding)?;
        self.cache.insert(hash, embedding.clone());
        Ok(embedding)
    }

    /// Embed a batch of texts.
    ///
    /// Empty/whitespace entries are replaced with a placeholder token
    /// before encoding so the batch never degenerates.
    pub fn embed_batch(&self, texts: &[String]) -> RefMatchResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let prepared: Vec<String> = texts
            .iter()
            .map(|t| {
                if t.trim().is_empty() {
                    EMPTY_TEXT_PLACEHOLDER.to_string()
                } else {
                    t.clone()
                }
            })
            .collect();

        let (embeddings, _provider) = self.chain.embed_batch(&prepared)?;
        for embedding in &embeddings {
            self.validate_dims(embedding)?;
        }
        Ok(embeddings)
    }

    /// Cosine similarity of two pre-normalized vectors: their dot product.
    pub fn similarity(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    /// Embed all texts and build an exact inner-product index.
    ///
    /// Returns `None` for an empty text list (and, by contract, when no
    /// index capability exists — the pure-Rust index is always available
    /// here, but callers must handle `None` regardless).
    pub fn build_index(&self, texts: &[String]) -> RefMatchResult<Option<DenseIndex>> {
        if texts.is_empty() {
            return Ok(None);
        }
        let embeddings = self.embed_batch(texts)?;
        let index = DenseIndex::from_rows(&embeddings)?;
        Ok(Some(index))
    }

    /// Search an index (if any) for the top-`k` texts nearest the query.
    pub fn search_index(
        &self,
        query: &str,
        index: Option<&DenseIndex>,
        k: usize,
    ) -> RefMatchResult<Vec<(usize, f32)>> {
        let Some(index) = index else {
            return Ok(Vec::new());
        };
        let query_vec = self.embed(query)?;
        Ok(index.search(&query_vec, k))
    }

    /// Drain accumulated degradation events.
    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.chain.drain_events()
    }

    /// Name of the provider currently serving requests.
    pub fn active_provider(&self) -> &str {
        self.chain.active_provider_name()
    }

    pub fn dimensions(&self) -> usize {
        self.settings.dimensions
    }

    fn validate_dims(&self, embedding: &[f32]) -> RefMatchResult<()> {
        if embedding.len() != self.settings.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.settings.dimensions,
                actual: embedding.len(),
            }
            .into());
        }
        Ok(())
    }
}

/// The engine itself satisfies the provider contract, so it can stand in
/// anywhere a single provider is expected.
impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> RefMatchResult<Vec<f32>> {
        EmbeddingEngine::embed(self, text)
    }

    fn embed_batch(&self, texts: &[String]) -> RefMatchResult<Vec<Vec<f32>>> {
        EmbeddingEngine::embed_batch(self, texts)
    }

    fn dimensions(&self) -> usize {
        self.settings.dimensions
    }

    fn name(&self) -> &str {
        "refmatch-embedding-engine"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(dims: usize) -> EmbeddingEngine {
        EmbeddingEngine::new(EmbeddingSettings {
            dimensions: dims,
            ..Default::default()
        })
    }

    #[test]
    fn empty_text_embeds_to_zero_vector() {
        let e = engine(64);
        let v = e.embed("   ").unwrap();
        assert_eq!(v.len(), 64);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn embed_is_cached_and_deterministic() {
        let e = engine(64);
        let a = e.embed("stochastic control").unwrap();
        let b = e.embed("stochastic control").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn batch_substitutes_placeholder_for_empty() {
        let e = engine(64);
        let batch = e
            .embed_batch(&["stochastic control".to_string(), "  ".to_string()])
            .unwrap();
        assert_eq!(batch.len(), 2);
        // The placeholder embeds like any text under the same frozen
        // vocabulary; it must not blow up the batch.
        assert_eq!(batch[1].len(), 64);
    }

    #[test]
    fn similarity_is_symmetric_and_bounded() {
        let e = engine(128);
        let texts = vec![
            "stochastic control theory".to_string(),
            "finance and markets".to_string(),
        ];
        let vecs = e.embed_batch(&texts).unwrap();
        let ab = EmbeddingEngine::similarity(&vecs[0], &vecs[1]);
        let ba = EmbeddingEngine::similarity(&vecs[1], &vecs[0]);
        assert!((ab - ba).abs() < 1e-6);
        assert!((-1.0001..=1.0001).contains(&ab));
    }

    #[test]
    fn build_index_on_empty_list_is_none() {
        let e = engine(32);
        assert!(e.build_index(&[]).unwrap().is_none());
    }

    #[test]
    fn search_without_index_is_empty() {
        let e = engine(32);
        assert!(e.search_index("query", None, 5).unwrap().is_empty());
    }

    #[test]
    fn index_search_returns_descending_scores() {
        let e = engine(128);
        let texts = vec![
            "stochastic control and optimization".to_string(),
            "stochastic control in finance".to_string(),
            "cooking recipes pasta".to_string(),
        ];
        let index = e.build_index(&texts).unwrap().unwrap();
        let hits = e
            .search_index("stochastic control", Some(&index), 3)
            .unwrap();
        assert!(!hits.is_empty());
        for pair in hits.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        // The cooking distractor should not win.
        assert_ne!(hits[0].0, 2);
    }
}
