//! Fallback chain for embedding generation.
//!
//! Chain: scientific encoder → general encoder → lexical vectorizer.
//! Every fallback past the first provider is recorded as a degradation
//! event, drainable by the orchestrator.

use std::sync::Mutex;

use chrono::Utc;
use refmatch_core::errors::{EmbeddingError, RefMatchResult};
use refmatch_core::models::DegradationEvent;
use refmatch_core::traits::IEmbeddingProvider;
use tracing::warn;

/// Manages the degradation fallback chain for embedding providers.
///
/// Tries providers in order. On failure, records a degradation event and
/// moves to the next provider. Event storage sits behind a mutex so the
/// chain can be shared by reference across the engine's callers.
pub struct DegradationChain {
    chain: Vec<Box<dyn IEmbeddingProvider>>,
    events: Mutex<Vec<DegradationEvent>>,
}

impl Default for DegradationChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationChain {
    pub fn new() -> Self {
        Self {
            chain: Vec::new(),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.chain.push(provider);
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// Try to embed text using the fallback chain.
    ///
    /// Returns the embedding from the first successful provider together
    /// with that provider's name.
    pub fn embed(&self, text: &str) -> RefMatchResult<(Vec<f32>, &str)> {
        let mut last_error = None;

        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match provider.embed(text) {
                Ok(vec) => {
                    if i > 0 {
                        self.record_fallback(provider.name());
                    }
                    return Ok((vec, provider.name()));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "provider failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: "all providers exhausted".to_string(),
            }
            .into()
        }))
    }

    /// Try to embed a batch using the fallback chain.
    pub fn embed_batch(&self, texts: &[String]) -> RefMatchResult<(Vec<Vec<f32>>, &str)> {
        let mut last_error = None;

        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match provider.embed_batch(texts) {
                Ok(vecs) => {
                    if i > 0 {
                        self.record_fallback(provider.name());
                    }
                    return Ok((vecs, provider.name()));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "batch embed failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: "all providers exhausted".to_string(),
            }
            .into()
        }))
    }

    /// Drain accumulated degradation events.
    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        std::mem::take(&mut *events)
    }

    fn record_fallback(&self, fallback_name: &str) {
        let primary_name = self.chain.first().map(|p| p.name()).unwrap_or("unknown");
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        events.push(DegradationEvent {
            component: "embeddings".to_string(),
            failure: format!("{primary_name} unavailable"),
            fallback_used: fallback_name.to_string(),
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    impl IEmbeddingProvider for FailingProvider {
        fn embed(&self, _text: &str) -> RefMatchResult<Vec<f32>> {
            Err(EmbeddingError::EncodeFailed {
                reason: "test provider always fails".to_string(),
            }
            .into())
        }

        fn embed_batch(&self, _texts: &[String]) -> RefMatchResult<Vec<Vec<f32>>> {
            Err(EmbeddingError::EncodeFailed {
                reason: "test provider always fails".to_string(),
            }
            .into())
        }

        fn dimensions(&self) -> usize {
            8
        }

        fn name(&self) -> &str {
            "failing"
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    struct ConstProvider;

    impl IEmbeddingProvider for ConstProvider {
        fn embed(&self, _text: &str) -> RefMatchResult<Vec<f32>> {
            Ok(vec![1.0; 8])
        }

        fn embed_batch(&self, texts: &[String]) -> RefMatchResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0; 8]).collect())
        }

        fn dimensions(&self) -> usize {
            8
        }

        fn name(&self) -> &str {
            "const"
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn falls_back_and_records_event() {
        let mut chain = DegradationChain::new();
        chain.push(Box::new(FailingProvider));
        chain.push(Box::new(ConstProvider));

        let (vec, provider) = chain.embed("text").unwrap();
        assert_eq!(vec.len(), 8);
        assert_eq!(provider, "const");

        let events = chain.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].fallback_used, "const");
        assert!(events[0].failure.contains("failing"));
        // Drained means gone.
        assert!(chain.drain_events().is_empty());
    }

    #[test]
    fn first_provider_success_records_nothing() {
        let mut chain = DegradationChain::new();
        chain.push(Box::new(ConstProvider));
        chain.push(Box::new(FailingProvider));

        chain.embed("text").unwrap();
        assert!(chain.drain_events().is_empty());
    }

    #[test]
    fn empty_chain_errors() {
        let chain = DegradationChain::new();
        assert!(chain.embed("text").is_err());
        assert!(chain.embed_batch(&["a".to_string()]).is_err());
    }
}
