//! Property tests for the embedding engine and dense index.

use proptest::prelude::*;

use refmatch_core::config::EmbeddingSettings;
use refmatch_embeddings::EmbeddingEngine;

fn engine() -> EmbeddingEngine {
    EmbeddingEngine::new(EmbeddingSettings {
        dimensions: 64,
        ..Default::default()
    })
}

proptest! {
    /// Every embedding is either the zero vector or unit-normalized.
    #[test]
    fn embeddings_are_zero_or_unit_norm(text in ".{0,200}") {
        let e = engine();
        let v = e.embed(&text).unwrap();
        prop_assert_eq!(v.len(), 64);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        prop_assert!(norm < 1e-6 || (norm - 1.0).abs() < 1e-4);
    }

    /// Search never returns more hits than requested, and scores are
    /// non-increasing.
    #[test]
    fn search_is_k_bounded_and_sorted(
        texts in prop::collection::vec("[a-z]{2,8}( [a-z]{2,8}){0,5}", 1..20),
        k in 0usize..40,
    ) {
        let e = engine();
        let index = e.build_index(&texts).unwrap().unwrap();
        let hits = e.search_index(&texts[0], Some(&index), k).unwrap();
        prop_assert!(hits.len() <= k);
        for pair in hits.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
        for (pos, _) in &hits {
            prop_assert!(*pos < texts.len());
        }
    }

    /// Similarity of unit vectors is symmetric.
    #[test]
    fn similarity_symmetric(a in "[a-z ]{1,60}", b in "[a-z ]{1,60}") {
        let e = engine();
        let va = e.embed(&a).unwrap();
        let vb = e.embed(&b).unwrap();
        let ab = EmbeddingEngine::similarity(&va, &vb);
        let ba = EmbeddingEngine::similarity(&vb, &va);
        prop_assert!((ab - ba).abs() < 1e-6);
    }
}
