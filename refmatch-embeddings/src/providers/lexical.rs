//! Locally-fit sparse lexical vectorizer — the last-resort provider.
//!
//! TF-IDF over a vocabulary fitted ONCE, on the first call this instance
//! ever serves (a single text or a whole batch), and frozen thereafter
//! for the instance's lifetime. That is a deliberate single-corpus batch
//! simplification: the corpus build embeds all profile texts in one batch,
//! so the vocabulary is fitted on exactly that corpus and later queries
//! are projected into it. Reusing one instance across independent corpora
//! would misrepresent the later ones — construct a fresh engine instead.

use std::collections::HashMap;
use std::sync::OnceLock;

use refmatch_core::errors::RefMatchResult;
use refmatch_core::traits::IEmbeddingProvider;

/// Frozen vocabulary: term positions plus per-term IDF weights.
struct Vocabulary {
    positions: HashMap<String, usize>,
    idf: Vec<f32>,
}

/// Lexical TF-IDF embedding provider.
///
/// Vocabulary is capped at the configured dimension (most document-frequent
/// terms win); vectors never exceed the dimension and are implicitly
/// zero-padded when the vocabulary is smaller. Output is L2-normalized,
/// with the zero vector staying zero.
pub struct LexicalVectorizer {
    dimensions: usize,
    vocabulary: OnceLock<Vocabulary>,
}

impl LexicalVectorizer {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            vocabulary: OnceLock::new(),
        }
    }

    /// Whether the one-shot vocabulary fit has happened.
    pub fn is_fitted(&self) -> bool {
        self.vocabulary.get().is_some()
    }

    /// Tokenize text into lowercase alphanumeric terms.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| s.len() >= 2)
            .map(|s| s.to_lowercase())
            .collect()
    }

    /// Fit a vocabulary on the given documents.
    fn fit(&self, docs: &[Vec<String>]) -> Vocabulary {
        // Document frequency per term.
        let mut df: HashMap<&str, usize> = HashMap::new();
        for doc in docs {
            let mut seen: Vec<&str> = doc.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *df.entry(term).or_default() += 1;
            }
        }

        // Most frequent terms win the capped vocabulary; lexicographic
        // tie-break keeps the fit deterministic.
        let mut ranked: Vec<(&str, usize)> = df.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.dimensions);

        let n_docs = docs.len() as f32;
        let mut positions = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (pos, (term, count)) in ranked.into_iter().enumerate() {
            positions.insert(term.to_string(), pos);
            idf.push(((1.0 + n_docs) / (1.0 + count as f32)).ln() + 1.0);
        }

        Vocabulary { positions, idf }
    }

    /// Project tokens into the frozen vocabulary and L2-normalize.
    fn vectorize(&self, vocabulary: &Vocabulary, tokens: &[String]) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in tf {
            if let Some(&pos) = vocabulary.positions.get(term) {
                vec[pos] = (count / total) * vocabulary.idf[pos];
            }
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for LexicalVectorizer {
    fn embed(&self, text: &str) -> RefMatchResult<Vec<f32>> {
        let tokens = Self::tokenize(text);
        let vocabulary = self
            .vocabulary
            .get_or_init(|| self.fit(std::slice::from_ref(&tokens)));
        Ok(self.vectorize(vocabulary, &tokens))
    }

    fn embed_batch(&self, texts: &[String]) -> RefMatchResult<Vec<Vec<f32>>> {
        let docs: Vec<Vec<String>> = texts.iter().map(|t| Self::tokenize(t)).collect();
        let vocabulary = self.vocabulary.get_or_init(|| self.fit(&docs));

        use rayon::prelude::*;
        Ok(docs
            .par_iter()
            .map(|tokens| self.vectorize(vocabulary, tokens))
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "lexical-tfidf"
    }

    fn is_available(&self) -> bool {
        true
    }
}
