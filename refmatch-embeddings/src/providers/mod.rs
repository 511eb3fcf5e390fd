//! Embedding providers, in degradation order.
//!
//! Chain assembly probes each capability exactly once at engine
//! construction: an ONNX model that fails to load is logged and left out
//! of the chain rather than retried per call.

mod lexical;
#[cfg(feature = "onnx")]
mod onnx_provider;

pub use lexical::LexicalVectorizer;
#[cfg(feature = "onnx")]
pub use onnx_provider::OnnxProvider;

use refmatch_core::config::EmbeddingSettings;

use crate::degradation::DegradationChain;

/// Build the provider chain for the given settings.
///
/// Order: scientific ONNX encoder, general ONNX encoder (both only when
/// the `onnx` feature is compiled in and the model file loads), then the
/// lexical vectorizer, which is always available.
pub fn build_chain(settings: &EmbeddingSettings) -> DegradationChain {
    let mut chain = DegradationChain::new();

    #[cfg(feature = "onnx")]
    {
        use tracing::warn;

        for path in [
            settings.scientific_model_path.as_deref(),
            settings.general_model_path.as_deref(),
        ]
        .into_iter()
        .flatten()
        {
            match OnnxProvider::load(path, settings.dimensions) {
                Ok(provider) => chain.push(Box::new(provider)),
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "ONNX encoder unavailable, continuing down the chain"
                ),
            }
        }
    }

    chain.push(Box::new(LexicalVectorizer::new(settings.dimensions)));
    chain
}
