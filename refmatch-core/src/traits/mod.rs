mod embedding;

pub use embedding::IEmbeddingProvider;
