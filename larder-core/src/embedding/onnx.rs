//! all-MiniLM-L6-v2 sentence embeddings via fastembed (ONNX runtime).

use std::fmt;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use super::{Embedder, DEFAULT_DIMENSIONS};
use crate::error::EmbedError;

const MODEL_NAME: &str = "sentence-transformers/all-MiniLM-L6-v2";

pub struct FastEmbedder {
    model: TextEmbedding,
}

impl fmt::Debug for FastEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastEmbedder")
            .field("model", &MODEL_NAME)
            .finish()
    }
}

impl FastEmbedder {
    /// Load the model, downloading it into fastembed's cache on first use.
    pub fn new() -> Result<Self, EmbedError> {
        let options =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);
        let model =
            TextEmbedding::try_new(options).map_err(|e| EmbedError::Model(e.to_string()))?;
        tracing::info!(model = MODEL_NAME, "Loaded embedding model");
        Ok(Self { model })
    }
}

impl Embedder for FastEmbedder {
    fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let vectors = self
            .model
            .embed(texts.to_vec(), None)
            .map_err(|e| EmbedError::Model(e.to_string()))?;
        if vectors.len() != texts.len() {
            return Err(EmbedError::CountMismatch {
                expected: texts.len(),
                got: vectors.len(),
            });
        }
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        DEFAULT_DIMENSIONS
    }

    fn model_name(&self) -> &str {
        MODEL_NAME
    }
}
