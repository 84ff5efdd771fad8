//! Text embedding models.
//!
//! The [`Embedder`] trait turns text into fixed-size vectors for the recipe
//! index. Two implementations exist:
//!
//! - [`HashingEmbedder`]: deterministic token feature hashing, no model files.
//! - `FastEmbedder`: all-MiniLM-L6-v2 via fastembed (requires the `fastembed`
//!   cargo feature).

mod hashing;
#[cfg(feature = "fastembed")]
mod onnx;

pub use hashing::HashingEmbedder;
#[cfg(feature = "fastembed")]
pub use onnx::FastEmbedder;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::EmbedError;

/// Output dimension of all-MiniLM-L6-v2, also used by the hashing embedder.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Trait for embedding models.
pub trait Embedder: Send + Sync + fmt::Debug {
    /// Embed a batch of documents, one vector per input, in order.
    fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;

    /// Embed a single search query.
    fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut vectors = self.embed_documents(&[text.to_string()])?;
        if vectors.len() != 1 {
            return Err(EmbedError::CountMismatch {
                expected: 1,
                got: vectors.len(),
            });
        }
        vectors
            .pop()
            .ok_or(EmbedError::CountMismatch { expected: 1, got: 0 })
    }

    /// Length of every vector this model produces.
    fn dimensions(&self) -> usize;

    /// Model name, for logs.
    fn model_name(&self) -> &str;
}

/// Which embedding model to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedderKind {
    #[default]
    Hashing,
    FastEmbed,
}

impl FromStr for EmbedderKind {
    type Err = EmbedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hashing" => Ok(Self::Hashing),
            "fastembed" | "minilm" => Ok(Self::FastEmbed),
            other => Err(EmbedError::Unavailable(format!(
                "Unknown embedder: {}",
                other
            ))),
        }
    }
}

/// Create the configured embedder.
pub fn create_embedder(kind: EmbedderKind) -> Result<Arc<dyn Embedder>, EmbedError> {
    match kind {
        EmbedderKind::Hashing => Ok(Arc::new(HashingEmbedder::default())),
        #[cfg(feature = "fastembed")]
        EmbedderKind::FastEmbed => Ok(Arc::new(FastEmbedder::new()?)),
        #[cfg(not(feature = "fastembed"))]
        EmbedderKind::FastEmbed => Err(EmbedError::Unavailable(
            "built without the `fastembed` feature".to_string(),
        )),
    }
}
