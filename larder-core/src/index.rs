//! In-memory recipe similarity index.
//!
//! [`VectorIndex`] is a brute-force cosine-similarity store, fast enough for
//! the few dozen recipes indexed at startup. [`RecipeIndex`] pairs it with an
//! [`Embedder`] so callers work with text rather than vectors.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dataset::{RecipeMetadata, RecipeRecord};
use crate::embedding::Embedder;
use crate::error::RetrievalError;

/// Default number of recipes retrieved per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Default number of texts embedded per insertion batch.
pub const DEFAULT_BATCH_SIZE: usize = 16;

/// A recipe returned by similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedRecipe {
    pub title: String,
    pub instructions: String,
    /// Cosine similarity to the query (higher is closer).
    pub score: f32,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    vector: Vec<f32>,
    metadata: RecipeMetadata,
}

/// Brute-force cosine similarity index.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
        }
    }

    pub fn insert(
        &mut self,
        vector: Vec<f32>,
        metadata: RecipeMetadata,
    ) -> Result<(), RetrievalError> {
        if vector.len() != self.dimensions {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.dimensions,
                got: vector.len(),
            });
        }
        self.entries.push(IndexEntry { vector, metadata });
        Ok(())
    }

    /// Return at most `k` entries ordered by decreasing similarity.
    ///
    /// Ties keep insertion order.
    pub fn search(
        &self,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<RetrievedRecipe>, RetrievalError> {
        if self.entries.is_empty() {
            return Err(RetrievalError::EmptyIndex);
        }
        if query.len() != self.dimensions {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.dimensions,
                got: query.len(),
            });
        }

        let mut scored: Vec<(f32, &IndexEntry)> = self
            .entries
            .iter()
            .map(|entry| (cosine_similarity(query, &entry.vector), entry))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(score, entry)| RetrievedRecipe {
                title: entry.metadata.title.clone(),
                instructions: entry.metadata.instructions.clone(),
                score,
            })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Anything that can answer "which stored recipes are closest to this text".
pub trait RecipeSearch: Send + Sync {
    fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedRecipe>, RetrievalError>;

    /// Number of recipes available to search.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Text-level recipe index: embeds on insert and on query.
#[derive(Debug)]
pub struct RecipeIndex {
    embedder: Arc<dyn Embedder>,
    vectors: VectorIndex,
    batch_size: usize,
}

impl RecipeIndex {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        let dimensions = embedder.dimensions();
        Self {
            embedder,
            vectors: VectorIndex::new(dimensions),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Embed and insert one batch of texts with their metadata.
    pub fn add_texts(
        &mut self,
        texts: &[String],
        metadatas: Vec<RecipeMetadata>,
    ) -> Result<(), RetrievalError> {
        if texts.len() != metadatas.len() {
            return Err(RetrievalError::LengthMismatch {
                texts: texts.len(),
                metadatas: metadatas.len(),
            });
        }

        let vectors = self.embedder.embed_documents(texts)?;
        for (vector, metadata) in vectors.into_iter().zip(metadatas) {
            self.vectors.insert(vector, metadata)?;
        }
        Ok(())
    }

    /// Index recipes in fixed-size batches.
    pub fn add_recipes(&mut self, recipes: &[RecipeRecord]) -> Result<(), RetrievalError> {
        for batch in recipes.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(RecipeRecord::index_text).collect();
            let metadatas = batch.iter().map(RecipeRecord::metadata).collect();
            self.add_texts(&texts, metadatas)?;
            tracing::debug!(
                batch_len = batch.len(),
                indexed = self.vectors.len(),
                "Added recipe batch"
            );
        }

        tracing::info!(
            recipes = self.vectors.len(),
            model = self.embedder.model_name(),
            "Recipe index ready"
        );
        Ok(())
    }

    pub fn embedder(&self) -> &dyn Embedder {
        self.embedder.as_ref()
    }
}

impl RecipeSearch for RecipeIndex {
    fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedRecipe>, RetrievalError> {
        if self.vectors.is_empty() {
            return Err(RetrievalError::EmptyIndex);
        }
        let query_vector = self.embedder.embed_query(query)?;
        self.vectors.search(&query_vector, k)
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }
}
