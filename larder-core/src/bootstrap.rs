//! Startup wiring shared by the server and the CLI.

use std::sync::Arc;

use thiserror::Error;

use crate::config::AppConfig;
use crate::dataset::{load_recipes, Dataset};
use crate::embedding::create_embedder;
use crate::error::{DatasetError, EmbedError, RetrievalError};
use crate::index::RecipeIndex;
use crate::llm::{create_provider, LlmError, LlmProvider};
use crate::pipeline::RecipePipeline;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Embed(#[from] EmbedError),

    #[error("Failed to build recipe index: {0}")]
    Index(#[from] RetrievalError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Loaded index plus a ready-to-run pipeline.
///
/// Built once per process; the index is read-only afterwards.
pub struct Larder {
    pub index: Arc<RecipeIndex>,
    pub llm: Arc<dyn LlmProvider>,
    pub pipeline: RecipePipeline,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

impl Larder {
    /// Load the dataset, build the index and connect the configured LLM.
    pub fn from_config(config: &AppConfig) -> Result<Self, BootstrapError> {
        let dataset = load_recipes(&config.dataset.path, config.dataset.max_recipes)?;
        let llm: Arc<dyn LlmProvider> = Arc::from(create_provider(&config.llm)?);
        Self::from_parts(config, dataset, llm)
    }

    /// Build from an already loaded dataset and provider.
    pub fn from_parts(
        config: &AppConfig,
        dataset: Dataset,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Self, BootstrapError> {
        let embedder = create_embedder(config.embedder)?;
        let mut index = RecipeIndex::new(embedder).with_batch_size(config.dataset.batch_size);
        index.add_recipes(&dataset.recipes)?;

        let index = Arc::new(index);
        let pipeline = RecipePipeline::with_top_k(index.clone(), llm.clone(), config.top_k);

        Ok(Self {
            index,
            llm,
            pipeline,
            rows_read: dataset.rows_read,
            rows_dropped: dataset.rows_dropped,
        })
    }
}
