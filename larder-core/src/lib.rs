pub mod bootstrap;
pub mod config;
pub mod dataset;
pub mod embedding;
pub mod error;
pub mod index;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod validation;

pub use bootstrap::{BootstrapError, Larder};
pub use config::{AppConfig, ConfigError};
pub use dataset::{load_recipes, read_recipes, Dataset, RecipeMetadata, RecipeRecord};
pub use embedding::{create_embedder, Embedder, EmbedderKind, HashingEmbedder};
pub use error::{DatasetError, EmbedError, RetrievalError};
pub use index::{RecipeIndex, RecipeSearch, RetrievedRecipe, VectorIndex};
pub use llm::{LlmError, LlmProvider};
pub use pipeline::{
    PipelineError, PipelineFailure, PipelineOutcome, PipelineState, RecipePipeline, StepResult,
};
pub use validation::{validate_request, ValidationError, MAX_RECIPES_PER_REQUEST};
