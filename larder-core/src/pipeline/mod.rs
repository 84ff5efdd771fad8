//! Recipe suggestion pipeline.
//!
//! Three steps run in a fixed order, each naming its successor:
//!
//! `extract_ingredients` -> `fetch_recipes` -> `generate_response`
//!
//! Steps read the shared [`PipelineState`] and return the fields they own; the
//! executor merges those additively and refuses overwrites.

mod executor;
mod state;
mod step;
pub mod steps;

pub use executor::{run_pipeline, PipelineFailure, PipelineOutcome, StepRegistry};
pub use state::{PipelineState, StateUpdate};
pub use step::{PipelineStep, StepMetadata, StepOutput, StepResult};

use std::sync::Arc;

use thiserror::Error;

use crate::error::RetrievalError;
use crate::index::{RecipeSearch, DEFAULT_TOP_K};
use crate::llm::{LlmError, LlmProvider};
use steps::{ExtractIngredientsStep, FetchRecipesStep, GenerateResponseStep};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Unknown pipeline step: {0}")]
    UnknownStep(String),

    #[error("Pipeline step {0} ran twice")]
    Cycle(String),

    #[error("Step {step} needs {field}, which no earlier step set")]
    MissingInput {
        step: &'static str,
        field: &'static str,
    },

    #[error("Step {step} tried to overwrite {field}")]
    Overwrite { step: String, field: &'static str },

    #[error("Recipe retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Recipe generation failed: {0}")]
    Llm(#[from] LlmError),
}

/// The assembled extract -> retrieve -> generate pipeline.
pub struct RecipePipeline {
    registry: StepRegistry,
}

impl RecipePipeline {
    pub fn new(search: Arc<dyn RecipeSearch>, llm: Arc<dyn LlmProvider>) -> Self {
        Self::with_top_k(search, llm, DEFAULT_TOP_K)
    }

    pub fn with_top_k(
        search: Arc<dyn RecipeSearch>,
        llm: Arc<dyn LlmProvider>,
        top_k: usize,
    ) -> Self {
        let mut registry = StepRegistry::new();
        registry.register(Box::new(ExtractIngredientsStep));
        registry.register(Box::new(FetchRecipesStep::new(search, top_k)));
        registry.register(Box::new(GenerateResponseStep::new(llm)));
        Self { registry }
    }

    /// Run every step for one submission.
    ///
    /// Callers validate `user_input` and `num_recipes` first.
    pub async fn run(
        &self,
        user_input: &str,
        num_recipes: u32,
    ) -> Result<PipelineOutcome, PipelineFailure> {
        let state = PipelineState::new(user_input, num_recipes);
        run_pipeline(ExtractIngredientsStep::NAME, state, &self.registry).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::steps::{ExtractIngredientsStep, FetchRecipesStep, GenerateResponseStep};

    #[test]
    fn step_names_are_unique() {
        let names = [
            ExtractIngredientsStep::NAME,
            FetchRecipesStep::NAME,
            GenerateResponseStep::NAME,
        ];

        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(
            names.len(),
            unique.len(),
            "Duplicate step names detected! Names: {:?}",
            names
        );
    }
}
