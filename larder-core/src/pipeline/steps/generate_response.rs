//! Generate step - prompt the LLM with the ingredients and retrieved recipes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::llm::LlmProvider;
use crate::pipeline::{
    PipelineError, PipelineState, PipelineStep, StateUpdate, StepMetadata, StepOutput,
};
use crate::prompts::render_recipe_prompt;

/// Sends the recipe prompt and stores the raw response as `final_output`.
pub struct GenerateResponseStep {
    llm: Arc<dyn LlmProvider>,
}

impl GenerateResponseStep {
    pub const NAME: &'static str = "generate_response";

    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl PipelineStep for GenerateResponseStep {
    fn metadata(&self) -> StepMetadata {
        StepMetadata {
            name: Self::NAME,
            description: "Generate new recipe ideas with the language model",
        }
    }

    async fn execute(&self, state: &PipelineState) -> Result<StepOutput, PipelineError> {
        let ingredients = state.ingredients().ok_or(PipelineError::MissingInput {
            step: Self::NAME,
            field: "ingredients",
        })?;
        let inspirations = state
            .retrieved_recipes()
            .ok_or(PipelineError::MissingInput {
                step: Self::NAME,
                field: "retrieved_recipes",
            })?;

        let prompt = render_recipe_prompt(ingredients, state.num_recipes(), inspirations);

        tracing::info!(
            provider = self.llm.provider_name(),
            model = self.llm.model_name(),
            prompt_chars = prompt.len(),
            num_recipes = state.num_recipes(),
            "Requesting recipe ideas"
        );

        let response = self.llm.complete(&prompt).await?;

        Ok(StepOutput {
            update: StateUpdate {
                final_output: Some(response),
                ..Default::default()
            },
            next_step: None,
        })
    }
}
