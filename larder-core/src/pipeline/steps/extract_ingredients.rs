//! Extract step - copy the raw input into the ingredients field.

use async_trait::async_trait;

use crate::pipeline::{
    PipelineError, PipelineState, PipelineStep, StateUpdate, StepMetadata, StepOutput,
};

use super::FetchRecipesStep;

/// Copies `user_input` to `ingredients` unchanged.
///
/// Input has already been validated by the caller; there is no parsing here.
pub struct ExtractIngredientsStep;

impl ExtractIngredientsStep {
    pub const NAME: &'static str = "extract_ingredients";
}

#[async_trait]
impl PipelineStep for ExtractIngredientsStep {
    fn metadata(&self) -> StepMetadata {
        StepMetadata {
            name: Self::NAME,
            description: "Copy the user's input into the ingredients field",
        }
    }

    async fn execute(&self, state: &PipelineState) -> Result<StepOutput, PipelineError> {
        Ok(StepOutput {
            update: StateUpdate {
                ingredients: Some(state.user_input().to_string()),
                ..Default::default()
            },
            next_step: Some(FetchRecipesStep::NAME),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_copies_input_verbatim() {
        let state = PipelineState::new("Chicken,  RICE ,garlic", 2);
        let output = ExtractIngredientsStep.execute(&state).await.unwrap();
        assert_eq!(
            output.update.ingredients.as_deref(),
            Some("Chicken,  RICE ,garlic")
        );
        assert_eq!(output.update.final_output, None);
        assert_eq!(output.next_step, Some(FetchRecipesStep::NAME));
    }
}
