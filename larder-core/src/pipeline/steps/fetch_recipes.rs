//! Retrieve step - look up similar recipes in the index.

use std::sync::Arc;

use async_trait::async_trait;

use crate::index::RecipeSearch;
use crate::pipeline::{
    PipelineError, PipelineState, PipelineStep, StateUpdate, StepMetadata, StepOutput,
};

use super::GenerateResponseStep;

/// Queries the recipe index with the ingredient text.
///
/// `top_k` is fixed at construction and independent of how many recipes the
/// user asked for.
pub struct FetchRecipesStep {
    search: Arc<dyn RecipeSearch>,
    top_k: usize,
}

impl FetchRecipesStep {
    pub const NAME: &'static str = "fetch_recipes";

    pub fn new(search: Arc<dyn RecipeSearch>, top_k: usize) -> Self {
        Self { search, top_k }
    }
}

#[async_trait]
impl PipelineStep for FetchRecipesStep {
    fn metadata(&self) -> StepMetadata {
        StepMetadata {
            name: Self::NAME,
            description: "Find the closest recipes in the index",
        }
    }

    async fn execute(&self, state: &PipelineState) -> Result<StepOutput, PipelineError> {
        let ingredients = state.ingredients().ok_or(PipelineError::MissingInput {
            step: Self::NAME,
            field: "ingredients",
        })?;

        let mut recipes = self.search.similarity_search(ingredients, self.top_k)?;
        recipes.truncate(self.top_k);

        tracing::debug!(
            found = recipes.len(),
            top_k = self.top_k,
            titles = ?recipes.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            "Retrieved similar recipes"
        );

        Ok(StepOutput {
            update: StateUpdate {
                retrieved_recipes: Some(recipes),
                ..Default::default()
            },
            next_step: Some(GenerateResponseStep::NAME),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RetrievalError;
    use crate::index::RetrievedRecipe;
    use crate::pipeline::StateUpdate;

    /// Ignores `k` and returns everything, to prove the step caps the count.
    struct GreedySearch(usize);

    impl RecipeSearch for GreedySearch {
        fn similarity_search(
            &self,
            _query: &str,
            _k: usize,
        ) -> Result<Vec<RetrievedRecipe>, RetrievalError> {
            Ok((0..self.0)
                .map(|i| RetrievedRecipe {
                    title: format!("Recipe {}", i),
                    instructions: "Cook.".to_string(),
                    score: 1.0 - i as f32 / 100.0,
                })
                .collect())
        }

        fn len(&self) -> usize {
            self.0
        }
    }

    struct EmptySearch;

    impl RecipeSearch for EmptySearch {
        fn similarity_search(
            &self,
            _query: &str,
            _k: usize,
        ) -> Result<Vec<RetrievedRecipe>, RetrievalError> {
            Err(RetrievalError::EmptyIndex)
        }

        fn len(&self) -> usize {
            0
        }
    }

    fn extracted_state(input: &str) -> PipelineState {
        let mut state = PipelineState::new(input, 5);
        state
            .apply(
                "test",
                StateUpdate {
                    ingredients: Some(input.to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        state
    }

    #[tokio::test]
    async fn test_caps_results_at_top_k() {
        let step = FetchRecipesStep::new(Arc::new(GreedySearch(20)), 3);
        let output = step.execute(&extracted_state("rice")).await.unwrap();
        let recipes = output.update.retrieved_recipes.unwrap();
        assert_eq!(recipes.len(), 3);
        assert_eq!(recipes[0].title, "Recipe 0");
        assert_eq!(output.next_step, Some(GenerateResponseStep::NAME));
    }

    #[tokio::test]
    async fn test_requires_ingredients() {
        let step = FetchRecipesStep::new(Arc::new(GreedySearch(1)), 3);
        let err = step
            .execute(&PipelineState::new("rice", 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingInput {
                field: "ingredients",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_propagates_index_errors() {
        let step = FetchRecipesStep::new(Arc::new(EmptySearch), 3);
        let err = step.execute(&extracted_state("rice")).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Retrieval(RetrievalError::EmptyIndex)
        ));
    }
}
