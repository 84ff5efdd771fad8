//! State threaded through the recipe pipeline.

use serde::{Deserialize, Serialize};

use super::PipelineError;
use crate::index::RetrievedRecipe;

/// One submission's worth of pipeline state.
///
/// `user_input` and `num_recipes` are fixed at creation. The remaining fields
/// start unset and are filled exactly once, in pipeline order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    user_input: String,
    num_recipes: u32,
    ingredients: Option<String>,
    retrieved_recipes: Option<Vec<RetrievedRecipe>>,
    final_output: Option<String>,
}

/// Fields a step wants to set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub ingredients: Option<String>,
    pub retrieved_recipes: Option<Vec<RetrievedRecipe>>,
    pub final_output: Option<String>,
}

impl PipelineState {
    pub fn new(user_input: impl Into<String>, num_recipes: u32) -> Self {
        Self {
            user_input: user_input.into(),
            num_recipes,
            ingredients: None,
            retrieved_recipes: None,
            final_output: None,
        }
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn num_recipes(&self) -> u32 {
        self.num_recipes
    }

    pub fn ingredients(&self) -> Option<&str> {
        self.ingredients.as_deref()
    }

    pub fn retrieved_recipes(&self) -> Option<&[RetrievedRecipe]> {
        self.retrieved_recipes.as_deref()
    }

    /// Generated text, empty until the generator has run.
    pub fn final_output(&self) -> &str {
        self.final_output.as_deref().unwrap_or("")
    }

    /// Merge a step's update. Setting a field that is already set is an error.
    pub fn apply(&mut self, step: &str, update: StateUpdate) -> Result<(), PipelineError> {
        fill(&mut self.ingredients, update.ingredients, step, "ingredients")?;
        fill(
            &mut self.retrieved_recipes,
            update.retrieved_recipes,
            step,
            "retrieved_recipes",
        )?;
        fill(&mut self.final_output, update.final_output, step, "final_output")?;
        Ok(())
    }
}

fn fill<T>(
    slot: &mut Option<T>,
    value: Option<T>,
    step: &str,
    field: &'static str,
) -> Result<(), PipelineError> {
    let Some(value) = value else {
        return Ok(());
    };
    if slot.is_some() {
        return Err(PipelineError::Overwrite {
            step: step.to_string(),
            field,
        });
    }
    *slot = Some(value);
    Ok(())
}
