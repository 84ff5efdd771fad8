//! The three recipe pipeline stages.

mod extract_ingredients;
mod fetch_recipes;
mod generate_response;

pub use extract_ingredients::ExtractIngredientsStep;
pub use fetch_recipes::FetchRecipesStep;
pub use generate_response::GenerateResponseStep;
