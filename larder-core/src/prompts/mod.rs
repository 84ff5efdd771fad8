//! LLM prompt templates.

pub mod recipe;

pub use recipe::{render_recipe_prompt, youtube_search_link, YOUTUBE_SEARCH_URL};
