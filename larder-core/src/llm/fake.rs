//! Fake LLM provider for testing and offline demos.
//!
//! Responses are matched by checking whether the prompt contains a registered
//! substring, in registration order. Every prompt is recorded so tests can
//! inspect what the generator actually sent.

use super::{LlmError, LlmProvider};
use crate::prompts::youtube_search_link;
use async_trait::async_trait;
use tokio::sync::Mutex;

#[derive(Debug)]
pub struct FakeProvider {
    /// (prompt substring, response), first match wins
    responses: Vec<(String, String)>,
    /// Response when no pattern matches
    default_response: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeProvider {
    /// Create a FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            default_response: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a FakeProvider that returns a specific response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .push((prompt_contains.to_string(), response.to_string()));
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// A provider that answers every prompt with two well-formed recipes.
    pub fn with_recipe_responses() -> Self {
        Self::new().with_default_response(&sample_recipes_response())
    }

    /// Prompts received so far, oldest first.
    pub async fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

/// Canned answer in the format the recipe prompt asks for.
pub fn sample_recipes_response() -> String {
    format!(
        "1. Garlic Chicken Fried Rice (popular in China; source: traditional Cantonese home cooking)\n\
         Ingredients: 300 g chicken, 2 cups cooked rice, 4 cloves garlic\n\
         Steps:\n\
         1. Stir-fry the garlic until fragrant.\n\
         2. Add the chicken and cook through.\n\
         3. Toss in the rice and season.\n\
         YouTube Video Link: {}\n\n\
         2. Chicken and Garlic Rice Soup (popular in the Philippines as arroz caldo; source: Filipino comfort cooking)\n\
         Ingredients: 250 g chicken, 1 cup rice, 6 cloves garlic\n\
         Steps:\n\
         1. Simmer the rice with the chicken until creamy.\n\
         2. Top with crisp fried garlic.\n\
         YouTube Video Link: {}\n",
        youtube_search_link("Garlic Chicken Fried Rice"),
        youtube_search_link("Chicken and Garlic Rice Soup"),
    )
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().await.push(prompt.to_string());

        // Case-insensitive substring match
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in &self.responses {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_provider_matching() {
        let provider = FakeProvider::with_response("hello", "world");
        let result = provider.complete("Say hello to the user").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_case_insensitive() {
        let provider = FakeProvider::with_response("HELLO", "world");
        let result = provider.complete("hello there").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_first_registered_pattern_wins() {
        let mut provider = FakeProvider::new();
        provider.add_response("chicken", "first");
        provider.add_response("rice", "second");
        let result = provider.complete("chicken, rice").await.unwrap();
        assert_eq!(result, "first");
    }

    #[tokio::test]
    async fn test_fake_provider_no_match() {
        let provider = FakeProvider::new();
        let result = provider.complete("random prompt").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_provider_default_response() {
        let provider = FakeProvider::new().with_default_response("default");
        let result = provider.complete("random prompt").await.unwrap();
        assert_eq!(result, "default");
    }

    #[tokio::test]
    async fn test_records_prompts() {
        let provider = FakeProvider::with_recipe_responses();
        provider.complete("first").await.unwrap();
        provider.complete("second").await.unwrap();
        assert_eq!(provider.recorded_prompts().await, vec!["first", "second"]);
    }

    #[test]
    fn test_sample_response_has_links() {
        let response = sample_recipes_response();
        assert_eq!(response.matches("YouTube Video Link: ").count(), 2);
        assert!(response.contains(
            "https://www.youtube.com/results?search_query=Garlic+Chicken+Fried+Rice+recipe"
        ));
    }
}
