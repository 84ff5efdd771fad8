//! Shared fixtures for handler tests.

use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use axum::Router;
use larder_core::config::DatasetConfig;
use larder_core::llm::{FakeProvider, LlmConfig, ProviderKind};
use larder_core::{AppConfig, Dataset, EmbedderKind, Larder, RecipeRecord};

fn recipe(title: &str, ingredients: &str, instructions: &str) -> RecipeRecord {
    RecipeRecord {
        title: title.to_string(),
        ingredients: ingredients.to_string(),
        instructions: instructions.to_string(),
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        llm: LlmConfig {
            provider: ProviderKind::Fake,
            ..Default::default()
        },
        dataset: DatasetConfig::default(),
        embedder: EmbedderKind::Hashing,
        top_k: 3,
        bind: "127.0.0.1:0".parse().unwrap(),
    }
}

fn test_dataset() -> Dataset {
    Dataset {
        recipes: vec![
            recipe(
                "Garlic Butter Chicken",
                "chicken thighs, garlic, butter",
                "Sear the chicken, baste with garlic butter.",
            ),
            recipe(
                "Chicken Fried Rice",
                "rice, chicken, eggs, garlic, soy sauce",
                "Stir-fry everything in a hot wok.",
            ),
            recipe(
                "Lemon Rice Pilaf",
                "basmati rice, lemon, butter",
                "Toast the rice, simmer with stock and zest.",
            ),
            recipe(
                "Tomato Basil Soup",
                "tomatoes, onion, basil",
                "Roast, blend, finish with basil.",
            ),
        ],
        rows_read: 4,
        rows_dropped: 0,
    }
}

/// App backed by the fixture recipes and the given fake model.
pub fn test_app_with(fake: Arc<FakeProvider>) -> Router {
    let larder = Larder::from_parts(&test_config(), test_dataset(), fake)
        .expect("fixture pipeline should build");
    crate::routes::app(Arc::new(larder))
}

/// App whose model always answers with two well-formed recipes.
pub fn test_app() -> Router {
    test_app_with(Arc::new(FakeProvider::with_recipe_responses()))
}

pub async fn read_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn read_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&read_text(response).await).unwrap()
}
