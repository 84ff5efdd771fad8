//! Commands that run against a locally built index.

use std::env;

use anyhow::{Context, Result};
use larder_core::{
    create_embedder, load_recipes, validate_request, AppConfig, Larder, RecipeIndex, RecipeSearch,
};

/// Config for commands that never call the model, so no API key is needed.
fn index_only_config() -> Result<AppConfig> {
    let config = AppConfig::from_lookup(|name| match name {
        "LARDER_LLM_PROVIDER" => Some("fake".to_string()),
        _ => env::var(name).ok(),
    })?;
    Ok(config)
}

fn build_index(config: &AppConfig) -> Result<(RecipeIndex, usize, usize)> {
    let dataset = load_recipes(&config.dataset.path, config.dataset.max_recipes)
        .with_context(|| format!("Failed to load {}", config.dataset.path.display()))?;
    let embedder = create_embedder(config.embedder)?;
    let mut index = RecipeIndex::new(embedder).with_batch_size(config.dataset.batch_size);
    index.add_recipes(&dataset.recipes)?;
    Ok((index, dataset.rows_read, dataset.rows_dropped))
}

pub async fn suggest(ingredients: &str, num_recipes: u32) -> Result<()> {
    // Reject bad input before paying for dataset load and embedding
    let (ingredients, num_recipes) = validate_request(ingredients, num_recipes)?;

    let config = AppConfig::from_env()?;
    let larder = Larder::from_config(&config)?;
    let outcome = match larder.pipeline.run(ingredients, num_recipes).await {
        Ok(outcome) => outcome,
        Err(failure) => {
            for step in &failure.steps {
                let status = if step.success { "ok" } else { "FAILED" };
                eprintln!("  {:<6} {} ({} ms)", status, step.step_name, step.duration_ms);
            }
            return Err(failure.error.into());
        }
    };

    if let Some(recipes) = outcome.state.retrieved_recipes() {
        eprintln!("Inspired by:");
        for recipe in recipes {
            eprintln!("  {:.3}  {}", recipe.score, recipe.title);
        }
        eprintln!();
    }

    println!("{}", outcome.state.final_output());
    Ok(())
}

pub fn search(query: &str, k: usize) -> Result<()> {
    let config = index_only_config()?;
    let (index, _, _) = build_index(&config)?;

    let matches = index.similarity_search(query, k)?;
    if matches.is_empty() {
        println!("No matches");
    }
    for (i, recipe) in matches.iter().enumerate() {
        println!("{}. {} (score {:.3})", i + 1, recipe.title, recipe.score);
        println!("   {}", recipe.instructions);
    }
    Ok(())
}

pub fn ingest() -> Result<()> {
    let config = index_only_config()?;
    let (index, rows_read, rows_dropped) = build_index(&config)?;

    println!("Dataset: {}", config.dataset.path.display());
    println!("Rows read: {}", rows_read);
    println!("Rows dropped (missing fields): {}", rows_dropped);
    println!("Recipes indexed: {}", index.len());
    println!(
        "Embedder: {} ({} dimensions)",
        index.embedder().model_name(),
        index.embedder().dimensions()
    );
    Ok(())
}
