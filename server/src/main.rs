mod api;
mod form;
mod routes;
mod telemetry;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use larder_core::{AppConfig, Larder, RecipeSearch};
use std::env;
use std::sync::Arc;

/// Application state shared across all handlers
pub type AppState = Arc<Larder>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    // A missing .env file is fine; real environment variables still apply
    dotenvy::dotenv().ok();
    telemetry::init_telemetry();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let larder = Larder::from_config(&config).context("Failed to build recipe pipeline")?;
    tracing::info!(
        recipes = larder.index.len(),
        rows_dropped = larder.rows_dropped,
        provider = larder.llm.provider_name(),
        model = larder.llm.model_name(),
        "Recipe pipeline ready"
    );

    let app = routes::app(Arc::new(larder));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    let addr = listener.local_addr()?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Recipe form available at http://{}/", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
