mod local;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Larder CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest recipes for a list of ingredients (runs locally)
    Suggest {
        /// Comma-separated ingredients, e.g. "chicken, rice, garlic"
        #[arg(long)]
        ingredients: String,
        /// How many recipes to generate (1-10)
        #[arg(long, default_value_t = 3)]
        num_recipes: u32,
    },
    /// Search the recipe index without calling the model
    Search {
        /// Free-text query, usually an ingredient list
        #[arg(long)]
        query: String,
        /// Number of matches to show
        #[arg(short, default_value_t = 3)]
        k: usize,
    },
    /// Load the dataset, build the index and report counts
    Ingest,
    /// Ping the server (unauthenticated)
    Ping {
        /// Server URL (default: http://localhost:3000)
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Suggest {
            ingredients,
            num_recipes,
        } => {
            local::suggest(&ingredients, num_recipes).await?;
        }
        Commands::Search { query, k } => {
            local::search(&query, k)?;
        }
        Commands::Ingest => {
            local::ingest()?;
        }
        Commands::Ping { server } => {
            ping(&server).await?;
        }
    }

    Ok(())
}

#[derive(Deserialize)]
struct PingResponse {
    message: String,
}

async fn ping(server: &str) -> Result<()> {
    let url = format!("{}/api/test/unauthed-ping", server.trim_end_matches('/'));
    let response: PingResponse = reqwest::get(&url)
        .await
        .with_context(|| format!("Failed to reach {}", url))?
        .error_for_status()?
        .json()
        .await
        .context("Unexpected ping response")?;

    println!("{}", response.message);

    Ok(())
}
