//! Configuration from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::dataset::DEFAULT_MAX_RECIPES;
use crate::embedding::EmbedderKind;
use crate::index::{DEFAULT_BATCH_SIZE, DEFAULT_TOP_K};
use crate::llm::{LlmConfig, ProviderKind, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Default dataset file name (the Kaggle food ingredients and recipes export).
pub const DEFAULT_DATASET: &str = "Food Ingredients and Recipe Dataset with Image Name Mapping.csv";

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

/// Dataset and indexing settings.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub path: PathBuf,
    pub max_recipes: usize,
    pub batch_size: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATASET),
            max_recipes: DEFAULT_MAX_RECIPES,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub dataset: DatasetConfig,
    pub embedder: EmbedderKind,
    /// Recipes retrieved per query.
    pub top_k: usize,
    pub bind: SocketAddr,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Required:
    /// - `GROQ_API_KEY`: only when the provider is `groq`
    ///
    /// Optional:
    /// - `LARDER_LLM_PROVIDER`: "groq" (default) or "fake"
    /// - `LARDER_LLM_MODEL`: model name (default: "llama3-70b-8192")
    /// - `LARDER_LLM_BASE_URL`: OpenAI-compatible API base URL
    /// - `LARDER_LLM_CACHE_DIR`: cache generated responses on disk
    /// - `LARDER_DATASET`: path to the recipe CSV
    /// - `LARDER_MAX_RECIPES`: valid rows to index (default: 50)
    /// - `LARDER_BATCH_SIZE`: texts embedded per batch (default: 16)
    /// - `LARDER_TOP_K`: recipes retrieved per query (default: 3)
    /// - `LARDER_EMBEDDER`: "hashing" (default) or "fastembed"
    /// - `LARDER_BIND`: server listen address (default: "0.0.0.0:3000")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = parse_or(&lookup, "LARDER_LLM_PROVIDER", ProviderKind::default())?;
        let api_key = lookup("GROQ_API_KEY").filter(|k| !k.trim().is_empty());
        if provider == ProviderKind::Groq && api_key.is_none() {
            return Err(ConfigError::MissingEnvVar("GROQ_API_KEY".to_string()));
        }

        let llm = LlmConfig {
            provider,
            api_key,
            model: lookup("LARDER_LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: lookup("LARDER_LLM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            cache_dir: lookup("LARDER_LLM_CACHE_DIR").map(PathBuf::from),
        };

        let dataset = DatasetConfig {
            path: lookup("LARDER_DATASET")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET)),
            max_recipes: parse_or(&lookup, "LARDER_MAX_RECIPES", DEFAULT_MAX_RECIPES)?,
            batch_size: positive(&lookup, "LARDER_BATCH_SIZE", DEFAULT_BATCH_SIZE)?,
        };

        Ok(Self {
            llm,
            dataset,
            embedder: parse_or(&lookup, "LARDER_EMBEDDER", EmbedderKind::default())?,
            top_k: positive(&lookup, "LARDER_TOP_K", DEFAULT_TOP_K)?,
            bind: parse_or(&lookup, "LARDER_BIND", default_bind())?,
        })
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                value,
            }),
    }
}

fn positive<F>(lookup: &F, name: &str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse_or(lookup, name, default)?;
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: "0".to_string(),
        });
    }
    Ok(value)
}
