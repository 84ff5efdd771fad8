//! LLM provider abstraction for recipe generation.
//!
//! The generator stage only needs "prompt in, text out", so providers expose a
//! single `complete` call. Groq is used in production; the fake provider backs
//! tests, and the caching wrapper keeps repeated prompts off the network.

mod caching;
mod fake;
mod groq;

pub use caching::{CacheStats, CachingProvider};
pub use fake::FakeProvider;
pub use groq::GroqProvider;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;

/// Default Groq model.
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Default OpenAI-compatible endpoint for Groq.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Error type for LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}

/// Trait for LLM providers.
///
/// Implementations must be thread-safe; one provider is shared by every
/// request the server handles.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt to the LLM and get a text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Provider name (e.g., "groq", "fake").
    fn provider_name(&self) -> &'static str;

    /// Model name (e.g., "llama3-70b-8192").
    fn model_name(&self) -> &str;
}

/// Which provider to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Groq,
    Fake,
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            "fake" => Ok(Self::Fake),
            other => Err(LlmError::NotConfigured(format!(
                "Unknown provider: {}",
                other
            ))),
        }
    }
}

/// LLM settings, usually read by [`crate::config::AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    /// Required for Groq.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// When set, responses are cached on disk under this directory.
    pub cache_dir: Option<PathBuf>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_dir: None,
        }
    }
}

/// Build the configured provider, wrapped in a cache when `cache_dir` is set.
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn LlmProvider>, LlmError> {
    let inner: Box<dyn LlmProvider> = match config.provider {
        ProviderKind::Fake => Box::new(FakeProvider::with_recipe_responses()),
        ProviderKind::Groq => {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| LlmError::NotConfigured("GROQ_API_KEY not set".to_string()))?;
            Box::new(GroqProvider::new(
                api_key,
                config.model.clone(),
                config.base_url.clone(),
            ))
        }
    };

    tracing::info!(
        provider = inner.provider_name(),
        model = inner.model_name(),
        cached = config.cache_dir.is_some(),
        "LLM provider configured"
    );

    Ok(match &config.cache_dir {
        Some(dir) => Box::new(CachingProvider::new(inner, dir.clone())),
        None => inner,
    })
}
