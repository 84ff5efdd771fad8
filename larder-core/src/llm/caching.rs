//! Disk cache in front of any LLM provider.
//!
//! Generated recipes are stored as JSON under
//! `{cache_dir}/{provider}/{model}/{prompt_hash}.json`. The same prompt sent to
//! the same model is answered from disk, which keeps demos and repeated
//! submissions from spending API quota.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedCompletion {
    provider: String,
    model: String,
    prompt_hash: String,
    cached_at: DateTime<Utc>,
    response: String,
}

/// Hit/miss counters plus the number of responses on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub cached_responses: usize,
}

#[derive(Debug)]
pub struct CachingProvider {
    inner: Box<dyn LlmProvider>,
    cache_dir: PathBuf,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachingProvider {
    pub fn new(inner: Box<dyn LlmProvider>, cache_dir: PathBuf) -> Self {
        Self {
            inner,
            cache_dir,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// SHA-256 over model and prompt, truncated to 32 hex chars.
    fn prompt_hash(&self, prompt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.inner.model_name().as_bytes());
        hasher.update([0u8]);
        hasher.update(prompt.as_bytes());
        hex::encode(&hasher.finalize()[..16])
    }

    fn model_dir(&self) -> PathBuf {
        self.cache_dir
            .join(self.inner.provider_name())
            .join(self.inner.model_name().replace(['/', ':'], "_"))
    }

    fn entry_path(&self, prompt_hash: &str) -> PathBuf {
        self.model_dir().join(format!("{}.json", prompt_hash))
    }

    fn read_entry(&self, prompt_hash: &str) -> Option<String> {
        let content = fs::read_to_string(self.entry_path(prompt_hash)).ok()?;
        match serde_json::from_str::<CachedCompletion>(&content) {
            Ok(cached) => Some(cached.response),
            Err(e) => {
                tracing::warn!(prompt_hash, error = %e, "Ignoring corrupt LLM cache entry");
                None
            }
        }
    }

    fn write_entry(&self, prompt_hash: &str, response: &str) -> Result<(), LlmError> {
        fs::create_dir_all(self.model_dir()).map_err(|e| LlmError::CacheError(e.to_string()))?;

        let entry = CachedCompletion {
            provider: self.inner.provider_name().to_string(),
            model: self.inner.model_name().to_string(),
            prompt_hash: prompt_hash.to_string(),
            cached_at: Utc::now(),
            response: response.to_string(),
        };
        let content = serde_json::to_string_pretty(&entry)
            .map_err(|e| LlmError::CacheError(e.to_string()))?;

        fs::write(self.entry_path(prompt_hash), content)
            .map_err(|e| LlmError::CacheError(e.to_string()))
    }

    pub fn cache_stats(&self) -> CacheStats {
        let cached_responses = fs::read_dir(self.model_dir())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
                    .count()
            })
            .unwrap_or(0);

        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            cached_responses,
        }
    }
}

#[async_trait]
impl LlmProvider for CachingProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let prompt_hash = self.prompt_hash(prompt);

        if let Some(cached) = self.read_entry(&prompt_hash) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                provider = self.inner.provider_name(),
                model = self.inner.model_name(),
                prompt_hash = %prompt_hash,
                "LLM cache hit"
            );
            return Ok(cached);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            provider = self.inner.provider_name(),
            model = self.inner.model_name(),
            prompt_hash = %prompt_hash,
            "LLM cache miss, calling provider"
        );

        let response = self.inner.complete(prompt).await?;

        // Best-effort: a failed write still returns the fresh response
        if let Err(e) = self.write_entry(&prompt_hash, &response) {
            tracing::warn!(error = %e, "Failed to cache LLM response");
        }

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_second_call_is_a_hit() {
        let temp_dir = TempDir::new().unwrap();
        let fake = Box::new(FakeProvider::with_response("chicken", "1. Chicken Soup"));
        let provider = CachingProvider::new(fake, temp_dir.path().to_path_buf());

        assert_eq!(provider.complete("chicken, rice").await.unwrap(), "1. Chicken Soup");
        assert_eq!(provider.complete("chicken, rice").await.unwrap(), "1. Chicken Soup");

        assert_eq!(
            provider.cache_stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                cached_responses: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_different_prompts_different_entries() {
        let temp_dir = TempDir::new().unwrap();
        let mut fake = FakeProvider::new();
        fake.add_response("chicken", "soup");
        fake.add_response("tofu", "stir fry");

        let provider = CachingProvider::new(Box::new(fake), temp_dir.path().to_path_buf());

        provider.complete("chicken").await.unwrap();
        provider.complete("tofu").await.unwrap();

        assert_eq!(provider.cache_stats().cached_responses, 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let temp_dir = TempDir::new().unwrap();
        let provider =
            CachingProvider::new(Box::new(FakeProvider::new()), temp_dir.path().to_path_buf());

        assert!(provider.complete("anything").await.is_err());
        assert_eq!(provider.cache_stats().cached_responses, 0);
    }

    #[tokio::test]
    async fn test_cache_survives_new_wrapper() {
        let temp_dir = TempDir::new().unwrap();
        let first = CachingProvider::new(
            Box::new(FakeProvider::new().with_default_response("original")),
            temp_dir.path().to_path_buf(),
        );
        first.complete("eggs").await.unwrap();

        // Same provider/model name, different canned answer: the disk entry wins
        let second = CachingProvider::new(
            Box::new(FakeProvider::new().with_default_response("changed")),
            temp_dir.path().to_path_buf(),
        );
        assert_eq!(second.complete("eggs").await.unwrap(), "original");
    }
}
