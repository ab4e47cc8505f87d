//! Disk-based AI response cache.
//!
//! Only used when a cache directory is configured. Entries are keyed by
//! prompt name, model and a hash of the full message list, so any change to
//! a prompt template produces a new key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;

use super::types::{ChatMessage, ChatResponse, Usage};

/// Disk-based AI response cache.
pub struct AiCache {
    cache_dir: PathBuf,
}

/// Metadata for a cached response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedAiResponse {
    pub content: String,
    pub usage: Usage,
    pub cached_at: DateTime<Utc>,
    pub model: String,
}

impl From<CachedAiResponse> for ChatResponse {
    fn from(cached: CachedAiResponse) -> Self {
        Self {
            content: cached.content,
            usage: cached.usage,
            cached: true,
        }
    }
}

/// Cache key components.
#[derive(Debug, Clone)]
pub struct CacheKey {
    pub prompt_name: String,
    pub model: String,
    pub input_hash: String,
}

impl CacheKey {
    pub fn new(prompt_name: &str, model: &str, messages: &[ChatMessage]) -> Self {
        let input_json = serde_json::to_string(messages).unwrap_or_default();

        Self {
            prompt_name: prompt_name.to_string(),
            model: model.to_string(),
            input_hash: sha256_hex(&input_json),
        }
    }

    /// Path relative to the cache directory:
    /// `{prompt_name}/{model_safe}/{hash[0:2]}/{hash}.json`
    pub fn to_path(&self) -> PathBuf {
        // "openai/gpt-4o-mini" -> "openai--gpt-4o-mini"
        let model_safe = self.model.replace('/', "--");

        PathBuf::new()
            .join(&self.prompt_name)
            .join(&model_safe)
            .join(&self.input_hash[..2])
            .join(format!("{}.json", &self.input_hash))
    }
}

impl AiCache {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Get a cached response if it exists.
    pub fn get(&self, key: &CacheKey) -> Option<CachedAiResponse> {
        let path = self.cache_dir.join(key.to_path());
        let content = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Store a response in the cache.
    pub fn put(&self, key: &CacheKey, response: &ChatResponse, model: &str) -> std::io::Result<()> {
        let path = self.cache_dir.join(key.to_path());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let cached = CachedAiResponse {
            content: response.content.clone(),
            usage: response.usage.clone(),
            cached_at: Utc::now(),
            model: model.to_string(),
        };

        let json = serde_json::to_string_pretty(&cached)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(&path, json)
    }
}

fn sha256_hex(input: &str) -> String {
    Sha256::digest(input.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_path() {
        let key = CacheKey::new("new_recipe", "openai/gpt-4o-mini", &[ChatMessage::user("test")]);

        let path = key.to_path();
        assert!(path.starts_with("new_recipe/openai--gpt-4o-mini/"));
        assert!(path.to_string_lossy().ends_with(".json"));
    }

    #[test]
    fn test_cache_key_changes_with_messages() {
        let a = CacheKey::new("chat", "m", &[ChatMessage::user("one")]);
        let b = CacheKey::new("chat", "m", &[ChatMessage::user("two")]);
        assert_ne!(a.input_hash, b.input_hash);
    }

    #[test]
    fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AiCache::new(dir.path().to_path_buf());
        let key = CacheKey::new("ideas", "gpt-4o-mini", &[ChatMessage::user("hi")]);

        assert!(cache.get(&key).is_none());

        let response = ChatResponse {
            content: "{\"ideas\": []}".to_string(),
            usage: Usage::default(),
            cached: false,
        };
        cache.put(&key, &response, "gpt-4o-mini").unwrap();

        let hit: ChatResponse = cache.get(&key).unwrap().into();
        assert_eq!(hit.content, "{\"ideas\": []}");
        assert!(hit.cached);
    }
}
