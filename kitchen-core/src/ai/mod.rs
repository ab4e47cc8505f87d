//! AI client and recipe generation.
//!
//! This module provides:
//! - `AiClient` trait for abstracting AI providers
//! - `CachingAiClient` for any OpenAI-compatible API, with an optional disk cache
//! - `FakeAiClient` for tests and offline development
//! - Prompt templates and the generation operations built on them
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `OPENAI_API_KEY` (required): API key
//! - `KITCHEN_AI_MODEL` (optional): Model name, e.g., "gpt-4o-mini"
//! - `KITCHEN_AI_BASE_URL` (optional): API base URL
//! - `KITCHEN_AI_CACHE_DIR` (optional): Enables the response cache
//! - `KITCHEN_AI_OFFLINE` (optional): Set to "true" to use cache only
//! - `KITCHEN_AI_RATE_LIMIT_MS` (optional): Delay between requests in ms
//!
//! # Example
//!
//! ```ignore
//! use kitchen_core::ai::{generate_recipe, CachingAiClient};
//!
//! let client = CachingAiClient::from_env()?;
//! let recipe = generate_recipe(&client, &form).await?;
//! println!("{}", recipe.title);
//! ```

mod cache;
mod client;
mod config;
pub mod fake;
mod generate;
pub mod prompts;
mod types;

pub use cache::{AiCache, CacheKey, CachedAiResponse};
pub use client::{AiClient, AiError, CachingAiClient};
pub use config::{AiConfig, ConfigError};
pub use fake::FakeAiClient;
pub use generate::{
    chat_stream, expand_idea, generate_ideas, generate_recipe, update_recipe, GenerationError,
};
pub use prompts::chat::{has_update_marker, strip_update_marker, UPDATE_MARKER};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role, TextStream, Usage};
