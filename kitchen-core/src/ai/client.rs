//! AI client backed by any OpenAI-compatible chat completions API.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::cache::{AiCache, CacheKey};
use super::config::AiConfig;
use super::types::{ChatMessage, ChatRequest, ChatResponse, Role, TextStream, Usage};

#[derive(Error, Debug)]
pub enum AiError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Response not in cache and offline mode is enabled")]
    OfflineNotCached,

    #[error("Configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

/// Trait for AI clients.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Complete a chat request.
    ///
    /// The `prompt_name` is used for cache organization and logging.
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError>;

    /// Stream the completion text chunk by chunk. Streams are never cached.
    async fn stream(&self, prompt_name: &str, request: ChatRequest)
        -> Result<TextStream, AiError>;
}

/// AI client with optional disk caching and rate limiting.
pub struct CachingAiClient {
    client: Client<OpenAIConfig>,
    cache: Option<AiCache>,
    config: AiConfig,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl CachingAiClient {
    /// Create a new client from environment configuration.
    pub fn from_env() -> Result<Self, AiError> {
        let config = AiConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Create a new client with the given configuration.
    pub fn new(config: AiConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.base_url);

        let client = Client::with_config(openai_config);
        let cache = config.cache_dir.clone().map(AiCache::new);

        Self {
            client,
            cache,
            config,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Apply rate limiting between requests.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            let min_interval = Duration::from_millis(self.config.rate_limit_ms);

            if elapsed < min_interval {
                tokio::time::sleep(min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// Convert our ChatMessage to async-openai's format.
    fn to_openai_message(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, AiError> {
        match msg.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::Api(format!("Failed to build system message: {}", e))),
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::Api(format!("Failed to build user message: {}", e))),
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::Api(format!("Failed to build assistant message: {}", e))),
        }
    }

    fn build_request(
        &self,
        request: &ChatRequest,
        stream: bool,
    ) -> Result<CreateChatCompletionRequest, AiError> {
        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(Self::to_openai_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut req_builder = CreateChatCompletionRequestArgs::default();
        req_builder.model(&self.config.model).messages(messages);

        if let Some(max_tokens) = request.max_tokens {
            req_builder.max_completion_tokens(max_tokens);
        }

        if let Some(temperature) = request.temperature {
            req_builder.temperature(temperature);
        }

        if request.json_response {
            req_builder.response_format(ResponseFormat::JsonObject);
        }

        if stream {
            req_builder.stream(true);
        }

        req_builder.build().map_err(|e| AiError::Api(e.to_string()))
    }
}

#[async_trait]
impl AiClient for CachingAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        let cache_key = CacheKey::new(prompt_name, &self.config.model, &request.messages);

        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(&cache_key)) {
            tracing::debug!(prompt_name = prompt_name, "AI response found in cache");
            return Ok(cached.into());
        }

        if self.config.offline {
            return Err(AiError::OfflineNotCached);
        }

        self.rate_limit().await;

        let openai_request = self.build_request(&request, false)?;

        tracing::debug!(
            prompt_name = prompt_name,
            model = &self.config.model,
            "Calling AI API"
        );

        let response = self
            .client
            .chat()
            .create(openai_request)
            .await
            .map_err(|e| AiError::Api(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let usage = response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        let chat_response = ChatResponse {
            content,
            usage,
            cached: false,
        };

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(&cache_key, &chat_response, &self.config.model) {
                tracing::warn!("Failed to cache AI response: {}", e);
            }
        }

        Ok(chat_response)
    }

    async fn stream(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<TextStream, AiError> {
        if self.config.offline {
            return Err(AiError::OfflineNotCached);
        }

        self.rate_limit().await;

        let openai_request = self.build_request(&request, true)?;

        tracing::debug!(
            prompt_name = prompt_name,
            model = &self.config.model,
            "Streaming from AI API"
        );

        let upstream = self
            .client
            .chat()
            .create_stream(openai_request)
            .await
            .map_err(|e| AiError::Api(e.to_string()))?;

        let chunks = upstream.filter_map(|item| async move {
            match item {
                Ok(response) => response
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.delta.content)
                    .filter(|text| !text.is_empty())
                    .map(Ok),
                Err(e) => Some(Err(AiError::Api(e.to_string()))),
            }
        });

        Ok(Box::pin(chunks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config() -> AiConfig {
        AiConfig {
            api_key: "test".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            cache_dir: Some(std::env::temp_dir().join("kitchen-ai-client-test")),
            offline: true,
            rate_limit_ms: 0,
        }
    }

    #[tokio::test]
    async fn test_offline_miss_is_an_error() {
        let client = CachingAiClient::new(offline_config());
        let request = ChatRequest::with_system("system", "never cached");

        let err = client.complete("test", request).await.unwrap_err();
        assert!(matches!(err, AiError::OfflineNotCached));
    }

    #[tokio::test]
    async fn test_offline_stream_is_an_error() {
        let client = CachingAiClient::new(offline_config());
        let request = ChatRequest::with_system("system", "hello");

        assert!(matches!(
            client.stream("test", request).await,
            Err(AiError::OfflineNotCached)
        ));
    }

    #[test]
    fn test_build_request_sets_json_format() {
        let client = CachingAiClient::new(offline_config());
        let request = ChatRequest {
            json_response: true,
            ..ChatRequest::with_system("system", "user")
        };

        let built = client.build_request(&request, false).unwrap();
        assert_eq!(built.messages.len(), 2);
        assert!(built.response_format.is_some());
        assert_eq!(built.model, "gpt-4o-mini");
    }
}
