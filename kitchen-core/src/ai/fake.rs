//! Fake AI client for tests and offline development.
//!
//! Responses are matched by checking if any message in the request contains a
//! registered substring. No network access, no API costs.

use async_trait::async_trait;
use futures::stream;
use std::sync::{Mutex, PoisonError, RwLock};

use super::client::{AiClient, AiError};
use super::types::{ChatRequest, ChatResponse, TextStream, Usage};

/// A fake AI client.
///
/// Patterns are checked in registration order, case-insensitively. If no
/// pattern matches, the default response is returned, or an error when there
/// is none.
#[derive(Debug, Default)]
pub struct FakeAiClient {
    responses: RwLock<Vec<(String, String)>>,
    default_response: Option<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A request seen by the fake client.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub prompt_name: String,
    pub request: ChatRequest,
}

impl FakeAiClient {
    /// Create a FakeAiClient with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a FakeAiClient that returns `response` for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let client = Self::new();
        client.add_response(prompt_contains, response);
        client
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((prompt_contains.to_lowercase(), response.to_string()));
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Canned, valid responses for every generation prompt.
    pub fn with_sample_responses() -> Self {
        let client = Self::new();
        // The chat prompt also mentions regenerating, so it goes first.
        client.add_response("cooking assistant", SAMPLE_CHAT_REPLY);
        client.add_response("Create one recipe", SAMPLE_RECIPE);
        client.add_response("regenerate the recipe", SAMPLE_UPDATED_RECIPE);
        client.add_response("diverse recipe ideas", SAMPLE_IDEAS);
        client.add_response("RECIPE TO EXPAND", SAMPLE_FULL_RECIPE);
        client
    }

    /// Every request seen so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn respond(&self, prompt_name: &str, request: ChatRequest) -> Result<String, AiError> {
        let prompt = request
            .messages
            .iter()
            .map(|m| m.content.to_lowercase())
            .collect::<Vec<_>>()
            .join("\n");

        let matched = self
            .responses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(pattern, _)| prompt.contains(pattern.as_str()))
            .map(|(_, response)| response.clone());

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                prompt_name: prompt_name.to_string(),
                request,
            });

        matched
            .or_else(|| self.default_response.clone())
            .ok_or_else(|| {
                AiError::Api(format!(
                    "FakeAiClient: No response configured for prompt {}",
                    prompt_name
                ))
            })
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        let content = self.respond(prompt_name, request)?;
        Ok(ChatResponse {
            content,
            usage: Usage::default(),
            cached: false,
        })
    }

    async fn stream(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<TextStream, AiError> {
        let content = self.respond(prompt_name, request)?;
        let chunks: Vec<Result<String, AiError>> = content
            .split_inclusive(' ')
            .map(|word| Ok(word.to_string()))
            .collect();
        Ok(Box::pin(stream::iter(chunks)))
    }
}

pub const SAMPLE_RECIPE: &str = r#"```json
{
  "title": "Hostel Egg Fried Rice",
  "summary": "A one-pan fried rice using leftover rice and eggs.",
  "assumptions": ["Rice is already cooked"],
  "servings": 2,
  "time_minutes": 15,
  "equipment_used": ["Hob / Stovetop"],
  "shopping": {"have": ["rice", "eggs"], "need": ["spring onion", "soy sauce"], "optional": ["chilli flakes"]},
  "prep_group": ["Beat the eggs", "Slice the spring onion"],
  "steps": [
    {"title": "Scramble", "detail": "Scramble the eggs in an oiled pan and set aside.", "time_minutes": 3},
    {"title": "Fry rice", "detail": "Fry the rice until hot, about 5 minutes.", "time_minutes": 5},
    {"title": "Combine", "detail": "Return the eggs, add soy sauce and spring onion.", "time_minutes": 2}
  ],
  "substitutions": [{"ingredient": "soy sauce", "swap_options": ["salt", "fish sauce"]}],
  "diet_notes": ["Vegetarian"]
}
```"#;

pub const SAMPLE_UPDATED_RECIPE: &str = r#"{
  "title": "Spicy Hostel Egg Fried Rice",
  "summary": "The same one-pan fried rice with a chilli kick.",
  "assumptions": ["Rice is already cooked"],
  "servings": 2,
  "time_minutes": 15,
  "equipment_used": ["Hob / Stovetop"],
  "shopping": {"have": ["rice", "eggs"], "need": ["spring onion", "soy sauce", "chilli flakes"], "optional": []},
  "prep_group": ["Beat the eggs"],
  "steps": [
    {"title": "Scramble", "detail": "Scramble the eggs and set aside.", "time_minutes": 3},
    {"title": "Fry rice", "detail": "Fry the rice with chilli flakes.", "time_minutes": 5},
    {"title": "Combine", "detail": "Return the eggs and season.", "time_minutes": 2}
  ],
  "substitutions": [],
  "diet_notes": []
}"#;

pub const SAMPLE_IDEAS: &str = r#"{
  "ideas": [
    {
      "title": "Kettle Couscous Bowl",
      "description": "Fluffy couscous soaked with boiling water, tossed with vegetables.",
      "keyIngredients": ["couscous", "tomato", "cucumber", "olive oil"],
      "estimatedTime": 10,
      "servings": 2,
      "equipmentNeeded": ["Kettle"],
      "dietaryTags": ["vegetarian"],
      "difficulty": "easy"
    },
    {
      "title": "One-Pan Chickpea Curry",
      "description": "A quick curry from canned chickpeas and tomatoes.",
      "keyIngredients": ["chickpeas", "canned tomatoes", "onion", "curry powder"],
      "estimatedTime": 25,
      "servings": 2,
      "equipmentNeeded": ["Hob / Stovetop"],
      "dietaryTags": ["vegan"],
      "difficulty": "medium"
    }
  ]
}"#;

pub const SAMPLE_FULL_RECIPE: &str = r#"{
  "shopping": {"have": ["couscous"], "need": ["tomato", "cucumber"], "optional": ["feta"]},
  "prepGroup": ["Dice the tomato", "Dice the cucumber"],
  "steps": [
    {"title": "Soak", "detail": "Pour boiling water over the couscous and cover.", "time_minutes": 5},
    {"title": "Toss", "detail": "Fluff and toss with the vegetables and oil.", "time_minutes": 2}
  ],
  "substitutions": [{"ingredient": "couscous", "swap_options": ["instant noodles"]}],
  "tips": ["A mug works as a measuring cup"]
}"#;

pub const SAMPLE_CHAT_REPLY: &str =
    "You could add chilli flakes with the rice for some heat. [RECIPE_UPDATE_AVAILABLE]";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatMessage;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_matches_substring_case_insensitively() {
        let client = FakeAiClient::with_response("Fried Rice", "ok");
        let request = ChatRequest::with_system("system", "make some fried rice");

        let response = client.complete("test", request).await.unwrap();
        assert_eq!(response.content, "ok");
    }

    #[tokio::test]
    async fn test_unmatched_without_default_is_an_error() {
        let client = FakeAiClient::new();
        let request = ChatRequest::with_system("system", "anything");

        assert!(client.complete("test", request).await.is_err());
    }

    #[tokio::test]
    async fn test_default_response() {
        let client = FakeAiClient::new().with_default_response("{}");
        let request = ChatRequest::with_system("system", "anything");

        assert_eq!(client.complete("test", request).await.unwrap().content, "{}");
    }

    #[tokio::test]
    async fn test_records_requests() {
        let client = FakeAiClient::new().with_default_response("{}");
        let request = ChatRequest {
            messages: vec![ChatMessage::user("hello")],
            ..Default::default()
        };
        client.complete("greeting", request).await.unwrap();

        let seen = client.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].prompt_name, "greeting");
        assert_eq!(seen[0].request.messages[0].content, "hello");
    }

    #[tokio::test]
    async fn test_stream_reassembles_to_response() {
        let client = FakeAiClient::with_response("cooking assistant", SAMPLE_CHAT_REPLY);
        let request = ChatRequest::with_system("You are a helpful cooking assistant.", "hi");

        let chunks: Vec<String> = client
            .stream("chat", request)
            .await
            .unwrap()
            .map(|c| c.unwrap())
            .collect()
            .await;

        assert!(chunks.len() > 1);
        assert_eq!(chunks.concat(), SAMPLE_CHAT_REPLY);
    }
}
