//! Common test utilities for server integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use kitchen_core::ai::FakeAiClient;
use kitchen_server::config::ServerConfig;
use kitchen_server::store::InMemoryStore;
use kitchen_server::{create_router, AppContext};
use serde_json::{json, Value};

pub const SITE_URL: &str = "https://kitchen.example";

/// Create a test server with the canned AI responses
pub fn create_test_server() -> TestServer {
    create_test_server_with_ai(FakeAiClient::with_sample_responses())
}

/// Create a test server backed by the given fake AI client
pub fn create_test_server_with_ai(ai: FakeAiClient) -> TestServer {
    // Default Argon2 params make every signup take seconds in debug builds.
    std::env::set_var("INSECURE_PASSWORD_HASHING", "1");

    let state = Arc::new(AppContext {
        store: Arc::new(InMemoryStore::new()),
        ai: Arc::new(ai),
        config: ServerConfig {
            site_url: SITE_URL.to_string(),
            ..Default::default()
        },
    });

    TestServer::new(create_router(state)).expect("Failed to create test server")
}

/// Sign up a user and return their bearer token
pub async fn signup(server: &TestServer, username: &str) -> String {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({ "username": username, "password": "correct horse" }))
        .await;
    assert_eq!(response.status_code(), 201, "signup failed: {}", response.text());

    let body: Value = response.json();
    body["token"]
        .as_str()
        .expect("signup response has no token")
        .to_string()
}

/// Save a recipe body (as the client would after generating one) and return
/// the stored record
pub async fn save_recipe(server: &TestServer, token: &str, title: &str) -> Value {
    let response = server
        .post("/api/recipes")
        .authorization_bearer(token)
        .json(&recipe_body(title))
        .await;
    assert_eq!(response.status_code(), 201, "save failed: {}", response.text());
    response.json()
}

pub fn recipe_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A one-pan fried rice.",
        "inputs": {
            "equipment": ["hob"],
            "ingredients": ["rice", "eggs"],
            "servings": 2,
            "maxTime": 20
        },
        "prepTime": 0,
        "cookTime": 15,
        "servings": 2,
        "equipmentUsed": ["Hob / Stovetop"],
        "shoppingList": {
            "have": ["rice", "eggs"],
            "need": ["soy sauce"],
            "optional": []
        },
        "prepGroup": [{ "task": "Beat the eggs", "ingredients": ["eggs"] }],
        "steps": [
            { "number": 1, "instruction": "Scramble: Scramble the eggs.", "duration": 3 },
            { "number": 2, "instruction": "Fry: Fry the rice.", "duration": 5, "equipment": "Hob / Stovetop" }
        ],
        "substitutions": [
            { "original": "soy sauce", "substitute": "salt, fish sauce" }
        ],
        "tips": ["Day-old rice fries best"]
    })
}

/// The hob-only form used across generation tests
pub fn hob_form() -> Value {
    json!({
        "equipment": ["hob"],
        "ingredientsHave": ["rice", "eggs"],
        "servings": 2,
        "timeLimit": 20
    })
}
