//! Tests for idea sessions and their ideas

mod common;

use axum_test::TestServer;
use common::{create_test_server, signup};
use serde_json::{json, Value};

fn idea(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A quick idea.",
        "keyIngredients": ["couscous"],
        "estimatedTime": 10,
        "servings": 2,
        "equipmentNeeded": ["Kettle"],
        "dietaryTags": [],
        "difficulty": "easy"
    })
}

async fn create_session(server: &TestServer, token: &str) -> String {
    let response = server
        .post("/api/idea-sessions")
        .authorization_bearer(token)
        .json(&json!({ "inputs": { "equipment": ["kettle"], "baseIngredient": "couscous" } }))
        .await;
    assert_eq!(response.status_code(), 201, "{}", response.text());
    let body: Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

async fn add_ideas(server: &TestServer, token: &str, session_id: &str, titles: &[&str]) -> Value {
    let ideas: Vec<Value> = titles.iter().map(|t| idea(t)).collect();
    let response = server
        .post(&format!("/api/idea-sessions/{}/ideas", session_id))
        .authorization_bearer(token)
        .json(&json!({ "ideas": ideas }))
        .await;
    assert_eq!(response.status_code(), 201, "{}", response.text());
    response.json()
}

async fn list_ideas(server: &TestServer, token: &str, session_id: &str) -> Vec<Value> {
    let response = server
        .get(&format!("/api/idea-sessions/{}/ideas", session_id))
        .authorization_bearer(token)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    body["ideas"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_active_session_is_null_without_sessions() {
    let server = create_test_server();
    let token = signup(&server, "alice").await;

    let response = server
        .get("/api/idea-sessions/active")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["session"].is_null());
}

#[tokio::test]
async fn test_newest_session_is_active() {
    let server = create_test_server();
    let token = signup(&server, "alice").await;

    create_session(&server, &token).await;
    let second = create_session(&server, &token).await;

    let response = server
        .get("/api/idea-sessions/active")
        .authorization_bearer(&token)
        .await;
    let body: Value = response.json();
    assert_eq!(body["session"]["id"], json!(second));
    assert_eq!(body["session"]["inputs"]["baseIngredient"], "couscous");
}

#[tokio::test]
async fn test_add_and_list_ideas() {
    let server = create_test_server();
    let token = signup(&server, "alice").await;
    let session_id = create_session(&server, &token).await;

    let added = add_ideas(&server, &token, &session_id, &["Kettle Couscous", "Noodle Pot"]).await;
    assert_eq!(added["ideas"].as_array().unwrap().len(), 2);
    assert_eq!(added["ideas"][0]["sessionId"], json!(session_id));

    let ideas = list_ideas(&server, &token, &session_id).await;
    assert_eq!(ideas.len(), 2);
    assert!(ideas.iter().all(|i| i["fullRecipe"].is_null()));
}

#[tokio::test]
async fn test_clear_session_removes_all_ideas() {
    let server = create_test_server();
    let token = signup(&server, "alice").await;
    let session_id = create_session(&server, &token).await;
    add_ideas(&server, &token, &session_id, &["A", "B", "C"]).await;

    let response = server
        .post(&format!("/api/idea-sessions/{}/clear", session_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 204);

    assert!(list_ideas(&server, &token, &session_id).await.is_empty());

    // The session itself survives
    let response = server
        .get("/api/idea-sessions/active")
        .authorization_bearer(&token)
        .await;
    let body: Value = response.json();
    assert_eq!(body["session"]["id"], json!(session_id));
}

#[tokio::test]
async fn test_delete_session_removes_ideas() {
    let server = create_test_server();
    let token = signup(&server, "alice").await;
    let session_id = create_session(&server, &token).await;
    let added = add_ideas(&server, &token, &session_id, &["A"]).await;
    let idea_id = added["ideas"][0]["id"].as_str().unwrap().to_string();

    let response = server
        .delete(&format!("/api/idea-sessions/{}", session_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 204);

    let response = server
        .get(&format!("/api/ideas/{}", idea_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 404);

    let response = server
        .get(&format!("/api/idea-sessions/{}/ideas", session_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_attach_full_recipe() {
    let server = create_test_server();
    let token = signup(&server, "alice").await;
    let session_id = create_session(&server, &token).await;
    let added = add_ideas(&server, &token, &session_id, &["Kettle Couscous"]).await;
    let idea_id = added["ideas"][0]["id"].as_str().unwrap().to_string();

    let full_recipe = json!({
        "shopping": { "have": ["couscous"], "need": ["tomato"], "optional": [] },
        "prepGroup": ["Dice the tomato"],
        "steps": [{ "title": "Soak", "detail": "Soak the couscous.", "time_minutes": 5 }],
        "substitutions": [],
        "tips": []
    });

    let response = server
        .put(&format!("/api/ideas/{}/full-recipe", idea_id))
        .authorization_bearer(&token)
        .json(&json!({ "fullRecipe": full_recipe }))
        .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());

    let response = server
        .get(&format!("/api/ideas/{}", idea_id))
        .authorization_bearer(&token)
        .await;
    let body: Value = response.json();
    assert_eq!(body["fullRecipe"], full_recipe);
    assert_eq!(body["title"], "Kettle Couscous");
}

#[tokio::test]
async fn test_full_recipe_needs_steps() {
    let server = create_test_server();
    let token = signup(&server, "alice").await;
    let session_id = create_session(&server, &token).await;
    let added = add_ideas(&server, &token, &session_id, &["A"]).await;
    let idea_id = added["ideas"][0]["id"].as_str().unwrap().to_string();

    let response = server
        .put(&format!("/api/ideas/{}/full-recipe", idea_id))
        .authorization_bearer(&token)
        .json(&json!({ "fullRecipe": {
            "shopping": { "have": [], "need": [], "optional": [] },
            "prepGroup": [],
            "steps": [],
            "substitutions": [],
            "tips": []
        } }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_sessions_are_private() {
    let server = create_test_server();
    let owner = signup(&server, "owner").await;
    let other = signup(&server, "other").await;
    let session_id = create_session(&server, &owner).await;
    let added = add_ideas(&server, &owner, &session_id, &["A"]).await;
    let idea_id = added["ideas"][0]["id"].as_str().unwrap().to_string();

    let response = server
        .get(&format!("/api/idea-sessions/{}/ideas", session_id))
        .authorization_bearer(&other)
        .await;
    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "Session not found");

    let response = server
        .post(&format!("/api/idea-sessions/{}/clear", session_id))
        .authorization_bearer(&other)
        .await;
    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "Session not found");

    let response = server
        .delete(&format!("/api/idea-sessions/{}", session_id))
        .authorization_bearer(&other)
        .await;
    assert_eq!(response.status_code(), 404);

    let response = server
        .post(&format!("/api/idea-sessions/{}/ideas", session_id))
        .authorization_bearer(&other)
        .json(&json!({ "ideas": [] }))
        .await;
    assert_eq!(response.status_code(), 404);

    let response = server
        .put(&format!("/api/ideas/{}/full-recipe", idea_id))
        .authorization_bearer(&other)
        .json(&json!({ "fullRecipe": {
            "shopping": { "have": [], "need": [], "optional": [] },
            "prepGroup": [],
            "steps": [{ "title": "Boil", "detail": "Boil the kettle.", "time_minutes": 3 }],
            "substitutions": [],
            "tips": []
        } }))
        .await;
    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "Idea not found");

    let response = server
        .get(&format!("/api/ideas/{}", idea_id))
        .authorization_bearer(&other)
        .await;
    assert_eq!(response.status_code(), 404);

    // Nothing was removed
    assert_eq!(list_ideas(&server, &owner, &session_id).await.len(), 1);

    // The other user has no active session
    let response = server
        .get("/api/idea-sessions/active")
        .authorization_bearer(&other)
        .await;
    let body: Value = response.json();
    assert!(body["session"].is_null());
}
