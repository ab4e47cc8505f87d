//! Idea sessions group the ideas generated from one set of constraints.

pub mod active;
pub mod clear;
pub mod create;
pub mod delete;
pub mod ideas;

use crate::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/idea-sessions endpoints (mounted at /api/idea-sessions)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create::create_session))
        .route("/active", get(active::active_session))
        .route("/{id}", delete(delete::delete_session))
        .route(
            "/{id}/ideas",
            get(ideas::list_ideas).post(ideas::add_ideas),
        )
        .route("/{id}/clear", post(clear::clear_session))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_session,
        active::active_session,
        ideas::list_ideas,
        ideas::add_ideas,
        clear::clear_session,
        delete::delete_session,
    ),
    components(schemas(
        kitchen_core::records::IdeaSession,
        kitchen_core::records::RecipeIdea,
        kitchen_core::IdeaBatch,
        create::CreateSessionRequest,
        active::ActiveSessionResponse,
        ideas::IdeaListResponse,
    ))
)]
pub struct ApiDoc;
