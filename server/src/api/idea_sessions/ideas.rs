use crate::access;
use crate::api::{decode, ErrorResponse};
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use kitchen_core::records::RecipeIdea;
use kitchen_core::IdeaBatch;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IdeaListResponse {
    pub ideas: Vec<RecipeIdea>,
}

#[utoipa::path(
    get,
    path = "/api/idea-sessions/{id}/ideas",
    tag = "idea-sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Ideas in the session, newest first", body = IdeaListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_ideas(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IdeaListResponse>, AppError> {
    let ideas = access::session_ideas(state.store.as_ref(), user.id, id)?;
    Ok(Json(IdeaListResponse { ideas }))
}

#[utoipa::path(
    post,
    path = "/api/idea-sessions/{id}/ideas",
    tag = "idea-sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = IdeaBatch,
    responses(
        (status = 201, description = "Ideas stored", body = IdeaListResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_ideas(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<(StatusCode, Json<IdeaListResponse>), AppError> {
    let batch: IdeaBatch = decode(&body, "Invalid request")?;
    let ideas = access::add_ideas(state.store.as_ref(), user.id, id, batch.ideas)?;
    Ok((StatusCode::CREATED, Json(IdeaListResponse { ideas })))
}
