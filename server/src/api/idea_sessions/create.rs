use crate::access;
use crate::api::{decode, ErrorResponse};
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use kitchen_core::forms::SessionInputs;
use kitchen_core::records::IdeaSession;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSessionRequest {
    pub inputs: SessionInputs,
}

#[utoipa::path(
    post,
    path = "/api/idea-sessions",
    tag = "idea-sessions",
    request_body(content = CreateSessionRequest, example = json!({
        "inputs": {"equipment": ["kettle"], "baseIngredient": "couscous"}
    })),
    responses(
        (status = 201, description = "Session created; it is now the active one", body = IdeaSession),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_session(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<IdeaSession>), AppError> {
    let request: CreateSessionRequest = decode(&body, "Invalid request")?;
    let session = access::create_session(state.store.as_ref(), user.id, request.inputs)?;
    Ok((StatusCode::CREATED, Json(session)))
}
