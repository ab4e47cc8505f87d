use crate::access;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

/// Delete every idea in the session but keep the session.
#[utoipa::path(
    post,
    path = "/api/idea-sessions/{id}/clear",
    tag = "idea-sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 204, description = "Ideas removed"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn clear_session(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    access::clear_session(state.store.as_ref(), user.id, id)?;
    Ok(StatusCode::NO_CONTENT)
}
