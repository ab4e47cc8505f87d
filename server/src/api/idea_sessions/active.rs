use crate::access;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{extract::State, Json};
use kitchen_core::records::IdeaSession;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActiveSessionResponse {
    /// `null` when the user has never started a session.
    pub session: Option<IdeaSession>,
}

#[utoipa::path(
    get,
    path = "/api/idea-sessions/active",
    tag = "idea-sessions",
    responses(
        (status = 200, description = "The most recently created session", body = ActiveSessionResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn active_session(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ActiveSessionResponse>, AppError> {
    let session = access::active_session(state.store.as_ref(), user.id)?;
    Ok(Json(ActiveSessionResponse { session }))
}
