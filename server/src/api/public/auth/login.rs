use crate::api::{decode, ErrorResponse};
use crate::auth::{create_session, verify_password};
use crate::error::AppError;
use crate::AppState;
use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body(content = LoginRequest, example = json!({"username": "user", "password": "password"})),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoginResponse>, AppError> {
    let req: LoginRequest = decode(&body, "Invalid login data")?;
    let user = state
        .store
        .find_user_by_username(&req.username)?
        .filter(|user| verify_password(&req.password, &user.password_hash))
        .ok_or(AppError::Unauthorized("Invalid credentials"))?;

    let token = create_session(state.store.as_ref(), user.id)?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse { token }))
}
