use crate::api::{decode, ErrorResponse};
use crate::auth::{create_session, hash_password};
use crate::error::AppError;
use crate::store::StoreError;
use crate::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(
        length(max = 255, message = "Username must be at most 255 characters"),
        custom(function = "not_blank")
    )]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Username is required".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body(content = SignupRequest, example = json!({"username": "user", "password": "password"})),
    responses(
        (status = 201, description = "User created successfully", body = SignupResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let req: SignupRequest = decode(&body, "Invalid signup data")?;
    let username = req.username.trim();

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::internal("Failed to hash password", e))?;

    let user = match state.store.create_user(username, &password_hash) {
        Ok(user) => user,
        Err(StoreError::UsernameTaken) => {
            return Err(AppError::Conflict("Username already exists"))
        }
        Err(e) => return Err(e.into()),
    };

    let token = create_session(state.store.as_ref(), user.id)?;
    tracing::info!(user_id = %user.id, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user_id: user.id,
            token,
        }),
    ))
}
