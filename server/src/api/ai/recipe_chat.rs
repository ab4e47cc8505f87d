use crate::api::ai::{INVALID_INPUT, SIGN_IN_REQUIRED};
use crate::api::{decode, ErrorResponse};
use crate::auth::MaybeAuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use futures::TryStreamExt;
use kitchen_core::ai::chat_stream;
use kitchen_core::forms::RecipeChatRequest;

/// Streams the assistant reply as plain text chunks. A reply that ends with
/// `[RECIPE_UPDATE_AVAILABLE]` tells the client it can offer
/// `/api/ai/update-recipe`.
#[utoipa::path(
    post,
    path = "/api/ai/recipe-chat",
    tag = "ai",
    request_body = RecipeChatRequest,
    responses(
        (status = 200, description = "Streamed assistant reply", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid input data", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "AI provider failed", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn recipe_chat(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    body: Bytes,
) -> Result<Response, AppError> {
    let user = user.ok_or(AppError::Unauthorized(SIGN_IN_REQUIRED))?;
    let request: RecipeChatRequest = decode(&body, INVALID_INPUT)?;

    let stream = chat_stream(state.ai.as_ref(), &request)
        .await
        .map_err(AppError::Upstream)?;

    tracing::debug!(user_id = %user.id, turns = request.messages.len(), "Streaming chat reply");

    // Headers are already sent once streaming starts, so mid-stream failures
    // can only be logged.
    let stream = stream.inspect_err(|e| tracing::error!(error = %e, "Chat stream failed"));

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(stream),
    )
        .into_response())
}
