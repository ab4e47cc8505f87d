use crate::api::ai::{INVALID_INPUT, SIGN_IN_REQUIRED};
use crate::api::{decode, ErrorResponse};
use crate::auth::MaybeAuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{body::Bytes, extract::State, Json};
use kitchen_core::ai::expand_idea as expand;
use kitchen_core::forms::ExpandIdeaRequest;
use kitchen_core::FullRecipe;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpandIdeaResponse {
    pub full_recipe: FullRecipe,
}

#[utoipa::path(
    post,
    path = "/api/ai/expand-idea",
    tag = "ai",
    request_body = ExpandIdeaRequest,
    responses(
        (status = 200, description = "The expanded recipe", body = ExpandIdeaResponse),
        (status = 400, description = "Invalid input data", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Model output was unusable or the AI provider failed", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn expand_idea(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    body: Bytes,
) -> Result<Json<ExpandIdeaResponse>, AppError> {
    let user = user.ok_or(AppError::Unauthorized(SIGN_IN_REQUIRED))?;
    let request: ExpandIdeaRequest = decode(&body, INVALID_INPUT)?;

    let full_recipe = expand(state.ai.as_ref(), &request).await.map_err(|e| {
        AppError::generation(
            e,
            "Failed to parse recipe response. Please try again.",
            "Generated recipe has invalid structure. Please try again.",
        )
    })?;

    tracing::info!(user_id = %user.id, idea = %request.idea.title, "Expanded idea");

    Ok(Json(ExpandIdeaResponse { full_recipe }))
}
