use crate::api::ai::{INVALID_INPUT, SIGN_IN_REQUIRED};
use crate::api::{decode, ErrorResponse};
use crate::auth::MaybeAuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{body::Bytes, extract::State, Json};
use kitchen_core::ai::generate_ideas as generate;
use kitchen_core::forms::IdeasRequest;
use kitchen_core::RecipeIdeaPreview;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerateIdeasResponse {
    pub ideas: Vec<RecipeIdeaPreview>,
}

#[utoipa::path(
    post,
    path = "/api/ai/generate-ideas",
    tag = "ai",
    request_body(content = IdeasRequest, example = json!({
        "equipment": ["kettle", "microwave"],
        "baseIngredient": "couscous",
        "existingTitles": ["Fried Rice"]
    })),
    responses(
        (status = 200, description = "A batch of idea previews", body = GenerateIdeasResponse),
        (status = 400, description = "Invalid input data", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Model output was unusable or the AI provider failed", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn generate_ideas(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    body: Bytes,
) -> Result<Json<GenerateIdeasResponse>, AppError> {
    let user = user.ok_or(AppError::Unauthorized(SIGN_IN_REQUIRED))?;
    let request: IdeasRequest = decode(&body, INVALID_INPUT)?;

    let ideas = generate(state.ai.as_ref(), &request).await.map_err(|e| {
        AppError::generation(
            e,
            "Failed to parse response. Please try again.",
            "Generated ideas have invalid structure. Please try again.",
        )
    })?;

    tracing::info!(user_id = %user.id, count = ideas.len(), "Generated ideas");

    Ok(Json(GenerateIdeasResponse { ideas }))
}
