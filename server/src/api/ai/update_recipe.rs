use crate::api::ai::{INVALID_INPUT, SIGN_IN_REQUIRED};
use crate::api::{decode, ErrorResponse};
use crate::auth::MaybeAuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{body::Bytes, extract::State, Json};
use kitchen_core::ai::update_recipe as regenerate;
use kitchen_core::forms::UpdateRecipeRequest;
use kitchen_core::GeneratedRecipe;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpdateRecipeResponse {
    pub recipe: GeneratedRecipe,
}

#[utoipa::path(
    post,
    path = "/api/ai/update-recipe",
    tag = "ai",
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "The regenerated recipe", body = UpdateRecipeResponse),
        (status = 400, description = "Invalid input data", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Model output was unusable or the AI provider failed", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    body: Bytes,
) -> Result<Json<UpdateRecipeResponse>, AppError> {
    let user = user.ok_or(AppError::Unauthorized(SIGN_IN_REQUIRED))?;
    let request: UpdateRecipeRequest = decode(&body, INVALID_INPUT)?;

    let recipe = regenerate(state.ai.as_ref(), &request).await.map_err(|e| {
        AppError::generation(
            e,
            "Failed to parse recipe response. Please try again.",
            "Generated recipe has invalid structure. Please try again.",
        )
    })?;

    tracing::info!(
        user_id = %user.id,
        turns = request.messages.len(),
        title = %recipe.title,
        "Updated recipe from chat"
    );

    Ok(Json(UpdateRecipeResponse { recipe }))
}
