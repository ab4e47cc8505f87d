use crate::api::{decode, ErrorResponse};
use crate::auth::MaybeAuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{body::Bytes, extract::State, Json};
use kitchen_core::ai::generate_recipe;
use kitchen_core::forms::RecipeForm;
use kitchen_core::GeneratedRecipe;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NewRecipeResponse {
    pub recipe: GeneratedRecipe,
    /// The validated form, with defaults applied.
    pub inputs: RecipeForm,
}

#[utoipa::path(
    post,
    path = "/api/ai/new-recipe",
    tag = "ai",
    request_body(content = RecipeForm, example = json!({
        "equipment": ["hob"],
        "ingredientsHave": ["rice", "eggs"],
        "servings": 2,
        "timeLimit": 20
    })),
    responses(
        (status = 200, description = "Generated recipe", body = NewRecipeResponse),
        (status = 400, description = "Invalid form data", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Model output was unusable or the AI provider failed", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn new_recipe(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    body: Bytes,
) -> Result<Json<NewRecipeResponse>, AppError> {
    let user = user.ok_or(AppError::Unauthorized(
        "You must be signed in to generate recipes",
    ))?;
    let form: RecipeForm = decode(&body, "Invalid form data")?;

    let recipe = generate_recipe(state.ai.as_ref(), &form)
        .await
        .map_err(|e| {
            AppError::generation(
                e,
                "Failed to parse recipe response. Please try again.",
                "Generated recipe has invalid structure. Please try again.",
            )
        })?;

    tracing::info!(
        user_id = %user.id,
        title = %recipe.title,
        steps = recipe.steps.len(),
        "Generated recipe"
    );

    Ok(Json(NewRecipeResponse {
        recipe,
        inputs: form,
    }))
}
