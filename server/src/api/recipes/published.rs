use super::RecipeListResponse;
use crate::access;
use crate::error::AppError;
use crate::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    get,
    path = "/api/recipes/published",
    tag = "recipes",
    responses(
        (status = 200, description = "Published recipes, most recently published first", body = RecipeListResponse)
    )
)]
pub async fn list_published(
    State(state): State<AppState>,
) -> Result<Json<RecipeListResponse>, AppError> {
    let recipes = access::list_published_recipes(state.store.as_ref())?;
    Ok(Json(RecipeListResponse { recipes }))
}
