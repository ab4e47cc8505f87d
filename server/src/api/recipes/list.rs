use super::RecipeListResponse;
use crate::access;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "The caller's recipes, newest first", body = RecipeListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<RecipeListResponse>, AppError> {
    let recipes = access::list_my_recipes(state.store.as_ref(), user.id)?;
    Ok(Json(RecipeListResponse { recipes }))
}
