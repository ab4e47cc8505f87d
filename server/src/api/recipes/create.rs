use crate::access;
use crate::api::{decode, ErrorResponse};
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use kitchen_core::records::{NewRecipe, Recipe};

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = NewRecipe,
    responses(
        (status = 201, description = "Recipe saved", body = Recipe),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Recipe>), AppError> {
    let content: NewRecipe = decode(&body, "Invalid request")?;
    let recipe = access::save_recipe(state.store.as_ref(), user.id, content)?;
    Ok((StatusCode::CREATED, Json(recipe)))
}
