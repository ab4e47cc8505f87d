use crate::access;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use kitchen_core::records::Recipe;
use uuid::Uuid;

/// Flip a recipe between private and published.
#[utoipa::path(
    post,
    path = "/api/recipes/{id}/publish",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe with its new publish state", body = Recipe),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn toggle_publish(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, AppError> {
    let recipe = access::toggle_publish(state.store.as_ref(), user.id, id)?;
    Ok(Json(recipe))
}
