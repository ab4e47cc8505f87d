use crate::access;
use crate::api::ErrorResponse;
use crate::auth::MaybeAuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use kitchen_core::records::Recipe;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn get_recipe(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, AppError> {
    let viewer = user.map(|u| u.id);
    let recipe = access::get_recipe(state.store.as_ref(), viewer, id)?;
    Ok(Json(recipe))
}
