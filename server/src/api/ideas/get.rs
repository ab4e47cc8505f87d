use crate::access;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use kitchen_core::records::RecipeIdea;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/ideas/{id}",
    tag = "ideas",
    params(
        ("id" = Uuid, Path, description = "Idea ID")
    ),
    responses(
        (status = 200, description = "Idea details", body = RecipeIdea),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Idea not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_idea(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeIdea>, AppError> {
    let idea = access::get_idea(state.store.as_ref(), user.id, id)?;
    Ok(Json(idea))
}
