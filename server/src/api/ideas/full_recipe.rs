use crate::access;
use crate::api::{decode, ErrorResponse};
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use kitchen_core::records::RecipeIdea;
use kitchen_core::FullRecipe;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachFullRecipeRequest {
    #[validate(nested)]
    pub full_recipe: FullRecipe,
}

/// Store the expanded recipe on an idea so it needn't be generated again.
#[utoipa::path(
    put,
    path = "/api/ideas/{id}/full-recipe",
    tag = "ideas",
    params(
        ("id" = Uuid, Path, description = "Idea ID")
    ),
    request_body = AttachFullRecipeRequest,
    responses(
        (status = 200, description = "Idea with its full recipe", body = RecipeIdea),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Idea not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn attach_full_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<RecipeIdea>, AppError> {
    let request: AttachFullRecipeRequest = decode(&body, "Invalid request")?;
    let idea = access::attach_full_recipe(state.store.as_ref(), user.id, id, request.full_recipe)?;
    Ok(Json(idea))
}
