pub mod full_recipe;
pub mod get;

use crate::AppState;
use axum::routing::{get, put};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/ideas endpoints (mounted at /api/ideas)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get::get_idea))
        .route("/{id}/full-recipe", put(full_recipe::attach_full_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(get::get_idea, full_recipe::attach_full_recipe),
    components(schemas(full_recipe::AttachFullRecipeRequest))
)]
pub struct ApiDoc;
