pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod publish;
pub mod published;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use kitchen_core::records::Recipe;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/published", get(published::list_published))
        .route("/{id}", get(get::get_recipe).delete(delete::delete_recipe))
        .route("/{id}/publish", post(publish::toggle_publish))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeListResponse {
    pub recipes: Vec<Recipe>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        published::list_published,
        get::get_recipe,
        publish::toggle_publish,
        delete::delete_recipe,
    ),
    components(schemas(
        kitchen_core::records::NewRecipe,
        kitchen_core::records::Recipe,
        kitchen_core::records::RecipeInputs,
        kitchen_core::records::PrepTask,
        kitchen_core::records::SavedStep,
        kitchen_core::records::SavedSubstitution,
        kitchen_core::recipe::ShoppingList,
        RecipeListResponse,
    ))
)]
pub struct ApiDoc;
