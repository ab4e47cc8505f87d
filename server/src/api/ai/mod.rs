//! Generation endpoints. Each one calls the model once and returns the
//! validated result; nothing is persisted here.

pub mod expand_idea;
pub mod generate_ideas;
pub mod new_recipe;
pub mod recipe_chat;
pub mod update_recipe;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/ai endpoints (mounted at /api/ai)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new-recipe", post(new_recipe::new_recipe))
        .route("/generate-ideas", post(generate_ideas::generate_ideas))
        .route("/expand-idea", post(expand_idea::expand_idea))
        .route("/update-recipe", post(update_recipe::update_recipe))
        .route("/recipe-chat", post(recipe_chat::recipe_chat))
}

/// 401 message for every generation endpoint except new-recipe.
pub(crate) const SIGN_IN_REQUIRED: &str = "You must be signed in";

pub(crate) const INVALID_INPUT: &str = "Invalid input data";

#[derive(OpenApi)]
#[openapi(
    paths(
        new_recipe::new_recipe,
        generate_ideas::generate_ideas,
        expand_idea::expand_idea,
        update_recipe::update_recipe,
        recipe_chat::recipe_chat,
    ),
    components(schemas(
        kitchen_core::forms::RecipeForm,
        kitchen_core::forms::SessionInputs,
        kitchen_core::forms::IdeasRequest,
        kitchen_core::forms::IdeaToExpand,
        kitchen_core::forms::ExpandIdeaRequest,
        kitchen_core::forms::ChatTurn,
        kitchen_core::forms::TurnRole,
        kitchen_core::forms::UpdateRecipeRequest,
        kitchen_core::forms::RecipeChatRequest,
        kitchen_core::GeneratedRecipe,
        kitchen_core::FullRecipe,
        kitchen_core::RecipeIdeaPreview,
        kitchen_core::Difficulty,
        new_recipe::NewRecipeResponse,
        generate_ideas::GenerateIdeasResponse,
        expand_idea::ExpandIdeaResponse,
        update_recipe::UpdateRecipeResponse,
    ))
)]
pub struct ApiDoc;
