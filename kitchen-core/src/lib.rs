//! Recipe generation for Traveler's Kitchen.
//!
//! Request forms, prompt templates, the AI client seam, and the repair and
//! validation of model output into typed recipes.

pub mod ai;
pub mod catalog;
pub mod contract;
pub mod forms;
pub mod recipe;
pub mod records;

pub use contract::{parse_model_output, strip_code_fences, ContractError};
pub use forms::{decode_request, RequestErrors};
pub use recipe::{Difficulty, FullRecipe, GeneratedRecipe, IdeaBatch, RecipeIdeaPreview};
pub use records::{IdeaSession, NewRecipe, Recipe, RecipeIdea};
