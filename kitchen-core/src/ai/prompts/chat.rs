//! Free-form chat about a generated recipe.
//!
//! The assistant ends any reply that proposes a change with
//! [`UPDATE_MARKER`]; clients use it to offer a "regenerate" action.

use super::numbered_steps;
use crate::recipe::GeneratedRecipe;

/// Prompt name for logs.
pub const CHAT_PROMPT_NAME: &str = "recipe_chat";

/// Literal marker appended to replies that suggest a modification.
pub const UPDATE_MARKER: &str = "[RECIPE_UPDATE_AVAILABLE]";

pub fn render_chat_system_prompt(recipe: &GeneratedRecipe) -> String {
    format!(
        r#"You are a helpful cooking assistant. The user has generated a recipe and wants to ask questions or make modifications.

CURRENT RECIPE:
Title: {title}
Summary: {summary}
Time: {time} minutes
Servings: {servings}
Equipment: {equipment}

Ingredients they have: {have}
Ingredients to buy: {need}
Optional: {optional}

Steps:
{steps}

INSTRUCTIONS:
- Answer questions about the recipe helpfully and concisely
- If the user asks to modify the recipe (add/remove ingredients, change cooking method, adjust servings, etc.), explain how it would work
- When you suggest a modification that would change the recipe, end your message with:
  "{marker}"
  This signals that the user can click a button to regenerate the recipe with your suggested changes.
- Keep responses friendly and practical
- Remember this is for travelers with limited kitchen equipment"#,
        title = recipe.title,
        summary = recipe.summary,
        time = recipe.time_minutes,
        servings = recipe.servings,
        equipment = recipe.equipment_used.join(", "),
        have = recipe.shopping.have.join(", "),
        need = recipe.shopping.need.join(", "),
        optional = recipe.shopping.optional.join(", "),
        steps = numbered_steps(recipe),
        marker = UPDATE_MARKER,
    )
}

/// Whether an assistant reply proposes a recipe change.
pub fn has_update_marker(text: &str) -> bool {
    text.contains(UPDATE_MARKER)
}

/// Reply text with the marker removed, for display.
pub fn strip_update_marker(text: &str) -> String {
    text.replace(UPDATE_MARKER, "").trim_end().to_string()
}
