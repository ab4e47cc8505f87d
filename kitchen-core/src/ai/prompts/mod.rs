//! AI prompt templates.
//!
//! Every template is a pure function of its inputs. Each module exports a
//! `*_PROMPT_NAME` used for cache keys and logs.

pub mod chat;
pub mod expand_idea;
pub mod ideas;
pub mod recipe;
pub mod update_recipe;

pub use chat::{render_chat_system_prompt, CHAT_PROMPT_NAME};
pub use expand_idea::{
    render_expand_idea_prompt, EXPAND_IDEA_PROMPT_NAME, EXPAND_IDEA_SYSTEM_PROMPT,
};
pub use ideas::{render_ideas_prompt, IDEAS_PROMPT_NAME, IDEAS_SYSTEM_PROMPT};
pub use recipe::{recipe_system_prompt, render_recipe_user_prompt, RECIPE_PROMPT_NAME};
pub use update_recipe::{
    render_update_recipe_system_prompt, UPDATE_RECIPE_PROMPT_NAME, UPDATE_RECIPE_USER_PROMPT,
};

use crate::catalog::{self, CatalogOption};
use crate::recipe::GeneratedRecipe;

/// Output contract shared by the new-recipe and update-recipe prompts.
pub(crate) const RECIPE_OUTPUT_FORMAT: &str = r#"OUTPUT FORMAT (STRICT)
Return ONLY valid JSON matching this schema. No markdown, no extra text, no code blocks.

{
  "title": string,
  "summary": string,
  "assumptions": string[],
  "servings": number,
  "time_minutes": number,
  "equipment_used": string[],
  "shopping": {
    "have": string[],
    "need": string[],
    "optional": string[]
  },
  "prep_group": string[],
  "steps": [
    { "title": string, "detail": string, "time_minutes": number }
  ],
  "substitutions": [
    { "ingredient": string, "swap_options": string[] }
  ],
  "diet_notes": string[]
}"#;

/// Items joined with ", ", or `fallback` when there are none.
fn list_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

/// Catalog labels for the given ids, unknown ids kept verbatim.
fn labels(options: &[CatalogOption], ids: &[String]) -> Vec<String> {
    ids.iter()
        .map(|id| catalog::display_label(options, id).to_string())
        .collect()
}

/// Catalog labels the user did not select.
fn unavailable_labels(options: &[CatalogOption], selected: &[String]) -> Vec<String> {
    catalog::unavailable(options, selected)
        .map(|o| o.label.to_string())
        .collect()
}

fn numbered_steps(recipe: &GeneratedRecipe) -> String {
    recipe
        .steps
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}: {}", i + 1, s.title, s.detail))
        .collect::<Vec<_>>()
        .join("\n")
}

fn optional_text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
