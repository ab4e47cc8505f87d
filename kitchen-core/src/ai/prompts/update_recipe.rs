//! Prompt for regenerating a recipe after a chat about modifications.

use super::{labels, list_or, numbered_steps, optional_text, RECIPE_OUTPUT_FORMAT};
use crate::catalog::EQUIPMENT;
use crate::forms::{ChatTurn, RecipeForm, TurnRole};
use crate::recipe::GeneratedRecipe;

/// Prompt name for cache keys.
pub const UPDATE_RECIPE_PROMPT_NAME: &str = "update_recipe";

pub const UPDATE_RECIPE_USER_PROMPT: &str =
    "Please regenerate the recipe with the modifications we discussed.";

/// Transcript as `User:` / `Assistant:` lines.
fn transcript(messages: &[ChatTurn]) -> String {
    messages
        .iter()
        .map(|m| {
            let speaker = match m.role {
                TurnRole::User => "User",
                TurnRole::Assistant => "Assistant",
            };
            format!("{}: {}", speaker, m.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_update_recipe_system_prompt(
    recipe: &GeneratedRecipe,
    messages: &[ChatTurn],
    inputs: &RecipeForm,
) -> String {
    format!(
        r#"You are Traveler's Kitchen, a recipe assistant for travelers cooking with limited equipment.

You previously generated a recipe, and the user has been chatting with you about modifications. Now regenerate the recipe incorporating the discussed changes.

ORIGINAL RECIPE:
Title: {title}
Summary: {summary}
Time: {time} minutes
Servings: {servings}
Equipment used: {equipment_used}
Ingredients (have): {have}
Ingredients (need): {need}
Optional: {optional}
Steps:
{steps}

CONVERSATION WITH USER:
{conversation}

ORIGINAL CONSTRAINTS:
- Equipment available: {equipment}
- Country/region: {country}
- Dietary requirements: {diet}
- Time limit: {time_limit} minutes
- Servings: {form_servings}

INSTRUCTIONS:
- Regenerate the recipe incorporating the modifications discussed in the conversation
- Keep the same format and constraints
- Still respect equipment limitations and dietary requirements
- Update ingredients, steps, and any other relevant sections based on the discussion

{output_format}"#,
        title = recipe.title,
        summary = recipe.summary,
        time = recipe.time_minutes,
        servings = recipe.servings,
        equipment_used = recipe.equipment_used.join(", "),
        have = recipe.shopping.have.join(", "),
        need = recipe.shopping.need.join(", "),
        optional = recipe.shopping.optional.join(", "),
        steps = numbered_steps(recipe),
        conversation = transcript(messages),
        equipment = list_or(&labels(EQUIPMENT, &inputs.equipment), "none specified"),
        country = optional_text(inputs.country.as_deref()).unwrap_or("not specified"),
        diet = list_or(&inputs.dietary_requirements(), "none"),
        time_limit = inputs.time_limit,
        form_servings = inputs.servings,
        output_format = RECIPE_OUTPUT_FORMAT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_renders_transcript_and_constraints() {
        let recipe: GeneratedRecipe = serde_json::from_str(crate::ai::fake::SAMPLE_UPDATED_RECIPE).unwrap();
        let inputs: RecipeForm = serde_json::from_value(json!({
            "equipment": ["hob"],
            "diet": ["vegetarian"],
            "timeLimit": 20
        }))
        .unwrap();
        let messages = vec![
            ChatTurn::user("Can I make it spicy?"),
            ChatTurn::assistant("Add chilli flakes. [RECIPE_UPDATE_AVAILABLE]"),
        ];

        let prompt = render_update_recipe_system_prompt(&recipe, &messages, &inputs);

        assert!(prompt.contains("Title: Spicy Hostel Egg Fried Rice"));
        assert!(prompt.contains("1. Scramble: Scramble the eggs and set aside."));
        assert!(prompt.contains("User: Can I make it spicy?\nAssistant: Add chilli flakes."));
        assert!(prompt.contains("- Equipment available: Hob / Stovetop"));
        assert!(prompt.contains("- Dietary requirements: vegetarian"));
        assert!(prompt.contains("- Time limit: 20 minutes"));
        assert!(prompt.contains("OUTPUT FORMAT (STRICT)"));
    }
}
