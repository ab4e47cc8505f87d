//! Single-recipe generation prompt.

use super::{labels, list_or, optional_text, unavailable_labels, RECIPE_OUTPUT_FORMAT};
use crate::catalog::{EQUIPMENT, LIMITATIONS, PREFERENCES};
use crate::forms::RecipeForm;

/// Prompt name for cache keys.
pub const RECIPE_PROMPT_NAME: &str = "new_recipe";

const RECIPE_SYSTEM_PREAMBLE: &str = r#"You are Traveler's Kitchen, a recipe assistant for travelers cooking with limited equipment.

GOAL
Generate a practical, tasty recipe that the user can actually cook with their available equipment and in their current country. Prefer common, affordable ingredients and simple techniques.

HARD RULES
- Respect the user's available equipment. Do NOT include steps that require equipment they didn't select.
- Prefer 1-pot / 1-pan methods. Minimize dishes and prep.
- Prefer ingredients likely to be available in the user's country/region. If uncertain, offer substitutions.
- Keep the recipe short and scannable: 3-7 steps max.
- Avoid "Western specialty" ingredients unless the user listed them.
- Include food safety notes only when relevant (e.g., chicken).
- If key info is missing (e.g., servings), assume 1-2 servings and state the assumption.
- Give minutes and servings as whole numbers.
- Pay close attention to the user's notes/preferences - they describe what kind of dish they want."#;

const RECIPE_QUALITY_CHECK: &str = r#"QUALITY CHECK BEFORE YOU RESPOND
- Steps must not mention forbidden equipment (oven, blender, etc.) unless allowed.
- Ingredients should be coherent with the steps.
- Keep ingredient list compact (roughly 6-12 items).
- Each step should be doable in a hostel/shared kitchen."#;

/// System prompt for single-recipe generation.
pub fn recipe_system_prompt() -> String {
    format!(
        "{}\n\n{}\n\n{}",
        RECIPE_SYSTEM_PREAMBLE, RECIPE_OUTPUT_FORMAT, RECIPE_QUALITY_CHECK
    )
}

/// Render the user prompt for a validated form.
///
/// Selected equipment is listed as `Label=true`, every catalog option the
/// user didn't select as `Label=false`.
pub fn render_recipe_user_prompt(form: &RecipeForm) -> String {
    let equipment: Vec<String> = labels(EQUIPMENT, &form.equipment)
        .into_iter()
        .map(|label| format!("{}=true", label))
        .chain(
            unavailable_labels(EQUIPMENT, &form.equipment)
                .into_iter()
                .map(|label| format!("{}=false", label)),
        )
        .collect();

    let limitations = labels(LIMITATIONS, form.limitations.as_deref().unwrap_or_default());
    let preferences = labels(PREFERENCES, form.preferences.as_deref().unwrap_or_default());
    let to_buy = form.ingredients_to_buy.as_deref().unwrap_or_default();

    let mut prompt = format!(
        r#"Create one recipe with these constraints:

Equipment available: [{equipment}]
Kitchen limitations: [{limitations}]
Country/region: [{country}]
Dietary requirements/allergies: [{diet}]
Time limit: [{time_limit} minutes]
Servings: [{servings}]
Ingredients I already have: [{have}]
Ingredients I'm willing to buy: [{to_buy}]
Taste preferences: [{preferences}]"#,
        equipment = equipment.join(", "),
        limitations = list_or(&limitations, "none specified"),
        country = optional_text(form.country.as_deref()).unwrap_or("not specified"),
        diet = list_or(&form.dietary_requirements(), "none"),
        time_limit = form.time_limit,
        servings = form.servings,
        have = list_or(&form.ingredients_have, "nothing specific"),
        to_buy = list_or(to_buy, "open to suggestions"),
        preferences = list_or(&preferences, "none specified"),
    );

    if let Some(notes) = optional_text(form.notes.as_deref()) {
        prompt.push_str(&format!(
            "\n\nUser notes/special requests: \"{}\"\nPlease pay special attention to these notes when designing the recipe.",
            notes
        ));
    }

    prompt.push_str(
        "\n\nMake it realistic to shop locally. If an ingredient might be hard to find, add substitutions.",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(body: serde_json::Value) -> RecipeForm {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_selected_and_unselected_equipment() {
        let prompt = render_recipe_user_prompt(&form(json!({
            "equipment": ["hob", "kettle"],
            "ingredientsHave": ["rice", "eggs"]
        })));

        assert!(prompt.contains("Hob / Stovetop=true"));
        assert!(prompt.contains("Kettle=true"));
        assert!(prompt.contains("Oven=false"));
        assert!(prompt.contains("Microwave=false"));
        assert!(prompt.contains("Rice Cooker=false"));
        assert!(prompt.contains("Toaster=false"));
        assert!(!prompt.contains("Oven=true"));
        assert!(!prompt.contains("Hob / Stovetop=false"));
    }

    #[test]
    fn test_unknown_equipment_is_verbatim() {
        let prompt = render_recipe_user_prompt(&form(json!({"equipment": ["air fryer"]})));
        assert!(prompt.contains("air fryer=true"));
    }

    #[test]
    fn test_defaults_and_fallbacks() {
        let prompt = render_recipe_user_prompt(&form(json!({"equipment": ["hob"]})));

        assert!(prompt.contains("Time limit: [30 minutes]"));
        assert!(prompt.contains("Servings: [2]"));
        assert!(prompt.contains("Ingredients I already have: [nothing specific]"));
        assert!(prompt.contains("Ingredients I'm willing to buy: [open to suggestions]"));
        assert!(prompt.contains("Country/region: [not specified]"));
        assert!(prompt.contains("Dietary requirements/allergies: [none]"));
        assert!(!prompt.contains("User notes"));
    }

    #[test]
    fn test_constraints_are_rendered() {
        let prompt = render_recipe_user_prompt(&form(json!({
            "equipment": ["microwave"],
            "limitations": ["one_pot"],
            "country": "Vietnam",
            "diet": ["vegetarian"],
            "allergies": ["nuts"],
            "servings": 4,
            "timeLimit": 20,
            "ingredientsHave": ["rice"],
            "preferences": ["spicy"],
            "notes": "  something with noodles  "
        })));

        assert!(prompt.contains("Kitchen limitations: [Only one pot/pan]"));
        assert!(prompt.contains("Country/region: [Vietnam]"));
        assert!(prompt.contains("[vegetarian, nuts allergy]"));
        assert!(prompt.contains("Time limit: [20 minutes]"));
        assert!(prompt.contains("Servings: [4]"));
        assert!(prompt.contains("Taste preferences: [Spicy]"));
        assert!(prompt.contains("User notes/special requests: \"something with noodles\""));
    }

    #[test]
    fn test_system_prompt_includes_schema() {
        let system = recipe_system_prompt();
        assert!(system.contains("Traveler's Kitchen"));
        assert!(system.contains("\"equipment_used\": string[]"));
        assert!(system.contains("QUALITY CHECK"));
    }
}
