//! Prompt for expanding an idea preview into a full recipe.

use super::{labels, list_or, optional_text};
use crate::catalog::EQUIPMENT;
use crate::forms::{IdeaToExpand, SessionInputs};

/// Prompt name for cache keys.
pub const EXPAND_IDEA_PROMPT_NAME: &str = "expand_idea";

pub const EXPAND_IDEA_SYSTEM_PROMPT: &str = "You are Traveler's Kitchen, a recipe assistant for travelers. Generate detailed, practical recipes that can be made in basic kitchens like hostels and guesthouses.";

pub fn render_expand_idea_prompt(idea: &IdeaToExpand, inputs: &SessionInputs) -> String {
    format!(
        r#"Generate the full recipe details for this recipe idea:

RECIPE TO EXPAND:
Title: {title}
Description: {description}
Key Ingredients: {key_ingredients}
Estimated Time: {time} minutes
Servings: {servings}
Equipment Needed: {equipment_needed}
Difficulty: {difficulty}

CONSTRAINTS:
- Available equipment: {equipment}
- Country/region: {country}
- Dietary requirements: {diet}
- Ingredients user mentioned having: {have}

REQUIREMENTS:
- Categorize ingredients into "have" (from user's list), "need" (must buy), and "optional" (nice to have)
- Keep steps clear and simple (3-7 steps max)
- Do not use equipment that isn't available
- Include practical substitutions for harder-to-find ingredients
- Add helpful tips for travelers cooking in basic kitchens

Return ONLY valid JSON (no markdown, no code blocks) with this structure:
{{
  "shopping": {{
    "have": ["ingredients user likely has"],
    "need": ["ingredients to buy"],
    "optional": ["nice to have but not essential"]
  }},
  "prepGroup": ["prep task 1", "prep task 2"],
  "steps": [
    {{ "title": "Step Title", "detail": "Detailed instructions", "time_minutes": 5 }}
  ],
  "substitutions": [
    {{ "ingredient": "hard to find item", "swap_options": ["option 1", "option 2"] }}
  ],
  "tips": ["helpful tip 1", "helpful tip 2"]
}}"#,
        title = idea.title,
        description = idea.description,
        key_ingredients = idea.key_ingredients.join(", "),
        time = idea.estimated_time,
        servings = idea.servings,
        equipment_needed = idea.equipment_needed.join(", "),
        difficulty = idea.difficulty,
        equipment = list_or(&labels(EQUIPMENT, &inputs.equipment), "none specified"),
        country = optional_text(inputs.country.as_deref()).unwrap_or("not specified"),
        diet = list_or(&inputs.dietary_requirements(), "none"),
        have = list_or(&inputs.available_ingredients(), "none specified"),
    )
}
