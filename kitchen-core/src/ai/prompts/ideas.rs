//! Recipe ideas prompt, producing a batch of lightweight previews.

use super::{labels, list_or, optional_text, unavailable_labels};
use crate::catalog::EQUIPMENT;
use crate::forms::IdeasRequest;

/// Prompt name for cache keys.
pub const IDEAS_PROMPT_NAME: &str = "generate_ideas";

/// Ideas requested per batch.
pub const IDEAS_PER_BATCH: usize = 4;

pub const IDEAS_SYSTEM_PROMPT: &str = "You are Traveler's Kitchen, a recipe assistant for travelers cooking with limited equipment. Generate creative but practical recipe ideas that can actually be made in basic kitchens like hostels and guesthouses.";

const IDEAS_REQUIREMENTS: &str = r#"REQUIREMENTS:
- Each idea must be practical for a hostel/guesthouse kitchen
- Vary the cuisine styles and cooking methods
- Include a mix of difficulties
- Keep ingredient lists realistic (6-10 key ingredients each)
- All recipes must be achievable with the available equipment only
- Give times and servings as whole numbers

Return ONLY valid JSON (no markdown, no code blocks) with this structure:
{
  "ideas": [
    {
      "title": "Recipe Name",
      "description": "2-3 sentence description of the dish",
      "keyIngredients": ["ingredient1", "ingredient2", ...],
      "estimatedTime": 25,
      "servings": 2,
      "equipmentNeeded": ["Hob / Stovetop", "Kettle"],
      "dietaryTags": ["vegetarian", "gluten-free"],
      "difficulty": "easy"
    }
  ]
}"#;

pub fn render_ideas_prompt(request: &IdeasRequest) -> String {
    let inputs = &request.inputs;

    let mut constraints = vec![
        format!(
            "- Available equipment: {}",
            list_or(&labels(EQUIPMENT, &inputs.equipment), "none specified")
        ),
        format!(
            "- NOT available: {}",
            list_or(&unavailable_labels(EQUIPMENT, &inputs.equipment), "none")
        ),
        format!(
            "- Country/region: {}",
            optional_text(inputs.country.as_deref()).unwrap_or("not specified")
        ),
        format!(
            "- Dietary requirements: {}",
            list_or(&inputs.dietary_requirements(), "none")
        ),
        format!("- Time limit: {} minutes max", inputs.time_limit.unwrap_or(30)),
    ];

    if let Some(base) = optional_text(inputs.base_ingredient.as_deref()) {
        constraints.push(format!("- Base ingredient to use: {}", base));
    }

    if let Some(extra) = inputs.additional_ingredients.as_deref().filter(|v| !v.is_empty()) {
        constraints.push(format!(
            "- Additional ingredients available: {}",
            extra.join(", ")
        ));
    }

    let mut prompt = format!(
        "Generate {} diverse recipe ideas for a traveler cooking with limited equipment.\n\nCONSTRAINTS:\n{}",
        IDEAS_PER_BATCH,
        constraints.join("\n")
    );

    if let Some(titles) = request.existing_titles.as_deref().filter(|t| !t.is_empty()) {
        prompt.push_str(&format!(
            "\n\nAVOID these recipes (already generated): {}",
            titles.join(", ")
        ));
    }

    if let Some(context) = optional_text(request.context.as_deref()) {
        prompt.push_str(&format!(
            "\n\nUSER'S ADDITIONAL REQUEST: \"{}\"\nPlease incorporate this feedback into your suggestions.",
            context
        ));
    }

    prompt.push_str("\n\n");
    prompt.push_str(IDEAS_REQUIREMENTS);
    prompt
}
