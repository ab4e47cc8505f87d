//! Shapes the model is instructed to emit.
//!
//! These mirror the literal JSON examples in the prompt templates. Model
//! output is only trusted after it decodes into one of these types and
//! passes validation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::catalog;

/// Ingredients split by whether the user already has them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingList {
    pub have: Vec<String>,
    pub need: Vec<String>,
    pub optional: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeStep {
    pub title: String,
    pub detail: String,
    pub time_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Substitution {
    pub ingredient: String,
    pub swap_options: Vec<String>,
}

/// A complete recipe as generated for the single-recipe and update flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct GeneratedRecipe {
    pub title: String,
    pub summary: String,
    pub assumptions: Vec<String>,
    pub servings: u32,
    pub time_minutes: u32,
    pub equipment_used: Vec<String>,
    pub shopping: ShoppingList,
    pub prep_group: Vec<String>,
    #[validate(length(min = 1, max = 7, message = "Recipe must have between 1 and 7 steps"))]
    pub steps: Vec<RecipeStep>,
    pub substitutions: Vec<Substitution>,
    pub diet_notes: Vec<String>,
}

impl GeneratedRecipe {
    /// Check that `equipment_used` doesn't name catalog equipment outside
    /// `selected`. Labels the catalog doesn't know are allowed.
    pub fn check_equipment(&self, selected: &[String]) -> Result<(), ValidationError> {
        let forbidden: Vec<&str> = catalog::unavailable(catalog::EQUIPMENT, selected)
            .filter(|o| {
                self.equipment_used
                    .iter()
                    .any(|used| used.eq_ignore_ascii_case(o.label) || used == o.id)
            })
            .map(|o| o.label)
            .collect();

        if forbidden.is_empty() {
            Ok(())
        } else {
            let mut err = ValidationError::new("unselected_equipment");
            err.message = Some(format!("uses unselected equipment: {}", forbidden.join(", ")).into());
            Err(err)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Lightweight preview of a recipe, generated in batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIdeaPreview {
    #[validate(length(min = 1, max = 255, message = "Idea title must be 1 to 255 characters"))]
    pub title: String,
    pub description: String,
    pub key_ingredients: Vec<String>,
    pub estimated_time: u32,
    pub servings: u32,
    pub equipment_needed: Vec<String>,
    pub dietary_tags: Vec<String>,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct IdeaBatch {
    #[validate(nested)]
    pub ideas: Vec<RecipeIdeaPreview>,
}

/// Expanded recipe attached to an idea on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct FullRecipe {
    pub shopping: ShoppingList,
    #[serde(rename = "prepGroup")]
    pub prep_group: Vec<String>,
    #[validate(length(min = 1, max = 7, message = "Recipe must have between 1 and 7 steps"))]
    pub steps: Vec<RecipeStep>,
    pub substitutions: Vec<Substitution>,
    pub tips: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_recipe() -> GeneratedRecipe {
        serde_json::from_value(json!({
            "title": "Egg Fried Rice",
            "summary": "Quick one-pan rice.",
            "assumptions": [],
            "servings": 2,
            "time_minutes": 15,
            "equipment_used": ["Hob / Stovetop"],
            "shopping": {"have": ["rice", "eggs"], "need": ["spring onion"], "optional": []},
            "prep_group": ["Beat the eggs"],
            "steps": [{"title": "Fry", "detail": "Fry everything", "time_minutes": 10}],
            "substitutions": [],
            "diet_notes": []
        }))
        .unwrap()
    }

    #[test]
    fn test_step_count_bounds() {
        let mut recipe = sample_recipe();
        assert!(recipe.validate().is_ok());

        recipe.steps.clear();
        assert!(recipe.validate().is_err());

        let step = RecipeStep {
            title: "Stir".to_string(),
            detail: "Stir".to_string(),
            time_minutes: 1,
        };
        recipe.steps = vec![step; 8];
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn test_check_equipment_rejects_unselected_labels() {
        let mut recipe = sample_recipe();
        assert!(recipe.check_equipment(&["hob".to_string()]).is_ok());

        recipe.equipment_used.push("Oven".to_string());
        let err = recipe.check_equipment(&["hob".to_string()]).unwrap_err();
        assert!(err.message.unwrap().contains("Oven"));
    }

    #[test]
    fn test_check_equipment_allows_unknown_labels() {
        let mut recipe = sample_recipe();
        recipe.equipment_used.push("Frying pan".to_string());
        assert!(recipe.check_equipment(&["hob".to_string()]).is_ok());
    }

    #[test]
    fn test_idea_title_is_bounded() {
        let mut idea: RecipeIdeaPreview = serde_json::from_value(json!({
            "title": "Kettle Couscous",
            "description": "Couscous soaked in boiling water.",
            "keyIngredients": ["couscous"],
            "estimatedTime": 10,
            "servings": 1,
            "equipmentNeeded": ["Kettle"],
            "dietaryTags": [],
            "difficulty": "easy"
        }))
        .unwrap();
        assert!(idea.validate().is_ok());

        idea.title = "a".repeat(256);
        assert!(idea.validate().is_err());
    }

    #[test]
    fn test_difficulty_rejects_unknown_tier() {
        let result: Result<Difficulty, _> = serde_json::from_value(json!("expert"));
        assert!(result.is_err());
    }
}
