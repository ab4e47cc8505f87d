//! Persisted records: saved recipes, idea sessions and ideas.
//!
//! Saved recipes use a flatter shape than [`GeneratedRecipe`]: steps are
//! numbered single-line instructions and substitutions are one string each.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::forms::{RecipeForm, SessionInputs};
use crate::recipe::{
    FullRecipe, GeneratedRecipe, RecipeIdeaPreview, RecipeStep, ShoppingList, Substitution,
};

/// Constraints a saved recipe was generated from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInputs {
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_preferences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_time: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrepTask {
    pub task: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SavedStep {
    pub number: u32,
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
}

impl SavedStep {
    fn numbered(steps: &[RecipeStep]) -> Vec<Self> {
        steps
            .iter()
            .zip(1..)
            .map(|(step, number)| Self {
                number,
                instruction: format!("{}: {}", step.title, step.detail),
                duration: Some(step.time_minutes),
                equipment: None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SavedSubstitution {
    pub original: String,
    pub substitute: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&Substitution> for SavedSubstitution {
    fn from(sub: &Substitution) -> Self {
        Self {
            original: sub.ingredient.clone(),
            substitute: sub.swap_options.join(", "),
            note: None,
        }
    }
}

/// Recipe content as submitted for saving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: String,
    pub description: String,
    pub inputs: RecipeInputs,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub equipment_used: Vec<String>,
    pub shopping_list: ShoppingList,
    pub prep_group: Vec<PrepTask>,
    pub steps: Vec<SavedStep>,
    pub substitutions: Vec<SavedSubstitution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
}

fn prep_tasks(tasks: &[String]) -> Vec<PrepTask> {
    tasks
        .iter()
        .map(|task| PrepTask {
            task: task.clone(),
            ingredients: Vec::new(),
        })
        .collect()
}

impl NewRecipe {
    /// Save payload for a recipe generated from `form`.
    pub fn from_generated(recipe: &GeneratedRecipe, form: &RecipeForm) -> Self {
        let ingredients = form
            .ingredients_have
            .iter()
            .chain(form.ingredients_to_buy.iter().flatten())
            .cloned()
            .collect();

        Self {
            title: recipe.title.clone(),
            description: recipe.summary.clone(),
            inputs: RecipeInputs {
                equipment: form.equipment.clone(),
                dietary_preferences: form.diet.clone(),
                allergens: form.allergies.clone(),
                country: form.country.clone(),
                ingredients,
                servings: Some(form.servings),
                max_time: Some(form.time_limit),
            },
            prep_time: 0,
            cook_time: recipe.time_minutes,
            servings: recipe.servings,
            equipment_used: recipe.equipment_used.clone(),
            shopping_list: recipe.shopping.clone(),
            prep_group: prep_tasks(&recipe.prep_group),
            steps: SavedStep::numbered(&recipe.steps),
            substitutions: recipe.substitutions.iter().map(Into::into).collect(),
            tips: Some(recipe.diet_notes.clone()),
        }
    }

    /// Save payload for an expanded idea.
    pub fn from_idea(idea: &RecipeIdeaPreview, full: &FullRecipe, inputs: &SessionInputs) -> Self {
        Self {
            title: idea.title.clone(),
            description: idea.description.clone(),
            inputs: RecipeInputs {
                equipment: inputs.equipment.clone(),
                dietary_preferences: inputs.dietary_preferences.clone(),
                allergens: inputs.allergens.clone(),
                country: inputs.country.clone(),
                ingredients: idea.key_ingredients.clone(),
                servings: Some(idea.servings),
                max_time: Some(idea.estimated_time),
            },
            prep_time: 0,
            cook_time: idea.estimated_time,
            servings: idea.servings,
            equipment_used: idea.equipment_needed.clone(),
            shopping_list: full.shopping.clone(),
            prep_group: prep_tasks(&full.prep_group),
            steps: SavedStep::numbered(&full.steps),
            substitutions: full.substitutions.iter().map(Into::into).collect(),
            tips: Some(full.tips.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub content: NewRecipe,
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(user_id: Uuid, content: NewRecipe, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            content,
            is_published: false,
            published_at: None,
            created_at: now,
        }
    }

    /// Flip the published flag. Publishing stamps `now`, unpublishing clears
    /// the timestamp.
    pub fn toggle_publish(&mut self, now: DateTime<Utc>) {
        self.is_published = !self.is_published;
        self.published_at = self.is_published.then_some(now);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdeaSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub inputs: SessionInputs,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IdeaSession {
    pub fn new(user_id: Uuid, inputs: SessionInputs, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            inputs,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIdea {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub preview: RecipeIdeaPreview,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_recipe: Option<FullRecipe>,
    pub created_at: DateTime<Utc>,
}

impl RecipeIdea {
    pub fn new(session: &IdeaSession, preview: RecipeIdeaPreview, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: session.id,
            user_id: session.user_id,
            preview,
            full_recipe: None,
            created_at: now,
        }
    }
}
