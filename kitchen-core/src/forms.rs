//! Request bodies accepted by the generation endpoints.
//!
//! Requests are decoded in two phases: first the JSON body is decoded into
//! the strongly typed request (type mismatches fail here and are never
//! coerced), then the field constraints are checked with `validator`.
//! Either failure produces [`RequestErrors`], which the server returns as the
//! `details` of a 400 response.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::recipe::GeneratedRecipe;

fn default_servings() -> u32 {
    2
}

fn default_time_limit() -> u32 {
    30
}

/// Form submitted to generate a single recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeForm {
    #[validate(length(min = 1, message = "Select at least one equipment"))]
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limitations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(default = "default_servings")]
    #[validate(range(min = 1, max = 6, message = "Servings must be between 1 and 6"))]
    pub servings: u32,
    #[serde(default = "default_time_limit")]
    #[validate(range(
        min = 10,
        max = 60,
        message = "Time limit must be between 10 and 60 minutes"
    ))]
    pub time_limit: u32,
    #[serde(default)]
    pub ingredients_have: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_to_buy: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

impl RecipeForm {
    /// Diet types followed by allergens rendered as "x allergy".
    pub fn dietary_requirements(&self) -> Vec<String> {
        dietary_requirements(self.diet.as_deref(), self.allergies.as_deref())
    }
}

/// Base constraints shared by every idea in a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionInputs {
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_preferences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_ingredient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
}

impl SessionInputs {
    pub fn dietary_requirements(&self) -> Vec<String> {
        dietary_requirements(
            self.dietary_preferences.as_deref(),
            self.allergens.as_deref(),
        )
    }

    /// The base ingredient (if any) followed by the additional ingredients.
    pub fn available_ingredients(&self) -> Vec<String> {
        self.base_ingredient
            .iter()
            .chain(self.additional_ingredients.iter().flatten())
            .cloned()
            .collect()
    }
}

/// Request for a batch of recipe ideas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdeasRequest {
    #[serde(flatten)]
    pub inputs: SessionInputs,
    /// Free-text follow-up for "generate more".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Context must be at most 1000 characters"))]
    pub context: Option<String>,
    /// Titles already shown to the user, to avoid duplicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_titles: Option<Vec<String>>,
}

/// Preview of an idea as sent back by the client for expansion.
///
/// Difficulty is a free string here; the client echoes whatever it stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdeaToExpand {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: String,
    pub key_ingredients: Vec<String>,
    pub estimated_time: u32,
    pub servings: u32,
    pub equipment_needed: Vec<String>,
    pub dietary_tags: Vec<String>,
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpandIdeaRequest {
    #[validate(nested)]
    pub idea: IdeaToExpand,
    pub session_inputs: SessionInputs,
}

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One turn of the recipe conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request to regenerate a recipe from a conversation about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    #[validate(length(min = 1, message = "At least one message is required"))]
    pub messages: Vec<ChatTurn>,
    #[validate(nested)]
    pub recipe: GeneratedRecipe,
    #[validate(nested)]
    pub inputs: RecipeForm,
}

/// Request for a streamed chat reply about a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeChatRequest {
    #[validate(length(min = 1, message = "At least one message is required"))]
    pub messages: Vec<ChatTurn>,
    #[validate(nested)]
    pub recipe: GeneratedRecipe,
}

fn dietary_requirements(diet: Option<&[String]>, allergies: Option<&[String]>) -> Vec<String> {
    diet.unwrap_or_default()
        .iter()
        .cloned()
        .chain(
            allergies
                .unwrap_or_default()
                .iter()
                .map(|a| format!("{} allergy", a)),
        )
        .collect()
}

/// Per-field description of a rejected request.
///
/// `form_errors` holds failures that aren't tied to a single field (such as
/// a body that doesn't decode); `field_errors` maps a dotted camelCase field
/// path to its messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl RequestErrors {
    pub fn from_decode(err: &serde_json::Error) -> Self {
        Self {
            form_errors: vec![err.to_string()],
            field_errors: BTreeMap::new(),
        }
    }

    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut out = Self::default();
        collect_field_errors(errors, "", &mut out.field_errors);
        out
    }
}

fn collect_field_errors(
    errors: &ValidationErrors,
    prefix: &str,
    out: &mut BTreeMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let name = camel_case(field);
        let path = if prefix.is_empty() {
            name
        } else {
            format!("{}.{}", prefix, name)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = out.entry(path).or_default();
                for e in field_errors {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code));
                    messages.push(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(nested, &format!("{}.{}", path, index), out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Decode and validate a request body.
pub fn decode_request<T>(body: serde_json::Value) -> Result<T, RequestErrors>
where
    T: DeserializeOwned + Validate,
{
    let request: T = serde_json::from_value(body).map_err(|e| RequestErrors::from_decode(&e))?;
    request
        .validate()
        .map_err(|e| RequestErrors::from_validation(&e))?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_form_defaults() {
        let form: RecipeForm = decode_request(json!({
            "equipment": ["hob"],
            "ingredientsHave": ["rice"]
        }))
        .unwrap();

        assert_eq!(form.servings, 2);
        assert_eq!(form.time_limit, 30);
        assert!(form.diet.is_none());
    }

    #[test]
    fn test_recipe_form_requires_equipment() {
        let errors = decode_request::<RecipeForm>(json!({
            "equipment": [],
            "servings": 9
        }))
        .unwrap_err();

        assert_eq!(
            errors.field_errors["equipment"],
            vec!["Select at least one equipment".to_string()]
        );
        assert!(errors.field_errors.contains_key("servings"));
        assert!(errors.form_errors.is_empty());
    }

    #[test]
    fn test_type_mismatch_is_not_coerced() {
        let errors = decode_request::<RecipeForm>(json!({
            "equipment": ["hob"],
            "servings": "2"
        }))
        .unwrap_err();

        assert_eq!(errors.form_errors.len(), 1);
        assert!(errors.form_errors[0].contains("invalid type"));
    }

    #[test]
    fn test_field_paths_are_camel_case() {
        let errors = decode_request::<RecipeForm>(json!({
            "equipment": ["hob"],
            "timeLimit": 5
        }))
        .unwrap_err();

        assert!(errors.field_errors.contains_key("timeLimit"));
    }

    #[test]
    fn test_dietary_requirements_append_allergies() {
        let inputs = SessionInputs {
            dietary_preferences: Some(vec!["vegan".to_string()]),
            allergens: Some(vec!["nuts".to_string(), "soy".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            inputs.dietary_requirements(),
            vec!["vegan", "nuts allergy", "soy allergy"]
        );
    }

    #[test]
    fn test_ideas_request_flattens_inputs() {
        let request: IdeasRequest = decode_request(json!({
            "equipment": ["kettle"],
            "baseIngredient": "noodles",
            "additionalIngredients": ["egg"],
            "existingTitles": ["Fried Rice"]
        }))
        .unwrap();

        assert_eq!(request.inputs.equipment, vec!["kettle"]);
        assert_eq!(request.inputs.available_ingredients(), vec!["noodles", "egg"]);
        assert_eq!(request.existing_titles, Some(vec!["Fried Rice".to_string()]));
    }

    #[test]
    fn test_nested_errors_use_dotted_paths() {
        let errors = decode_request::<ExpandIdeaRequest>(json!({
            "idea": {
                "title": "",
                "description": "",
                "keyIngredients": [],
                "estimatedTime": 10,
                "servings": 1,
                "equipmentNeeded": [],
                "dietaryTags": [],
                "difficulty": "easy"
            },
            "sessionInputs": { "equipment": ["hob"] }
        }))
        .unwrap_err();

        assert!(errors.field_errors.contains_key("idea.title"));
    }
}
