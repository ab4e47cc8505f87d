//! Diesel row types and their conversions to and from the domain records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use kitchen_core::recipe::{Difficulty, FullRecipe, RecipeIdeaPreview};
use kitchen_core::records::{IdeaSession, NewRecipe, Recipe, RecipeIdea};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::store::{StoreError, StoreResult, User};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::auth_sessions)]
pub struct NewAuthSession<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub inputs: serde_json::Value,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub equipment_used: Vec<Option<String>>,
    pub shopping_list: serde_json::Value,
    pub prep_group: serde_json::Value,
    pub steps: serde_json::Value,
    pub substitutions: serde_json::Value,
    pub tips: Option<serde_json::Value>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RecipeRow {
    pub fn from_recipe(recipe: &Recipe) -> StoreResult<Self> {
        let content = &recipe.content;
        Ok(Self {
            id: recipe.id,
            user_id: recipe.user_id,
            title: content.title.clone(),
            description: content.description.clone(),
            inputs: to_json(&content.inputs)?,
            prep_time: to_int(content.prep_time),
            cook_time: to_int(content.cook_time),
            servings: to_int(content.servings),
            equipment_used: to_array(&content.equipment_used),
            shopping_list: to_json(&content.shopping_list)?,
            prep_group: to_json(&content.prep_group)?,
            steps: to_json(&content.steps)?,
            substitutions: to_json(&content.substitutions)?,
            tips: content.tips.as_ref().map(to_json).transpose()?,
            is_published: recipe.is_published,
            published_at: recipe.published_at,
            created_at: recipe.created_at,
        })
    }
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = StoreError;

    fn try_from(row: RecipeRow) -> StoreResult<Self> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            content: NewRecipe {
                title: row.title,
                description: row.description,
                inputs: from_json(row.inputs)?,
                prep_time: from_int(row.prep_time),
                cook_time: from_int(row.cook_time),
                servings: from_int(row.servings),
                equipment_used: from_array(row.equipment_used),
                shopping_list: from_json(row.shopping_list)?,
                prep_group: from_json(row.prep_group)?,
                steps: from_json(row.steps)?,
                substitutions: from_json(row.substitutions)?,
                tips: row.tips.map(from_json).transpose()?,
            },
            is_published: row.is_published,
            published_at: row.published_at,
            created_at: row.created_at,
        })
    }
}

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::schema::recipe_idea_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IdeaSessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub inputs: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IdeaSessionRow {
    pub fn from_session(session: &IdeaSession) -> StoreResult<Self> {
        Ok(Self {
            id: session.id,
            user_id: session.user_id,
            inputs: to_json(&session.inputs)?,
            created_at: session.created_at,
            updated_at: session.updated_at,
        })
    }
}

impl TryFrom<IdeaSessionRow> for IdeaSession {
    type Error = StoreError;

    fn try_from(row: IdeaSessionRow) -> StoreResult<Self> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            inputs: from_json(row.inputs)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::schema::recipe_ideas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeIdeaRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub key_ingredients: Vec<Option<String>>,
    pub estimated_time: i32,
    pub servings: i32,
    pub equipment_needed: Vec<Option<String>>,
    pub dietary_tags: Vec<Option<String>>,
    pub difficulty: String,
    pub full_recipe: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl RecipeIdeaRow {
    pub fn from_idea(idea: &RecipeIdea) -> StoreResult<Self> {
        let preview = &idea.preview;
        Ok(Self {
            id: idea.id,
            session_id: idea.session_id,
            user_id: idea.user_id,
            title: preview.title.clone(),
            description: preview.description.clone(),
            key_ingredients: to_array(&preview.key_ingredients),
            estimated_time: to_int(preview.estimated_time),
            servings: to_int(preview.servings),
            equipment_needed: to_array(&preview.equipment_needed),
            dietary_tags: to_array(&preview.dietary_tags),
            difficulty: preview.difficulty.as_str().to_string(),
            full_recipe: idea.full_recipe.as_ref().map(to_json).transpose()?,
            created_at: idea.created_at,
        })
    }
}

impl TryFrom<RecipeIdeaRow> for RecipeIdea {
    type Error = StoreError;

    fn try_from(row: RecipeIdeaRow) -> StoreResult<Self> {
        let difficulty: Difficulty = from_json(serde_json::Value::String(row.difficulty))?;
        let full_recipe: Option<FullRecipe> = row.full_recipe.map(from_json).transpose()?;

        Ok(Self {
            id: row.id,
            session_id: row.session_id,
            user_id: row.user_id,
            preview: RecipeIdeaPreview {
                title: row.title,
                description: row.description,
                key_ingredients: from_array(row.key_ingredients),
                estimated_time: from_int(row.estimated_time),
                servings: from_int(row.servings),
                equipment_needed: from_array(row.equipment_needed),
                dietary_tags: from_array(row.dietary_tags),
                difficulty,
            },
            full_recipe,
            created_at: row.created_at,
        })
    }
}

pub fn to_json<T: Serialize>(value: &T) -> StoreResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| StoreError::Corrupt(e.to_string()))
}

fn from_json<T: DeserializeOwned>(value: serde_json::Value) -> StoreResult<T> {
    serde_json::from_value(value).map_err(|e| StoreError::Corrupt(e.to_string()))
}

fn to_array(items: &[String]) -> Vec<Option<String>> {
    items.iter().cloned().map(Some).collect()
}

// Postgres arrays can hold NULLs; we never write them, so drop any we read.
fn from_array(items: Vec<Option<String>>) -> Vec<String> {
    items.into_iter().flatten().collect()
}

fn to_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn from_int(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}
