//! In-memory storage implementation

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use kitchen_core::recipe::FullRecipe;
use kitchen_core::records::{IdeaSession, Recipe, RecipeIdea};
use uuid::Uuid;

use super::{Store, StoreError, StoreResult, User};

struct AuthSession {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    auth_sessions: HashMap<String, AuthSession>,
    recipes: Vec<Recipe>,
    idea_sessions: Vec<IdeaSession>,
    ideas: Vec<RecipeIdea>,
}

/// In-memory store. Rows are kept in insertion order so "newest first"
/// listings stay stable when timestamps tie.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Store for InMemoryStore {
    fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User> {
        let mut tables = self.write();
        if tables
            .users
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(username))
        {
            return Err(StoreError::UsernameTaken);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .read()
            .users
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    fn create_auth_session(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut tables = self.write();
        let now = Utc::now();
        tables.auth_sessions.retain(|_, s| s.expires_at > now);
        tables.auth_sessions.insert(
            token_hash.to_string(),
            AuthSession {
                user_id,
                expires_at,
            },
        );
        Ok(())
    }

    fn user_for_token_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<User>> {
        let tables = self.read();
        Ok(tables
            .auth_sessions
            .get(token_hash)
            .filter(|s| s.expires_at > now)
            .and_then(|s| tables.users.get(&s.user_id))
            .cloned())
    }

    fn insert_recipe(&self, recipe: &Recipe) -> StoreResult<()> {
        self.write().recipes.push(recipe.clone());
        Ok(())
    }

    fn get_recipe(&self, id: Uuid) -> StoreResult<Option<Recipe>> {
        Ok(self.read().recipes.iter().find(|r| r.id == id).cloned())
    }

    fn list_recipes_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Recipe>> {
        let mut recipes: Vec<Recipe> = self
            .read()
            .recipes
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recipes)
    }

    fn list_published_recipes(&self) -> StoreResult<Vec<Recipe>> {
        let mut recipes: Vec<Recipe> = self
            .read()
            .recipes
            .iter()
            .rev()
            .filter(|r| r.is_published)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(recipes)
    }

    fn set_recipe_published(
        &self,
        id: Uuid,
        is_published: bool,
        published_at: Option<DateTime<Utc>>,
    ) -> StoreResult<()> {
        if let Some(recipe) = self.write().recipes.iter_mut().find(|r| r.id == id) {
            recipe.is_published = is_published;
            recipe.published_at = published_at;
        }
        Ok(())
    }

    fn delete_recipe(&self, id: Uuid) -> StoreResult<()> {
        self.write().recipes.retain(|r| r.id != id);
        Ok(())
    }

    fn insert_idea_session(&self, session: &IdeaSession) -> StoreResult<()> {
        self.write().idea_sessions.push(session.clone());
        Ok(())
    }

    fn get_idea_session(&self, id: Uuid) -> StoreResult<Option<IdeaSession>> {
        Ok(self
            .read()
            .idea_sessions
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    fn latest_idea_session(&self, user_id: Uuid) -> StoreResult<Option<IdeaSession>> {
        Ok(self
            .read()
            .idea_sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .max_by_key(|s| s.created_at)
            .cloned())
    }

    fn touch_idea_session(&self, id: Uuid, updated_at: DateTime<Utc>) -> StoreResult<()> {
        if let Some(session) = self.write().idea_sessions.iter_mut().find(|s| s.id == id) {
            session.updated_at = updated_at;
        }
        Ok(())
    }

    fn delete_idea_session(&self, id: Uuid) -> StoreResult<()> {
        self.write().idea_sessions.retain(|s| s.id != id);
        Ok(())
    }

    fn insert_ideas(&self, ideas: &[RecipeIdea]) -> StoreResult<()> {
        self.write().ideas.extend_from_slice(ideas);
        Ok(())
    }

    fn get_idea(&self, id: Uuid) -> StoreResult<Option<RecipeIdea>> {
        Ok(self.read().ideas.iter().find(|i| i.id == id).cloned())
    }

    fn list_ideas(&self, session_id: Uuid) -> StoreResult<Vec<RecipeIdea>> {
        let mut ideas: Vec<RecipeIdea> = self
            .read()
            .ideas
            .iter()
            .rev()
            .filter(|i| i.session_id == session_id)
            .cloned()
            .collect();
        ideas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ideas)
    }

    fn set_idea_full_recipe(&self, id: Uuid, full_recipe: &FullRecipe) -> StoreResult<()> {
        if let Some(idea) = self.write().ideas.iter_mut().find(|i| i.id == id) {
            idea.full_recipe = Some(full_recipe.clone());
        }
        Ok(())
    }

    fn delete_idea(&self, id: Uuid) -> StoreResult<()> {
        self.write().ideas.retain(|i| i.id != id);
        Ok(())
    }
}
