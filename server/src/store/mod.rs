//! Storage abstractions.
//!
//! Handlers never talk to a database directly. They go through [`Store`],
//! implemented by [`PgStore`] (diesel/PostgreSQL) and [`InMemoryStore`]
//! (tests and database-less development). The store does no ownership
//! checks; those live in [`crate::access`].

mod memory;
mod pg;

pub use memory::InMemoryStore;
pub use pg::PgStore;

use chrono::{DateTime, Utc};
use kitchen_core::recipe::FullRecipe;
use kitchen_core::records::{IdeaSession, Recipe, RecipeIdea};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt stored value: {0}")]
    Corrupt(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

pub trait Store: Send + Sync {
    /// Create a user. Usernames are unique case-insensitively.
    fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User>;

    /// Look up a user by username, case-insensitively.
    fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    fn create_auth_session(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// The user owning an auth session that is still valid at `now`.
    fn user_for_token_hash(&self, token_hash: &str, now: DateTime<Utc>)
        -> StoreResult<Option<User>>;

    fn insert_recipe(&self, recipe: &Recipe) -> StoreResult<()>;

    fn get_recipe(&self, id: Uuid) -> StoreResult<Option<Recipe>>;

    /// A user's recipes, newest first.
    fn list_recipes_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Recipe>>;

    /// Published recipes, most recently published first.
    fn list_published_recipes(&self) -> StoreResult<Vec<Recipe>>;

    fn set_recipe_published(
        &self,
        id: Uuid,
        is_published: bool,
        published_at: Option<DateTime<Utc>>,
    ) -> StoreResult<()>;

    fn delete_recipe(&self, id: Uuid) -> StoreResult<()>;

    fn insert_idea_session(&self, session: &IdeaSession) -> StoreResult<()>;

    fn get_idea_session(&self, id: Uuid) -> StoreResult<Option<IdeaSession>>;

    /// The user's most recently created session.
    fn latest_idea_session(&self, user_id: Uuid) -> StoreResult<Option<IdeaSession>>;

    fn touch_idea_session(&self, id: Uuid, updated_at: DateTime<Utc>) -> StoreResult<()>;

    /// Delete the session row only. Callers delete its ideas first.
    fn delete_idea_session(&self, id: Uuid) -> StoreResult<()>;

    fn insert_ideas(&self, ideas: &[RecipeIdea]) -> StoreResult<()>;

    fn get_idea(&self, id: Uuid) -> StoreResult<Option<RecipeIdea>>;

    /// Ideas in a session, newest first.
    fn list_ideas(&self, session_id: Uuid) -> StoreResult<Vec<RecipeIdea>>;

    fn set_idea_full_recipe(&self, id: Uuid, full_recipe: &FullRecipe) -> StoreResult<()>;

    fn delete_idea(&self, id: Uuid) -> StoreResult<()>;
}
