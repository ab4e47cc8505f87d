//! PostgreSQL storage via diesel.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use kitchen_core::recipe::FullRecipe;
use kitchen_core::records::{IdeaSession, Recipe, RecipeIdea};
use uuid::Uuid;

use super::{Store, StoreError, StoreResult, User};
use crate::db::DbPool;
use crate::models::{
    to_json, IdeaSessionRow, NewAuthSession, NewUser, RecipeIdeaRow, RecipeRow, UserRow,
};
use crate::schema::{auth_sessions, recipe_idea_sessions, recipe_ideas, recipes, users};

diesel::define_sql_function!(fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text);

type PgConn = PooledConnection<ConnectionManager<PgConnection>>;

impl From<DieselError> for StoreError {
    fn from(e: DieselError) -> Self {
        StoreError::Database(e.to_string())
    }
}

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> StoreResult<PgConn> {
        self.pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))
    }
}

/// Each store call runs inside a `db.query` span so per-request query counts
/// can be tracked.
macro_rules! query {
    ($op:literal, $body:expr) => {{
        let _span = tracing::debug_span!("db.query", op = $op).entered();
        $body
    }};
}

impl Store for PgStore {
    fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User> {
        let mut conn = self.conn()?;
        query!("create_user", {
            diesel::insert_into(users::table)
                .values(&NewUser {
                    username,
                    password_hash,
                })
                .returning(UserRow::as_returning())
                .get_result(&mut conn)
                .map(User::from)
                .map_err(|e| match e {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StoreError::UsernameTaken
                    }
                    e => e.into(),
                })
        })
    }

    fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let mut conn = self.conn()?;
        query!("find_user_by_username", {
            Ok(users::table
                .filter(lower(users::username).eq(username.to_lowercase()))
                .select(UserRow::as_select())
                .first(&mut conn)
                .optional()?
                .map(User::from))
        })
    }

    fn create_auth_session(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut conn = self.conn()?;
        query!("create_auth_session", {
            diesel::insert_into(auth_sessions::table)
                .values(&NewAuthSession {
                    user_id,
                    token_hash,
                    expires_at,
                })
                .execute(&mut conn)?;
            Ok(())
        })
    }

    fn user_for_token_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<User>> {
        let mut conn = self.conn()?;
        query!("user_for_token_hash", {
            Ok(auth_sessions::table
                .inner_join(users::table)
                .filter(auth_sessions::token_hash.eq(token_hash))
                .filter(auth_sessions::expires_at.gt(now))
                .select(UserRow::as_select())
                .first(&mut conn)
                .optional()?
                .map(User::from))
        })
    }

    fn insert_recipe(&self, recipe: &Recipe) -> StoreResult<()> {
        let row = RecipeRow::from_recipe(recipe)?;
        let mut conn = self.conn()?;
        query!("insert_recipe", {
            diesel::insert_into(recipes::table)
                .values(&row)
                .execute(&mut conn)?;
            Ok(())
        })
    }

    fn get_recipe(&self, id: Uuid) -> StoreResult<Option<Recipe>> {
        let mut conn = self.conn()?;
        let row = query!("get_recipe", {
            recipes::table
                .find(id)
                .select(RecipeRow::as_select())
                .first(&mut conn)
                .optional()?
        });
        row.map(Recipe::try_from).transpose()
    }

    fn list_recipes_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Recipe>> {
        let mut conn = self.conn()?;
        let rows = query!("list_recipes_by_user", {
            recipes::table
                .filter(recipes::user_id.eq(user_id))
                .order(recipes::created_at.desc())
                .select(RecipeRow::as_select())
                .load(&mut conn)?
        });
        rows.into_iter().map(Recipe::try_from).collect()
    }

    fn list_published_recipes(&self) -> StoreResult<Vec<Recipe>> {
        let mut conn = self.conn()?;
        let rows = query!("list_published_recipes", {
            recipes::table
                .filter(recipes::is_published.eq(true))
                .order(recipes::published_at.desc())
                .select(RecipeRow::as_select())
                .load(&mut conn)?
        });
        rows.into_iter().map(Recipe::try_from).collect()
    }

    fn set_recipe_published(
        &self,
        id: Uuid,
        is_published: bool,
        published_at: Option<DateTime<Utc>>,
    ) -> StoreResult<()> {
        let mut conn = self.conn()?;
        query!("set_recipe_published", {
            diesel::update(recipes::table.find(id))
                .set((
                    recipes::is_published.eq(is_published),
                    recipes::published_at.eq(published_at),
                ))
                .execute(&mut conn)?;
            Ok(())
        })
    }

    fn delete_recipe(&self, id: Uuid) -> StoreResult<()> {
        let mut conn = self.conn()?;
        query!("delete_recipe", {
            diesel::delete(recipes::table.find(id)).execute(&mut conn)?;
            Ok(())
        })
    }

    fn insert_idea_session(&self, session: &IdeaSession) -> StoreResult<()> {
        let row = IdeaSessionRow::from_session(session)?;
        let mut conn = self.conn()?;
        query!("insert_idea_session", {
            diesel::insert_into(recipe_idea_sessions::table)
                .values(&row)
                .execute(&mut conn)?;
            Ok(())
        })
    }

    fn get_idea_session(&self, id: Uuid) -> StoreResult<Option<IdeaSession>> {
        let mut conn = self.conn()?;
        let row = query!("get_idea_session", {
            recipe_idea_sessions::table
                .find(id)
                .select(IdeaSessionRow::as_select())
                .first(&mut conn)
                .optional()?
        });
        row.map(IdeaSession::try_from).transpose()
    }

    fn latest_idea_session(&self, user_id: Uuid) -> StoreResult<Option<IdeaSession>> {
        let mut conn = self.conn()?;
        let row = query!("latest_idea_session", {
            recipe_idea_sessions::table
                .filter(recipe_idea_sessions::user_id.eq(user_id))
                .order(recipe_idea_sessions::created_at.desc())
                .select(IdeaSessionRow::as_select())
                .first(&mut conn)
                .optional()?
        });
        row.map(IdeaSession::try_from).transpose()
    }

    fn touch_idea_session(&self, id: Uuid, updated_at: DateTime<Utc>) -> StoreResult<()> {
        let mut conn = self.conn()?;
        query!("touch_idea_session", {
            diesel::update(recipe_idea_sessions::table.find(id))
                .set(recipe_idea_sessions::updated_at.eq(updated_at))
                .execute(&mut conn)?;
            Ok(())
        })
    }

    fn delete_idea_session(&self, id: Uuid) -> StoreResult<()> {
        let mut conn = self.conn()?;
        query!("delete_idea_session", {
            diesel::delete(recipe_idea_sessions::table.find(id)).execute(&mut conn)?;
            Ok(())
        })
    }

    fn insert_ideas(&self, ideas: &[RecipeIdea]) -> StoreResult<()> {
        if ideas.is_empty() {
            return Ok(());
        }
        let rows = ideas
            .iter()
            .map(RecipeIdeaRow::from_idea)
            .collect::<StoreResult<Vec<_>>>()?;
        let mut conn = self.conn()?;
        query!("insert_ideas", {
            diesel::insert_into(recipe_ideas::table)
                .values(&rows)
                .execute(&mut conn)?;
            Ok(())
        })
    }

    fn get_idea(&self, id: Uuid) -> StoreResult<Option<RecipeIdea>> {
        let mut conn = self.conn()?;
        let row = query!("get_idea", {
            recipe_ideas::table
                .find(id)
                .select(RecipeIdeaRow::as_select())
                .first(&mut conn)
                .optional()?
        });
        row.map(RecipeIdea::try_from).transpose()
    }

    fn list_ideas(&self, session_id: Uuid) -> StoreResult<Vec<RecipeIdea>> {
        let mut conn = self.conn()?;
        let rows = query!("list_ideas", {
            recipe_ideas::table
                .filter(recipe_ideas::session_id.eq(session_id))
                .order(recipe_ideas::created_at.desc())
                .select(RecipeIdeaRow::as_select())
                .load(&mut conn)?
        });
        rows.into_iter().map(RecipeIdea::try_from).collect()
    }

    fn set_idea_full_recipe(&self, id: Uuid, full_recipe: &FullRecipe) -> StoreResult<()> {
        let value = to_json(full_recipe)?;
        let mut conn = self.conn()?;
        query!("set_idea_full_recipe", {
            diesel::update(recipe_ideas::table.find(id))
                .set(recipe_ideas::full_recipe.eq(Some(value)))
                .execute(&mut conn)?;
            Ok(())
        })
    }

    fn delete_idea(&self, id: Uuid) -> StoreResult<()> {
        let mut conn = self.conn()?;
        query!("delete_idea", {
            diesel::delete(recipe_ideas::table.find(id)).execute(&mut conn)?;
            Ok(())
        })
    }
}
