//! Owner-checked operations over the [`Store`].
//!
//! Reads of another user's private data look exactly like a missing record
//! (404). Mutations of another user's data are refused with 403.

use chrono::Utc;
use kitchen_core::forms::SessionInputs;
use kitchen_core::recipe::{FullRecipe, RecipeIdeaPreview};
use kitchen_core::records::{IdeaSession, NewRecipe, Recipe, RecipeIdea};
use thiserror::Error;
use uuid::Uuid;

use crate::store::{Store, StoreError};

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Not authorized")]
    Forbidden,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type AccessResult<T> = Result<T, AccessError>;

const RECIPE_NOT_FOUND: &str = "Recipe not found";
const SESSION_NOT_FOUND: &str = "Session not found";
const IDEA_NOT_FOUND: &str = "Idea not found";

// ---- Recipes ----

pub fn save_recipe(store: &dyn Store, user_id: Uuid, content: NewRecipe) -> AccessResult<Recipe> {
    let recipe = Recipe::new(user_id, content, Utc::now());
    store.insert_recipe(&recipe)?;
    tracing::info!(recipe_id = %recipe.id, %user_id, "Saved recipe");
    Ok(recipe)
}

pub fn list_my_recipes(store: &dyn Store, user_id: Uuid) -> AccessResult<Vec<Recipe>> {
    Ok(store.list_recipes_by_user(user_id)?)
}

/// Anyone may read a published recipe; only the owner may read an
/// unpublished one.
pub fn get_recipe(store: &dyn Store, viewer: Option<Uuid>, id: Uuid) -> AccessResult<Recipe> {
    let recipe = store
        .get_recipe(id)?
        .ok_or(AccessError::NotFound(RECIPE_NOT_FOUND))?;

    if recipe.is_published || viewer == Some(recipe.user_id) {
        Ok(recipe)
    } else {
        Err(AccessError::NotFound(RECIPE_NOT_FOUND))
    }
}

pub fn list_published_recipes(store: &dyn Store) -> AccessResult<Vec<Recipe>> {
    Ok(store.list_published_recipes()?)
}

fn owned_recipe(store: &dyn Store, user_id: Uuid, id: Uuid) -> AccessResult<Recipe> {
    let recipe = store
        .get_recipe(id)?
        .ok_or(AccessError::NotFound(RECIPE_NOT_FOUND))?;
    if recipe.user_id != user_id {
        return Err(AccessError::Forbidden);
    }
    Ok(recipe)
}

pub fn toggle_publish(store: &dyn Store, user_id: Uuid, id: Uuid) -> AccessResult<Recipe> {
    let mut recipe = owned_recipe(store, user_id, id)?;
    recipe.toggle_publish(Utc::now());
    store.set_recipe_published(id, recipe.is_published, recipe.published_at)?;
    tracing::info!(recipe_id = %id, is_published = recipe.is_published, "Toggled publish");
    Ok(recipe)
}

pub fn delete_recipe(store: &dyn Store, user_id: Uuid, id: Uuid) -> AccessResult<()> {
    owned_recipe(store, user_id, id)?;
    store.delete_recipe(id)?;
    Ok(())
}

// ---- Idea sessions ----

pub fn create_session(
    store: &dyn Store,
    user_id: Uuid,
    inputs: SessionInputs,
) -> AccessResult<IdeaSession> {
    let session = IdeaSession::new(user_id, inputs, Utc::now());
    store.insert_idea_session(&session)?;
    Ok(session)
}

/// The user's most recently created session, if any.
pub fn active_session(store: &dyn Store, user_id: Uuid) -> AccessResult<Option<IdeaSession>> {
    Ok(store.latest_idea_session(user_id)?)
}

/// Another user's session looks the same as a missing one, for reads and
/// writes alike.
fn owned_session(store: &dyn Store, user_id: Uuid, id: Uuid) -> AccessResult<IdeaSession> {
    store
        .get_idea_session(id)?
        .filter(|s| s.user_id == user_id)
        .ok_or(AccessError::NotFound(SESSION_NOT_FOUND))
}

pub fn session_ideas(
    store: &dyn Store,
    user_id: Uuid,
    session_id: Uuid,
) -> AccessResult<Vec<RecipeIdea>> {
    owned_session(store, user_id, session_id)?;
    Ok(store.list_ideas(session_id)?)
}

pub fn add_ideas(
    store: &dyn Store,
    user_id: Uuid,
    session_id: Uuid,
    previews: Vec<RecipeIdeaPreview>,
) -> AccessResult<Vec<RecipeIdea>> {
    let session = owned_session(store, user_id, session_id)?;

    let now = Utc::now();
    let ideas: Vec<RecipeIdea> = previews
        .into_iter()
        .map(|preview| RecipeIdea::new(&session, preview, now))
        .collect();
    store.insert_ideas(&ideas)?;
    store.touch_idea_session(session_id, now)?;

    tracing::debug!(%session_id, count = ideas.len(), "Added ideas");
    Ok(ideas)
}

fn delete_session_ideas(store: &dyn Store, session_id: Uuid) -> AccessResult<usize> {
    let ideas = store.list_ideas(session_id)?;
    for idea in &ideas {
        store.delete_idea(idea.id)?;
    }
    Ok(ideas.len())
}

/// Remove every idea in the session, keeping the session itself.
pub fn clear_session(store: &dyn Store, user_id: Uuid, session_id: Uuid) -> AccessResult<()> {
    owned_session(store, user_id, session_id)?;
    let removed = delete_session_ideas(store, session_id)?;
    store.touch_idea_session(session_id, Utc::now())?;
    tracing::debug!(%session_id, removed, "Cleared session");
    Ok(())
}

pub fn delete_session(store: &dyn Store, user_id: Uuid, session_id: Uuid) -> AccessResult<()> {
    owned_session(store, user_id, session_id)?;
    delete_session_ideas(store, session_id)?;
    store.delete_idea_session(session_id)?;
    Ok(())
}

// ---- Ideas ----

pub fn get_idea(store: &dyn Store, user_id: Uuid, id: Uuid) -> AccessResult<RecipeIdea> {
    store
        .get_idea(id)?
        .filter(|i| i.user_id == user_id)
        .ok_or(AccessError::NotFound(IDEA_NOT_FOUND))
}

pub fn attach_full_recipe(
    store: &dyn Store,
    user_id: Uuid,
    id: Uuid,
    full_recipe: FullRecipe,
) -> AccessResult<RecipeIdea> {
    let mut idea = get_idea(store, user_id, id)?;
    store.set_idea_full_recipe(id, &full_recipe)?;
    idea.full_recipe = Some(full_recipe);
    Ok(idea)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use kitchen_core::recipe::{Difficulty, RecipeStep, ShoppingList};
    use kitchen_core::records::RecipeInputs;

    fn content(title: &str) -> NewRecipe {
        NewRecipe {
            title: title.to_string(),
            description: "A test recipe.".to_string(),
            inputs: RecipeInputs::default(),
            prep_time: 0,
            cook_time: 15,
            servings: 2,
            equipment_used: vec!["Kettle".to_string()],
            shopping_list: ShoppingList {
                have: vec!["noodles".to_string()],
                need: vec!["spring onion".to_string()],
                optional: vec![],
            },
            prep_group: vec![],
            steps: vec![],
            substitutions: vec![],
            tips: None,
        }
    }

    fn preview(title: &str) -> RecipeIdeaPreview {
        RecipeIdeaPreview {
            title: title.to_string(),
            description: "An idea.".to_string(),
            key_ingredients: vec!["rice".to_string()],
            estimated_time: 20,
            servings: 2,
            equipment_needed: vec!["Kettle".to_string()],
            dietary_tags: vec![],
            difficulty: Difficulty::Easy,
        }
    }

    fn full_recipe() -> FullRecipe {
        FullRecipe {
            shopping: ShoppingList {
                have: vec![],
                need: vec!["rice".to_string()],
                optional: vec![],
            },
            prep_group: vec![],
            steps: vec![RecipeStep {
                title: "Cook".to_string(),
                detail: "Cook the rice.".to_string(),
                time_minutes: 15,
            }],
            substitutions: vec![],
            tips: vec![],
        }
    }

    #[test]
    fn test_unpublished_recipe_is_private() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let recipe = save_recipe(&store, owner, content("Mug Omelette")).unwrap();

        assert!(get_recipe(&store, Some(owner), recipe.id).is_ok());
        assert!(matches!(
            get_recipe(&store, Some(other), recipe.id),
            Err(AccessError::NotFound(_))
        ));
        assert!(matches!(
            get_recipe(&store, None, recipe.id),
            Err(AccessError::NotFound(_))
        ));

        toggle_publish(&store, owner, recipe.id).unwrap();
        assert!(get_recipe(&store, None, recipe.id).is_ok());
        assert!(get_recipe(&store, Some(other), recipe.id).is_ok());
    }

    #[test]
    fn test_toggle_publish_flips_flag_and_timestamp() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let recipe = save_recipe(&store, owner, content("Kettle Noodles")).unwrap();
        assert!(!recipe.is_published);

        let published = toggle_publish(&store, owner, recipe.id).unwrap();
        assert!(published.is_published);
        assert!(published.published_at.is_some());
        assert_eq!(list_published_recipes(&store).unwrap().len(), 1);

        let unpublished = toggle_publish(&store, owner, recipe.id).unwrap();
        assert!(!unpublished.is_published);
        assert!(unpublished.published_at.is_none());
        assert!(list_published_recipes(&store).unwrap().is_empty());
    }

    #[test]
    fn test_non_owner_cannot_mutate_recipe() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let recipe = save_recipe(&store, owner, content("Couscous")).unwrap();

        let intruder = Uuid::new_v4();
        assert!(matches!(
            toggle_publish(&store, intruder, recipe.id),
            Err(AccessError::Forbidden)
        ));
        assert!(matches!(
            delete_recipe(&store, intruder, recipe.id),
            Err(AccessError::Forbidden)
        ));
        assert!(matches!(
            delete_recipe(&store, owner, Uuid::new_v4()),
            Err(AccessError::NotFound("Recipe not found"))
        ));

        delete_recipe(&store, owner, recipe.id).unwrap();
        assert!(list_my_recipes(&store, owner).unwrap().is_empty());
    }

    #[test]
    fn test_clear_session_removes_ideas_and_keeps_session() {
        let store = InMemoryStore::new();
        let user = Uuid::new_v4();
        let session = create_session(&store, user, SessionInputs::default()).unwrap();
        add_ideas(&store, user, session.id, vec![preview("A"), preview("B")]).unwrap();
        assert_eq!(session_ideas(&store, user, session.id).unwrap().len(), 2);

        clear_session(&store, user, session.id).unwrap();

        assert!(session_ideas(&store, user, session.id).unwrap().is_empty());
        let active = active_session(&store, user).unwrap().unwrap();
        assert_eq!(active.id, session.id);
        assert!(active.updated_at >= session.updated_at);
    }

    #[test]
    fn test_delete_session_removes_ideas() {
        let store = InMemoryStore::new();
        let user = Uuid::new_v4();
        let session = create_session(&store, user, SessionInputs::default()).unwrap();
        let ideas = add_ideas(&store, user, session.id, vec![preview("A")]).unwrap();

        delete_session(&store, user, session.id).unwrap();

        assert!(active_session(&store, user).unwrap().is_none());
        assert!(store.get_idea(ideas[0].id).unwrap().is_none());
        assert!(store.list_ideas(session.id).unwrap().is_empty());
    }

    #[test]
    fn test_sessions_and_ideas_are_private() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let session = create_session(&store, owner, SessionInputs::default()).unwrap();
        let ideas = add_ideas(&store, owner, session.id, vec![preview("A")]).unwrap();

        assert!(matches!(
            session_ideas(&store, other, session.id),
            Err(AccessError::NotFound("Session not found"))
        ));
        assert!(matches!(
            get_idea(&store, other, ideas[0].id),
            Err(AccessError::NotFound("Idea not found"))
        ));
        assert_eq!(session_ideas(&store, owner, session.id).unwrap().len(), 1);
    }

    #[test]
    fn test_foreign_session_mutations_look_missing() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let session = create_session(&store, owner, SessionInputs::default()).unwrap();
        let ideas = add_ideas(&store, owner, session.id, vec![preview("A")]).unwrap();

        assert!(matches!(
            add_ideas(&store, other, session.id, vec![preview("B")]),
            Err(AccessError::NotFound("Session not found"))
        ));
        assert!(matches!(
            clear_session(&store, other, session.id),
            Err(AccessError::NotFound("Session not found"))
        ));
        assert!(matches!(
            delete_session(&store, other, session.id),
            Err(AccessError::NotFound("Session not found"))
        ));
        assert!(matches!(
            attach_full_recipe(&store, other, ideas[0].id, full_recipe()),
            Err(AccessError::NotFound("Idea not found"))
        ));

        // Nothing changed for the owner
        let stored = get_idea(&store, owner, ideas[0].id).unwrap();
        assert!(stored.full_recipe.is_none());
        assert_eq!(session_ideas(&store, owner, session.id).unwrap().len(), 1);
    }

    #[test]
    fn test_attach_full_recipe() {
        let store = InMemoryStore::new();
        let user = Uuid::new_v4();
        let session = create_session(&store, user, SessionInputs::default()).unwrap();
        let ideas = add_ideas(&store, user, session.id, vec![preview("A")]).unwrap();
        assert!(ideas[0].full_recipe.is_none());

        let updated = attach_full_recipe(&store, user, ideas[0].id, full_recipe()).unwrap();
        assert_eq!(updated.full_recipe, Some(full_recipe()));

        let stored = get_idea(&store, user, ideas[0].id).unwrap();
        assert_eq!(stored.full_recipe, Some(full_recipe()));
    }
}
