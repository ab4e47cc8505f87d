use crate::access;
use crate::error::AppError;
use crate::store::Store;
use crate::AppState;
use axum::{extract::State, http::header, response::IntoResponse};
use chrono::{DateTime, Utc};
use kitchen_core::records::Recipe;
use quick_xml::errors::serialize::SeError;
use serde::Serialize;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Static pages: path, change frequency, priority.
const STATIC_PAGES: &[(&str, &str, &str)] = &[
    ("", "daily", "1.0"),
    ("/generate", "weekly", "0.9"),
    ("/marketplace", "daily", "0.8"),
    ("/sign-in", "monthly", "0.5"),
    ("/sign-up", "monthly", "0.5"),
];

#[derive(Debug, Serialize)]
#[serde(rename = "urlset")]
struct Urlset {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    url: Vec<UrlEntry>,
}

#[derive(Debug, Serialize)]
struct UrlEntry {
    loc: String,
    lastmod: String,
    changefreq: &'static str,
    priority: &'static str,
}

impl UrlEntry {
    fn new(
        loc: String,
        lastmod: DateTime<Utc>,
        changefreq: &'static str,
        priority: &'static str,
    ) -> Self {
        Self {
            loc,
            lastmod: lastmod.format("%Y-%m-%d").to_string(),
            changefreq,
            priority,
        }
    }
}

pub fn render_sitemap(
    site_url: &str,
    recipes: &[Recipe],
    now: DateTime<Utc>,
) -> Result<String, SeError> {
    let pages = STATIC_PAGES.iter().map(|(path, changefreq, priority)| {
        UrlEntry::new(format!("{}{}", site_url, path), now, changefreq, priority)
    });
    let recipes = recipes.iter().map(|recipe| {
        UrlEntry::new(
            format!("{}/recipe/{}", site_url, recipe.id),
            recipe.created_at,
            "weekly",
            "0.7",
        )
    });

    let urlset = Urlset {
        xmlns: SITEMAP_NS,
        url: pages.chain(recipes).collect(),
    };
    let body = quick_xml::se::to_string(&urlset)?;
    Ok(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}\n",
        body
    ))
}

/// Sitemap for the current published recipes. A store failure still yields
/// the static pages.
pub fn sitemap_xml(
    store: &dyn Store,
    site_url: &str,
    now: DateTime<Utc>,
) -> Result<String, SeError> {
    let recipes = access::list_published_recipes(store).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load published recipes for sitemap");
        Vec::new()
    });
    render_sitemap(site_url, &recipes, now)
}

pub fn render_robots(site_url: &str) -> String {
    format!(
        "User-agent: *\n\
         Allow: /\n\
         Disallow: /api/\n\
         Disallow: /my-recipes\n\
         Disallow: /sign-in\n\
         Disallow: /sign-up\n\
         \n\
         User-agent: Googlebot\n\
         Allow: /\n\
         Disallow: /api/\n\
         Disallow: /my-recipes\n\
         \n\
         Host: {site_url}\n\
         Sitemap: {site_url}/sitemap.xml\n"
    )
}

#[utoipa::path(
    get,
    path = "/sitemap.xml",
    tag = "public",
    responses(
        (status = 200, description = "Sitemap of static pages and published recipes", body = String, content_type = "application/xml")
    )
)]
pub async fn sitemap(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let xml = sitemap_xml(state.store.as_ref(), &state.config.site_url, Utc::now())
        .map_err(|e| AppError::internal("Failed to render sitemap", e))?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml))
}

#[utoipa::path(
    get,
    path = "/robots.txt",
    tag = "public",
    responses(
        (status = 200, description = "Crawler rules", body = String, content_type = "text/plain")
    )
)]
pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_robots(&state.config.site_url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreError, StoreResult, User};
    use kitchen_core::recipe::FullRecipe;
    use kitchen_core::records::{IdeaSession, RecipeIdea};
    use uuid::Uuid;

    /// Store whose every call fails, like a database that is down.
    struct UnavailableStore;

    fn down<T>() -> StoreResult<T> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    impl Store for UnavailableStore {
        fn create_user(&self, _: &str, _: &str) -> StoreResult<User> {
            down()
        }
        fn find_user_by_username(&self, _: &str) -> StoreResult<Option<User>> {
            down()
        }
        fn create_auth_session(&self, _: Uuid, _: &str, _: DateTime<Utc>) -> StoreResult<()> {
            down()
        }
        fn user_for_token_hash(&self, _: &str, _: DateTime<Utc>) -> StoreResult<Option<User>> {
            down()
        }
        fn insert_recipe(&self, _: &Recipe) -> StoreResult<()> {
            down()
        }
        fn get_recipe(&self, _: Uuid) -> StoreResult<Option<Recipe>> {
            down()
        }
        fn list_recipes_by_user(&self, _: Uuid) -> StoreResult<Vec<Recipe>> {
            down()
        }
        fn list_published_recipes(&self) -> StoreResult<Vec<Recipe>> {
            down()
        }
        fn set_recipe_published(
            &self,
            _: Uuid,
            _: bool,
            _: Option<DateTime<Utc>>,
        ) -> StoreResult<()> {
            down()
        }
        fn delete_recipe(&self, _: Uuid) -> StoreResult<()> {
            down()
        }
        fn insert_idea_session(&self, _: &IdeaSession) -> StoreResult<()> {
            down()
        }
        fn get_idea_session(&self, _: Uuid) -> StoreResult<Option<IdeaSession>> {
            down()
        }
        fn latest_idea_session(&self, _: Uuid) -> StoreResult<Option<IdeaSession>> {
            down()
        }
        fn touch_idea_session(&self, _: Uuid, _: DateTime<Utc>) -> StoreResult<()> {
            down()
        }
        fn delete_idea_session(&self, _: Uuid) -> StoreResult<()> {
            down()
        }
        fn insert_ideas(&self, _: &[RecipeIdea]) -> StoreResult<()> {
            down()
        }
        fn get_idea(&self, _: Uuid) -> StoreResult<Option<RecipeIdea>> {
            down()
        }
        fn list_ideas(&self, _: Uuid) -> StoreResult<Vec<RecipeIdea>> {
            down()
        }
        fn set_idea_full_recipe(&self, _: Uuid, _: &FullRecipe) -> StoreResult<()> {
            down()
        }
        fn delete_idea(&self, _: Uuid) -> StoreResult<()> {
            down()
        }
    }

    #[test]
    fn test_sitemap_lists_static_pages() {
        let xml = render_sitemap("https://example.test", &[], Utc::now()).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://example.test</loc>"));
        assert!(xml.contains("<loc>https://example.test/marketplace</loc>"));
        assert_eq!(xml.matches("<url>").count(), STATIC_PAGES.len());
    }

    #[test]
    fn test_site_url_is_escaped() {
        let xml = render_sitemap("https://example.test/?a=1&b=2", &[], Utc::now()).unwrap();
        assert!(xml.contains("a=1&amp;b=2"));
    }

    #[test]
    fn test_store_failure_still_lists_static_pages() {
        let xml = sitemap_xml(&UnavailableStore, "https://example.test", Utc::now()).unwrap();
        assert_eq!(xml.matches("<url>").count(), STATIC_PAGES.len());
        assert!(!xml.contains("/recipe/"));
    }

    #[test]
    fn test_robots_disallows_private_pages() {
        let robots = render_robots("https://example.test");
        assert!(robots.contains("Disallow: /api/"));
        assert!(robots.contains("Disallow: /my-recipes"));
        assert!(robots.contains("Sitemap: https://example.test/sitemap.xml"));
    }
}
