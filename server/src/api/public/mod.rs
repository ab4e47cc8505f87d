pub mod auth;
pub mod catalog;
pub mod sitemap;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for public endpoints (no auth required)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(auth::signup::signup))
        .route("/api/auth/login", post(auth::login::login))
        .route("/api/catalog", get(catalog::get_catalog))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .route("/robots.txt", get(sitemap::robots))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login::login,
        auth::signup::signup,
        catalog::get_catalog,
        sitemap::sitemap,
        sitemap::robots,
    ),
    components(schemas(
        auth::login::LoginRequest,
        auth::login::LoginResponse,
        auth::signup::SignupRequest,
        auth::signup::SignupResponse,
        kitchen_core::catalog::Catalogs,
        kitchen_core::catalog::CatalogOption,
        kitchen_core::catalog::TimeOption,
    ))
)]
pub struct ApiDoc;
