use axum::Json;
use kitchen_core::catalog::{self, Catalogs};

/// Option lists for the recipe and idea forms.
#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "All form option catalogs", body = Catalogs)
    )
)]
pub async fn get_catalog() -> Json<Catalogs> {
    Json(catalog::all())
}
