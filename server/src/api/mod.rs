pub mod ai;
pub mod idea_sessions;
pub mod ideas;
pub mod public;
pub mod recipes;

use axum::body::Bytes;
use kitchen_core::{decode_request, RequestErrors};
use serde::de::DeserializeOwned;
use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};
use validator::Validate;

use crate::error::AppError;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Present on 400 responses for rejected request bodies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<RequestErrors>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

/// Decode and validate a JSON request body. Malformed JSON, type mismatches
/// and constraint failures all become a 400 with `error` as the message.
pub(crate) fn decode<T>(body: &Bytes, error: &'static str) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate,
{
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| AppError::invalid(error, RequestErrors::from_decode(&e)))?;
    decode_request(value).map_err(|details| AppError::invalid(error, details))
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Traveler's Kitchen API"),
        components(schemas(ErrorResponse, RequestErrors))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    // Add security scheme
    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        public::ApiDoc::openapi(),
        ai::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        idea_sessions::ApiDoc::openapi(),
        ideas::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        // Merge paths
        spec.paths.paths.extend(module_spec.paths.paths);

        // Merge components (schemas)
        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_core::forms::RecipeForm;

    #[test]
    fn test_decode_rejects_malformed_json() {
        let err = decode::<RecipeForm>(&Bytes::from_static(b"{not json"), "Invalid form data")
            .unwrap_err();
        match err {
            AppError::BadRequest { error, details } => {
                assert_eq!(error, "Invalid form data");
                assert_eq!(details.form_errors.len(), 1);
            }
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_openapi_includes_every_module() {
        let spec = openapi();
        for path in [
            "/api/auth/signup",
            "/api/ai/new-recipe",
            "/api/recipes/{id}",
            "/api/idea-sessions/active",
            "/api/ideas/{id}/full-recipe",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
