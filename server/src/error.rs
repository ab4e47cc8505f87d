//! Handler error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kitchen_core::ai::{AiError, GenerationError};
use kitchen_core::RequestErrors;
use thiserror::Error;

use crate::access::AccessError;
use crate::api::ErrorResponse;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{error}")]
    BadRequest {
        error: &'static str,
        details: RequestErrors,
    },

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Not authorized")]
    Forbidden,

    #[error("{0}")]
    Conflict(&'static str),

    /// The model provider failed or could not be reached.
    #[error("AI provider request failed: {0}")]
    Upstream(#[source] AiError),

    /// Unexpected failure. The message is shown to the client, the source is
    /// only logged.
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AppError {
    pub fn invalid(error: &'static str, details: RequestErrors) -> Self {
        AppError::BadRequest { error, details }
    }

    pub fn internal(
        message: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Internal {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Map a generation failure. Parse and shape failures get the same
    /// retry message per operation; the raw model text is logged only.
    pub fn generation(
        err: GenerationError,
        parse_message: &'static str,
        invalid_message: &'static str,
    ) -> Self {
        match err {
            GenerationError::Ai(e) => AppError::Upstream(e),
            GenerationError::Contract {
                prompt_name,
                raw,
                source,
            } => {
                tracing::error!(
                    prompt = prompt_name,
                    error = %source,
                    raw = %raw,
                    "Model output rejected"
                );
                let message = if source.is_parse_failure() {
                    parse_message
                } else {
                    invalid_message
                };
                AppError::Internal {
                    message,
                    source: None,
                }
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::internal("Internal server error", e)
    }
}

impl From<AccessError> for AppError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::NotFound(what) => AppError::NotFound(what),
            AccessError::Forbidden => AppError::Forbidden,
            AccessError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Upstream(e) => tracing::error!(error = %e, "AI provider request failed"),
            AppError::Internal {
                message,
                source: Some(source),
            } => tracing::error!(error = %source, "{}", message),
            _ => {}
        }

        let body = match self {
            AppError::BadRequest { error, details } => ErrorResponse {
                error: error.to_string(),
                details: Some(details),
            },
            AppError::Upstream(_) => {
                ErrorResponse::new("An unexpected error occurred. Please try again.")
            }
            other => ErrorResponse::new(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_core::ContractError;

    fn contract_failure(source: ContractError) -> GenerationError {
        GenerationError::Contract {
            prompt_name: "new_recipe",
            raw: "not json".to_string(),
            source,
        }
    }

    #[test]
    fn test_contract_failures_are_internal_errors() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::generation(
            contract_failure(ContractError::Parse(parse_err)),
            "parse",
            "invalid",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "parse");

        let err = AppError::generation(
            contract_failure(ContractError::Shape(
                serde_json::from_value::<u32>(serde_json::json!("two")).unwrap_err(),
            )),
            "parse",
            "invalid",
        );
        assert_eq!(err.to_string(), "invalid");
    }

    #[test]
    fn test_provider_failures_are_generic_internal_errors() {
        let err = AppError::generation(
            GenerationError::Ai(AiError::Api("timeout".to_string())),
            "parse",
            "invalid",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
