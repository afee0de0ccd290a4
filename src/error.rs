use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::envelope::ResponseEnvelope;
use crate::llm::CompletionError;

pub const MISSING_FIELDS: &str = "Missing fields";

/// The two ways a translation request can fail
#[derive(Error, Debug)]
pub enum AppError {
    /// One or more of `text`, `fromLang`, `toLang` absent or falsy
    #[error("{}", MISSING_FIELDS)]
    Validation,

    /// Anything that went wrong talking to or reading from the provider
    #[error("{0}")]
    Invocation(#[from] CompletionError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation => StatusCode::BAD_REQUEST,
            AppError::Invocation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ResponseEnvelope::Failure(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AppError::Validation;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), MISSING_FIELDS);
    }

    #[test]
    fn invocation_keeps_provider_message() {
        let err = AppError::from(CompletionError::MissingContent);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Provider completion has no message content");
    }
}
