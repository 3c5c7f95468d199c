use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::dataset::DatasetError;
use crate::models::persistence::PersistenceError;

/// Request-level errors. Tagged variants so callers and tests can assert
/// on the error kind instead of matching on strings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid value for field {field}: {value}")]
    InvalidField { field: String, value: String },

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Every observed failure mode is reported as a 400 with an
        // `error` body; the process itself never dies on a bad request.
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// Startup errors. Any of these is fatal: the service refuses to serve
/// with a missing dataset or a half-built context.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("model artifact error: {0}")]
    Artifact(#[from] PersistenceError),

    #[error("{domain} dataset has {actual} feature columns, expected {expected}")]
    SchemaMismatch {
        domain: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_the_field() {
        let err = ApiError::MissingField("bmi".to_string());
        assert_eq!(err.to_string(), "Missing field: bmi");
    }

    #[test]
    fn invalid_field_message_includes_offending_value() {
        let err = ApiError::InvalidField {
            field: "glucose".to_string(),
            value: "high".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for field glucose: high");
    }
}
