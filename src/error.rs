use std::collections::HashMap;

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::dao::storage::StoreError;

/// Errors produced by the service layer, classified for HTTP mapping.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Client payload violated entity or filter rules; field messages
    /// attached.
    #[error("validation failed")]
    Validation(HashMap<String, String>),
    /// Requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The record changed, or vanished, since the caller read it.
    #[error("edit conflict")]
    EditConflict,
    /// The store failed in a way the client cannot act on.
    #[error("storage failure")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RecordNotFound => {
                ServiceError::NotFound("the requested resource could not be found".into())
            }
            StoreError::EditConflict => ServiceError::EditConflict,
            other => ServiceError::Storage(other),
        }
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Concurrent edit detected.
    #[error("unable to update the record due to an edit conflict, please try again")]
    EditConflict,
    /// Payload failed validation; field messages attached.
    #[error("the request contains invalid fields")]
    Validation(HashMap<String, String>),
    /// Opaque server-side failure.
    #[error("the server encountered a problem and could not process your request")]
    Internal,
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(fields) => AppError::Validation(fields),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::EditConflict => AppError::EditConflict,
            ServiceError::Storage(source) => {
                error!(error = %source, "store operation failed");
                AppError::Internal
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<HashMap<String, String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::EditConflict => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.to_string();
        let fields = match self {
            AppError::Validation(fields) => Some(fields),
            _ => None,
        };

        let payload = Json(ErrorBody { message, fields });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_sentinels_classify_into_client_errors() {
        assert!(matches!(
            ServiceError::from(StoreError::RecordNotFound),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            ServiceError::from(StoreError::EditConflict),
            ServiceError::EditConflict
        ));
    }

    #[test]
    fn store_failures_stay_opaque() {
        let err = ServiceError::from(StoreError::timeout("get"));
        assert!(matches!(err, ServiceError::Storage(_)));
    }

    #[test]
    fn http_status_mapping() {
        let not_found = AppError::NotFound("missing".into()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let conflict = AppError::EditConflict.into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let validation = AppError::Validation(HashMap::new()).into_response();
        assert_eq!(validation.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let internal = AppError::Internal.into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
