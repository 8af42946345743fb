use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::data::models::LookupError;

impl LookupError {
    pub fn status(&self) -> StatusCode {
        match self {
            LookupError::AttachmentStoreNotConfigured
            | LookupError::AttachmentNotFound(_)
            | LookupError::WordNotFound(_) => StatusCode::NOT_FOUND,
            LookupError::Unsupported(_)
            | LookupError::InvalidPayload(_)
            | LookupError::DatabaseError(_)
            | LookupError::PoolError(_)
            | LookupError::WorkerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            LookupError::DatabaseError(e) => format!("Database error: {}", e),
            LookupError::PoolError(e) => format!("Connection pool error: {}", e),
            LookupError::WorkerError(e) => format!("Lookup worker failed: {}", e),
            _ => self.to_string(),
        };

        let body = json!({
            "error": message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}
