use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every variant maps to one HTTP status and is rendered as an
/// [`ErrorResponse`] JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// Path id is not a valid UUID
    InvalidId(String),
    /// No employee stored under this id
    EmployeeNotFound(String),
    /// Another employee already uses this email
    DuplicateEmail,
    /// Another employee already uses this phone number
    DuplicatePhone,
    /// Request body is not a valid employee record
    JsonError(serde_json::Error),
    /// Database operation error
    DatabaseError(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::JsonError(_) => StatusCode::BAD_REQUEST,
            ApiError::EmployeeNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateEmail | ApiError::DuplicatePhone => StatusCode::CONFLICT,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::InvalidId(id) => format!("Invalid ID: '{}'", id),
            ApiError::EmployeeNotFound(_) => "Employee with this ID doesn't exist".to_string(),
            ApiError::DuplicateEmail => "Employee with this email already exists".to_string(),
            ApiError::DuplicatePhone => {
                "Employee with this phone number already exists".to_string()
            }
            ApiError::JsonError(err) => format!("Invalid employee record: {}", err),
            ApiError::DatabaseError(err) => format!("Database error: {}", err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self.message());
        }

        let body = Json(ErrorResponse {
            error: self.message(),
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonError(err)
    }
}
