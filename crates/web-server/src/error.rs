use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::CoreError;
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(DbError::NoMeasurements) => {
                tracing::warn!("Most active station requested but the measurement table is empty.");
                (StatusCode::BAD_REQUEST, DbError::NoMeasurements.to_string())
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
