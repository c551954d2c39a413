use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Failed to load catalog schema: {}", describe(.status, .message))]
    RemoteSchema {
        status: Option<u16>,
        message: String,
    },

    #[error("Catalog query failed: {}", describe(.status, .message))]
    RemoteQuery {
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed catalog entry: {0}")]
    MalformedEntry(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn describe(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("{} {}", status, message),
        None => message.to_string(),
    }
}

impl AppError {
    /// Status code reported by the catalog, if the failure came from an HTTP response
    pub fn remote_status(&self) -> Option<u16> {
        match self {
            AppError::RemoteSchema { status, .. } | AppError::RemoteQuery { status, .. } => {
                *status
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::RemoteSchema { .. }
            | AppError::RemoteQuery { .. }
            | AppError::MalformedEntry(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "remote_status": self.remote_status(),
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
