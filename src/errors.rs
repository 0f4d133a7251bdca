use crate::models::Day;
use axum::http::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Anything that keeps the stats document from loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read stats file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch stats: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to parse stats: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{tool} on {day} hour {hour} has usage {value}, expected a fraction in [0, 1]")]
    OutOfRange {
        tool: String,
        day: Day,
        hour: usize,
        value: f64,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),
    #[error("no usage recorded for {tool} on {day}")]
    MissingDay { tool: String, day: Day },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: message.into(),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        Self::not_found(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
