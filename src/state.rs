use crate::errors::{AppError, LoadError};
use crate::models::StatsDocument;
use std::sync::Arc;
use tracing::error;

/// Written once at start-up and only read afterwards, so no lock.
#[derive(Clone, Default)]
pub struct AppState {
    pub stats: Option<Arc<StatsDocument>>,
    pub load_error: Option<Arc<str>>,
}

impl AppState {
    pub fn new(stats: StatsDocument) -> Self {
        Self {
            stats: Some(Arc::new(stats)),
            load_error: None,
        }
    }

    /// Keeps a failed load from stopping the service: the error is logged
    /// and kept for the page banner, and the tool list stays empty.
    pub fn from_load(result: Result<StatsDocument, LoadError>) -> Self {
        match result {
            Ok(stats) => Self::new(stats),
            Err(err) => {
                error!("failed to load usage stats: {err}");
                Self {
                    stats: None,
                    load_error: Some(Arc::from(err.to_string())),
                }
            }
        }
    }

    pub fn require_stats(&self) -> Result<&StatsDocument, AppError> {
        self.stats
            .as_deref()
            .ok_or_else(|| AppError::unavailable("usage stats are not available"))
    }
}
