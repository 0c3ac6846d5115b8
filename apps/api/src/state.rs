use std::sync::Arc;

use crate::config::Config;
use crate::cv::CvStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated; handlers only read.
    pub store: Arc<CvStore>,
    pub config: Config,
}
