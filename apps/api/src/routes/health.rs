use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, and the size of the loaded CV.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cv-api",
        "content_root": state.config.data_dir.display().to_string(),
        "experience": state.store.experience().len(),
        "education": state.store.education().len(),
        "projects": state.store.projects().len(),
    }))
}
