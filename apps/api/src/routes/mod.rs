pub mod health;

use axum::{routing::get, Router};

use crate::cv::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/cv/general", get(handlers::handle_get_general))
        .route("/api/v1/cv/languages", get(handlers::handle_get_languages))
        .route(
            "/api/v1/cv/technical-domains",
            get(handlers::handle_get_technical_domains),
        )
        .route("/api/v1/cv/skills", get(handlers::handle_get_skills))
        .route("/api/v1/cv/experience", get(handlers::handle_list_experience))
        .route(
            "/api/v1/cv/experience/:id",
            get(handlers::handle_get_experience),
        )
        .route("/api/v1/cv/education", get(handlers::handle_list_education))
        .route(
            "/api/v1/cv/education/:id",
            get(handlers::handle_get_education),
        )
        .route(
            "/api/v1/cv/education/:id/coursework",
            get(handlers::handle_get_coursework),
        )
        .route("/api/v1/cv/projects", get(handlers::handle_list_projects))
        .route(
            "/api/v1/cv/projects/:slug",
            get(handlers::handle_get_project),
        )
        .route(
            "/api/v1/cv/publications",
            get(handlers::handle_list_publications),
        )
        .route(
            "/api/v1/cv/export/latex",
            get(handlers::handle_export_latex),
        )
        .with_state(state)
}
