//! Axum route handlers for the CV API.
//!
//! Handlers are thin: they call a store accessor and turn `None` into a
//! `404`. No handler writes to the store.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::cv::joins::{EducationWithProjects, ExperienceWithProjects, SelectedWorkWithRelations};
use crate::cv::models::{
    Coursework, Education, Experience, GeneralInfo, Publication, SelectedWork, SpokenLanguage,
    TechnicalDomain, TechnicalDomainType, Visibility,
};
use crate::cv::stack::TechStack;
use crate::cv::store::{
    all_skills, filter_domains_by_type, highlighted_domains_by_type, highlighted_skills_by_type,
    skills_by_type,
};
use crate::errors::AppError;
use crate::latex::render_cv;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TechnicalDomainQuery {
    #[serde(rename = "type")]
    pub domain_type: Option<String>,
    /// Kept raw so a malformed flag gets the JSON validation error body.
    pub highlighted: Option<String>,
}

impl TechnicalDomainQuery {
    fn highlighted(&self) -> Result<bool, AppError> {
        match self.highlighted.as_deref() {
            None => Ok(false),
            Some("true" | "1") => Ok(true),
            Some("false" | "0") => Ok(false),
            Some(other) => Err(AppError::Validation(format!(
                "Invalid highlighted flag: {other} (expected true or false)"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub visibility: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExperienceDetailResponse {
    #[serde(flatten)]
    pub experience: Experience,
    pub related_projects: Vec<SelectedWork>,
    pub tech_stack: TechStack,
}

impl From<ExperienceWithProjects<'_>> for ExperienceDetailResponse {
    fn from(joined: ExperienceWithProjects<'_>) -> Self {
        Self {
            tech_stack: joined.tech_stack(),
            experience: joined.experience.clone(),
            related_projects: joined.related_projects.into_iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EducationDetailResponse {
    #[serde(flatten)]
    pub education: Education,
    pub related_projects: Vec<SelectedWork>,
    pub structured_coursework: Vec<Coursework>,
    pub tech_stack: TechStack,
}

impl From<EducationWithProjects<'_>> for EducationDetailResponse {
    fn from(joined: EducationWithProjects<'_>) -> Self {
        Self {
            tech_stack: joined.tech_stack(),
            education: joined.education.clone(),
            related_projects: joined.related_projects.into_iter().cloned().collect(),
            structured_coursework: joined.structured_coursework.into_iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: SelectedWork,
    pub related_experience: Option<Experience>,
    pub related_education: Option<Education>,
    pub tech_stack: TechStack,
}

impl From<SelectedWorkWithRelations<'_>> for ProjectDetailResponse {
    fn from(joined: SelectedWorkWithRelations<'_>) -> Self {
        Self {
            tech_stack: joined.tech_stack(),
            project: joined.project.clone(),
            related_experience: joined.related_experience.cloned(),
            related_education: joined.related_education.cloned(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/cv/general
pub async fn handle_get_general(State(state): State<AppState>) -> Json<GeneralInfo> {
    Json(state.store.general_info().clone())
}

/// GET /api/v1/cv/languages
pub async fn handle_get_languages(State(state): State<AppState>) -> Json<Vec<SpokenLanguage>> {
    Json(state.store.spoken_languages().to_vec())
}

/// GET /api/v1/cv/technical-domains?type=&highlighted=
pub async fn handle_get_technical_domains(
    State(state): State<AppState>,
    Query(params): Query<TechnicalDomainQuery>,
) -> Result<Json<Vec<TechnicalDomain>>, AppError> {
    let domains = state.store.technical_domains();
    let highlighted = params.highlighted()?;

    let selected: Vec<TechnicalDomain> = match params.domain_type.as_deref() {
        None if highlighted => domains
            .iter()
            .filter(|d| d.is_highlighted)
            .cloned()
            .collect(),
        None => domains.to_vec(),
        Some(raw) => {
            let domain_type = raw
                .parse::<TechnicalDomainType>()
                .map_err(AppError::Validation)?;
            let filtered = if highlighted {
                highlighted_domains_by_type(domains, domain_type)
            } else {
                filter_domains_by_type(domains, domain_type)
            };
            filtered.into_iter().cloned().collect()
        }
    };

    Ok(Json(selected))
}

/// GET /api/v1/cv/skills?type=&highlighted=
///
/// Bare skill strings. Without `type`, every skill across all domain types,
/// duplicates included.
pub async fn handle_get_skills(
    State(state): State<AppState>,
    Query(params): Query<TechnicalDomainQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let domains = state.store.technical_domains();
    let highlighted = params.highlighted()?;

    let skills = match params.domain_type.as_deref() {
        None => all_skills(domains),
        Some(raw) => {
            let domain_type = raw
                .parse::<TechnicalDomainType>()
                .map_err(AppError::Validation)?;
            if highlighted {
                highlighted_skills_by_type(domains, domain_type)
            } else {
                skills_by_type(domains, domain_type)
            }
        }
    };

    Ok(Json(skills.into_iter().map(str::to_string).collect()))
}

/// GET /api/v1/cv/experience
pub async fn handle_list_experience(State(state): State<AppState>) -> Json<Vec<Experience>> {
    Json(state.store.experience().to_vec())
}

/// GET /api/v1/cv/experience/:id
pub async fn handle_get_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExperienceDetailResponse>, AppError> {
    let joined = state
        .store
        .experience_with_projects(&id)
        .ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))?;
    Ok(Json(joined.into()))
}

/// GET /api/v1/cv/education
pub async fn handle_list_education(State(state): State<AppState>) -> Json<Vec<Education>> {
    Json(state.store.education().to_vec())
}

/// GET /api/v1/cv/education/:id
pub async fn handle_get_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EducationDetailResponse>, AppError> {
    let joined = state
        .store
        .education_with_projects(&id)
        .ok_or_else(|| AppError::NotFound(format!("Education {id} not found")))?;
    Ok(Json(joined.into()))
}

/// GET /api/v1/cv/education/:id/coursework
pub async fn handle_get_coursework(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<Coursework>> {
    Json(
        state
            .store
            .coursework_for_education(&id)
            .into_iter()
            .cloned()
            .collect(),
    )
}

/// GET /api/v1/cv/projects?visibility=
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectListQuery>,
) -> Result<Json<Vec<SelectedWork>>, AppError> {
    let projects = match params.visibility.as_deref() {
        Some(raw) => {
            let visibility = raw.parse::<Visibility>().map_err(AppError::Validation)?;
            state
                .store
                .projects_by_visibility(visibility)
                .into_iter()
                .cloned()
                .collect()
        }
        None => state.store.projects().to_vec(),
    };
    Ok(Json(projects))
}

/// GET /api/v1/cv/projects/:slug
pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProjectDetailResponse>, AppError> {
    let joined = state
        .store
        .project_with_relations(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Project {slug} not found")))?;
    Ok(Json(joined.into()))
}

/// GET /api/v1/cv/publications
pub async fn handle_list_publications(State(state): State<AppState>) -> Json<Vec<Publication>> {
    Json(state.store.publications().to_vec())
}

/// GET /api/v1/cv/export/latex
pub async fn handle_export_latex(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/x-tex; charset=utf-8")],
        render_cv(&state.store),
    )
}
