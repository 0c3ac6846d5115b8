//! Normalizer — reshapes raw content records into the frozen `CvStore`.
//!
//! Runs exactly once at startup. Every synthetic id comes from one
//! `IdGenerator` owned by the pass; allocation order is general info,
//! technical domains, then coursework.
//!
//! Natural ids (and project slugs) are unique per category: the first
//! record in file order wins and later duplicates are dropped.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info, warn};

use crate::content::models::{
    RawContent, RawCourse, RawCoursework, RawEducation, RawExperience, RawGeneralInfo,
    RawProject, RawPublication, RawQualifications, RawSiteConfig,
};
use crate::cv::ids::IdGenerator;
use crate::cv::models::{
    Coursework, Education, Experience, GeneralInfo, LanguageProficiency, Publication,
    SelectedWork, SpokenLanguage, TechnicalDomain, TechnicalDomainType, Visibility,
};
use crate::cv::store::CvStore;

/// Leading programming languages shown as highlighted.
const HIGHLIGHTED_LANGUAGES: usize = 4;
/// Leading tools shown as highlighted.
const HIGHLIGHTED_TOOLS: usize = 3;

/// Thesis value used in the source data for a degree without a thesis.
const UNFINISHED_THESIS: &str = "unfinished";

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub compiled_at: DateTime<Utc>,
    /// Takes precedence over `general/config.yaml` when set.
    pub cv_pdf_link: Option<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            compiled_at: Utc::now(),
            cv_pdf_link: None,
        }
    }
}

/// Builds the immutable store from raw content.
pub fn normalize(raw: RawContent, options: &NormalizeOptions) -> CvStore {
    let mut ids = IdGenerator::new();

    let general_info = normalize_general_info(
        raw.information.as_ref(),
        raw.config.as_ref(),
        options,
        &mut ids,
    );
    let technical_domains = raw
        .qualifications
        .as_ref()
        .map(|q| normalize_technical_domains(q, &mut ids))
        .unwrap_or_default();
    let spoken_languages = raw
        .qualifications
        .as_ref()
        .map(normalize_spoken_languages)
        .unwrap_or_default();
    let experience = normalize_experience(raw.experience);
    let education = normalize_education(raw.education, &raw.coursework);
    let projects = normalize_projects(raw.projects);
    let coursework = normalize_coursework(&raw.coursework, &mut ids);
    let publications = normalize_publications(raw.publications, &mut ids);

    info!(
        "Normalized CV: {} technical domains, {} experience, {} education, {} projects, {} coursework items",
        technical_domains.len(),
        experience.len(),
        education.len(),
        projects.len(),
        coursework.len()
    );

    CvStore {
        general_info,
        technical_domains,
        spoken_languages,
        experience,
        education,
        projects,
        coursework,
        publications,
    }
}

fn normalize_general_info(
    info: Option<&RawGeneralInfo>,
    config: Option<&RawSiteConfig>,
    options: &NormalizeOptions,
    ids: &mut IdGenerator,
) -> GeneralInfo {
    let cv_pdf_link = options
        .cv_pdf_link
        .clone()
        .or_else(|| config.and_then(|c| non_empty(c.cv_pdf_link.as_deref())));

    let Some(info) = info else {
        warn!("No general information found; using placeholder title");
        return GeneralInfo {
            id: ids.next_id(),
            name: None,
            title: "Unknown".to_string(),
            summary: None,
            email: None,
            linkedin: None,
            github: None,
            location: None,
            last_compiled: None,
            cv_pdf_link,
        };
    };

    let name = [info.firstname.as_deref(), info.lastname.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    GeneralInfo {
        id: ids.next_id(),
        name: non_empty(Some(name.as_str())),
        title: info.identity.clone().unwrap_or_default(),
        summary: non_empty(info.description.as_deref()),
        email: non_empty(info.email.as_deref()),
        linkedin: non_empty(info.linkedin.as_deref()).map(|h| format!("linkedin.com/in/{h}")),
        github: non_empty(info.github.as_deref()).map(|h| format!("github.com/{h}")),
        location: None,
        last_compiled: Some(
            options
                .compiled_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        cv_pdf_link,
    }
}

fn normalize_technical_domains(
    qualifications: &RawQualifications,
    ids: &mut IdGenerator,
) -> Vec<TechnicalDomain> {
    let groups = [
        (
            &qualifications.programming,
            TechnicalDomainType::Language,
            Some(HIGHLIGHTED_LANGUAGES),
        ),
        (
            &qualifications.tools,
            TechnicalDomainType::Tool,
            Some(HIGHLIGHTED_TOOLS),
        ),
        (&qualifications.skills, TechnicalDomainType::Skill, None),
    ];

    let mut domains = Vec::new();
    for (skills, domain_type, highlight_limit) in groups {
        for (idx, skill) in skills.iter().enumerate() {
            domains.push(TechnicalDomain {
                id: ids.next_id(),
                domain_type,
                skill: skill.clone(),
                is_highlighted: highlight_limit.map_or(true, |limit| idx < limit),
                order_index: idx,
            });
        }
    }
    domains
}

fn normalize_spoken_languages(qualifications: &RawQualifications) -> Vec<SpokenLanguage> {
    let native = qualifications
        .native_language
        .iter()
        .map(|l| (l, LanguageProficiency::Native));
    let fluent = qualifications
        .fluent_languages
        .iter()
        .map(|l| (l, LanguageProficiency::Fluent));
    let professional = qualifications
        .professional_language
        .iter()
        .map(|l| (l, LanguageProficiency::Professional));

    native
        .chain(fluent)
        .chain(professional)
        .filter(|(language, _)| !language.trim().is_empty())
        .map(|(language, proficiency)| SpokenLanguage {
            language: language.trim().to_string(),
            proficiency,
        })
        .collect()
}

/// Orders by source id, highest first. Period strings are never parsed.
fn normalize_experience(raw: Vec<RawExperience>) -> Vec<Experience> {
    let mut raw = keep_first_by(raw, "experience", |e| Some(e.id));
    raw.sort_by(|a, b| b.id.cmp(&a.id));

    raw.into_iter()
        .enumerate()
        .map(|(idx, exp)| {
            let description = exp.description.trim().to_string();
            let description = non_empty(Some(description.as_str()));
            Experience {
                id: format!("exp-{}", exp.id),
                source_id: exp.id,
                company: exp.company,
                role: exp.title,
                period: format!("{} – {}", exp.start, exp.end),
                start: exp.start,
                end: exp.end,
                promotion: non_empty(exp.promotion.as_deref()),
                full_description: description.clone(),
                description,
                location: non_empty(exp.location.as_deref()),
                order_index: idx,
                skills: concat_skills(&exp.programming, &exp.tools, &exp.skills),
                programming_skills: exp.programming,
                tool_skills: exp.tools,
                domain_skills: exp.skills,
            }
        })
        .collect()
}

/// Orders by year, most recent first; equal years keep source order.
fn normalize_education(raw: Vec<RawEducation>, coursework: &[RawCoursework]) -> Vec<Education> {
    let mut raw = keep_first_by(raw, "education", |e| Some(e.id));
    raw.sort_by(|a, b| b.year.cmp(&a.year));

    raw.into_iter()
        .enumerate()
        .map(|(idx, edu)| {
            let courses: Vec<String> = coursework
                .iter()
                .find(|c| c.education_id == edu.id)
                .map(|c| c.courses.iter().map(|course| course.name().to_string()).collect())
                .unwrap_or_default();
            let thesis = normalize_thesis(edu.thesis.as_deref());

            Education {
                id: format!("edu-{}", edu.id),
                institution: edu.university,
                degree: format!("{} {}", edu.degree, edu.name),
                degree_type: edu.degree,
                field: edu.name,
                specialization: non_empty(edu.specialization.as_deref()),
                year: edu.year,
                full_description: thesis.clone(),
                thesis,
                honours: None,
                coursework: courses,
                location: non_empty(edu.location.as_deref()),
                order_index: idx,
                programming_skills: edu.programming,
                tool_skills: edu.tools,
                domain_skills: edu.skills,
            }
        })
        .collect()
}

fn normalize_projects(raw: Vec<RawProject>) -> Vec<SelectedWork> {
    let raw = keep_first_by(raw, "project id", |p| Some(p.id));
    let raw = keep_first_by(raw, "project slug", |p| non_empty(p.slug.as_deref()));
    raw.into_iter()
        .enumerate()
        .map(|(idx, proj)| {
            let visibility = parse_visibility(&proj);
            SelectedWork {
                id: format!("proj-{}", proj.id),
                title: proj.header,
                description: proj.description,
                link: non_empty(proj.link.as_deref()),
                color: proj.color,
                slug: non_empty(proj.slug.as_deref()),
                tags: concat_skills(&proj.programming, &proj.tools, &proj.skills),
                full_description: proj.introduction,
                image_name: non_empty(proj.image_name.as_deref()),
                features: proj.features,
                tech_stack: proj.tech_stack,
                order_index: idx,
                // Zero is "no reference" in the source data.
                related_experience_id: proj
                    .experience_id
                    .filter(|id| *id != 0)
                    .map(|id| format!("exp-{id}")),
                related_education_id: proj
                    .education_id
                    .filter(|id| *id != 0)
                    .map(|id| format!("edu-{id}")),
                visibility,
                programming_skills: proj.programming,
                tool_skills: proj.tools,
                domain_skills: proj.skills,
            }
        })
        .collect()
}

fn parse_visibility(proj: &RawProject) -> Visibility {
    match proj.visibility.as_deref() {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Project {} has {e}; treating as selected_work", proj.id);
            Visibility::default()
        }),
        None => {
            warn!("Project {} has no visibility; treating as selected_work", proj.id);
            Visibility::default()
        }
    }
}

fn normalize_coursework(raw: &[RawCoursework], ids: &mut IdGenerator) -> Vec<Coursework> {
    let mut items = Vec::new();
    for record in raw {
        for (idx, course) in record.courses.iter().enumerate() {
            let (technical_domain, technical_domain_item) = match course {
                RawCourse::Name(_) => (None, None),
                RawCourse::Classified {
                    technical_domain,
                    technical_domain_item,
                    ..
                } => (
                    technical_domain.as_deref().and_then(|d| {
                        d.parse::<TechnicalDomainType>()
                            .map_err(|e| debug!("Course `{}`: {e}", course.name()))
                            .ok()
                    }),
                    technical_domain_item.clone(),
                ),
            };
            items.push(Coursework {
                id: ids.next_id(),
                education_id: format!("edu-{}", record.education_id),
                name: course.name().to_string(),
                technical_domain,
                technical_domain_item,
                order_index: idx,
            });
        }
    }
    items
}

fn normalize_publications(raw: Vec<RawPublication>, ids: &mut IdGenerator) -> Vec<Publication> {
    let raw = keep_first_by(raw, "publication", |p| p.id);
    raw.into_iter()
        .enumerate()
        .map(|(idx, publication)| Publication {
            id: match publication.id {
                Some(id) => format!("pub-{id}"),
                None => ids.next_id(),
            },
            title: publication.title,
            authors: non_empty(publication.authors.as_deref()),
            venue: non_empty(publication.venue.as_deref()),
            year: publication.year,
            link: non_empty(publication.link.as_deref()),
            order_index: idx,
        })
        .collect()
}

/// Drops every record whose key was already seen. Records without a key
/// are always kept.
fn keep_first_by<T, K, F>(records: Vec<T>, category: &str, key: F) -> Vec<T>
where
    K: Eq + Hash + Display,
    F: Fn(&T) -> Option<K>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| match key(record) {
            Some(k) if seen.contains(&k) => {
                warn!("Skipping duplicate {category} {k}");
                false
            }
            Some(k) => {
                seen.insert(k);
                true
            }
            None => true,
        })
        .collect()
}

/// `"unfinished"` and blank theses are absent.
fn normalize_thesis(thesis: Option<&str>) -> Option<String> {
    non_empty(thesis).filter(|t| t != UNFINISHED_THESIS)
}

/// programming ++ tools ++ domain, in that order, duplicates kept.
fn concat_skills(programming: &[String], tools: &[String], domain: &[String]) -> Vec<String> {
    programming
        .iter()
        .chain(tools)
        .chain(domain)
        .cloned()
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
