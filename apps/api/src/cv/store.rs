//! The frozen in-memory CV and its read accessors.
//!
//! Lookups return `Option`; an unknown id or slug is an ordinary outcome.

use crate::cv::models::{
    Coursework, Education, Experience, GeneralInfo, Publication, SelectedWork, SpokenLanguage,
    TechnicalDomain, TechnicalDomainType, Visibility,
};

/// Normalized collections, built once by `cv::normalize::normalize`.
#[derive(Debug, Clone)]
pub struct CvStore {
    pub(crate) general_info: GeneralInfo,
    pub(crate) technical_domains: Vec<TechnicalDomain>,
    pub(crate) spoken_languages: Vec<SpokenLanguage>,
    pub(crate) experience: Vec<Experience>,
    pub(crate) education: Vec<Education>,
    pub(crate) projects: Vec<SelectedWork>,
    pub(crate) coursework: Vec<Coursework>,
    pub(crate) publications: Vec<Publication>,
}

impl CvStore {
    pub fn general_info(&self) -> &GeneralInfo {
        &self.general_info
    }

    pub fn technical_domains(&self) -> &[TechnicalDomain] {
        &self.technical_domains
    }

    pub fn spoken_languages(&self) -> &[SpokenLanguage] {
        &self.spoken_languages
    }

    /// Most recent first.
    pub fn experience(&self) -> &[Experience] {
        &self.experience
    }

    pub fn experience_by_id(&self, id: &str) -> Option<&Experience> {
        self.experience.iter().find(|e| e.id == id)
    }

    /// Most recent year first.
    pub fn education(&self) -> &[Education] {
        &self.education
    }

    pub fn education_by_id(&self, id: &str) -> Option<&Education> {
        self.education.iter().find(|e| e.id == id)
    }

    pub fn projects(&self) -> &[SelectedWork] {
        &self.projects
    }

    pub fn project_by_slug(&self, slug: &str) -> Option<&SelectedWork> {
        self.projects
            .iter()
            .find(|p| p.slug.as_deref() == Some(slug))
    }

    pub fn projects_by_visibility(&self, visibility: Visibility) -> Vec<&SelectedWork> {
        self.projects
            .iter()
            .filter(|p| p.visibility == visibility)
            .collect()
    }

    /// Structured coursework for one education, in source order.
    pub fn coursework_for_education(&self, education_id: &str) -> Vec<&Coursework> {
        self.coursework
            .iter()
            .filter(|c| c.education_id == education_id)
            .collect()
    }

    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }
}

pub fn filter_domains_by_type(
    domains: &[TechnicalDomain],
    domain_type: TechnicalDomainType,
) -> Vec<&TechnicalDomain> {
    domains
        .iter()
        .filter(|d| d.domain_type == domain_type)
        .collect()
}

pub fn highlighted_domains_by_type(
    domains: &[TechnicalDomain],
    domain_type: TechnicalDomainType,
) -> Vec<&TechnicalDomain> {
    domains
        .iter()
        .filter(|d| d.domain_type == domain_type && d.is_highlighted)
        .collect()
}

pub fn skills_by_type(domains: &[TechnicalDomain], domain_type: TechnicalDomainType) -> Vec<&str> {
    filter_domains_by_type(domains, domain_type)
        .into_iter()
        .map(|d| d.skill.as_str())
        .collect()
}

pub fn highlighted_skills_by_type(
    domains: &[TechnicalDomain],
    domain_type: TechnicalDomainType,
) -> Vec<&str> {
    highlighted_domains_by_type(domains, domain_type)
        .into_iter()
        .map(|d| d.skill.as_str())
        .collect()
}

pub fn all_skills(domains: &[TechnicalDomain]) -> Vec<&str> {
    domains.iter().map(|d| d.skill.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models::{RawContent, RawProject, RawQualifications};
    use crate::cv::normalize::{normalize, NormalizeOptions};

    fn store_with_qualifications() -> CvStore {
        let raw = RawContent {
            qualifications: Some(RawQualifications {
                programming: ["Python", "TypeScript", "Java", "SQL", "R"]
                    .map(String::from)
                    .to_vec(),
                tools: ["Git", "Docker", "Kubernetes", "Power BI"]
                    .map(String::from)
                    .to_vec(),
                skills: ["Optimization", "Python"].map(String::from).to_vec(),
                ..Default::default()
            }),
            ..Default::default()
        };
        normalize(raw, &NormalizeOptions::default())
    }

    #[test]
    fn test_filter_by_type() {
        let store = store_with_qualifications();
        let tools = skills_by_type(store.technical_domains(), TechnicalDomainType::Tool);
        assert_eq!(tools, vec!["Git", "Docker", "Kubernetes", "Power BI"]);
    }

    #[test]
    fn test_highlighted_only_within_type() {
        let store = store_with_qualifications();
        let langs =
            highlighted_skills_by_type(store.technical_domains(), TechnicalDomainType::Language);
        assert_eq!(langs, vec!["Python", "TypeScript", "Java", "SQL"]);
        let domains =
            highlighted_domains_by_type(store.technical_domains(), TechnicalDomainType::Tool);
        assert!(domains.iter().all(|d| d.domain_type == TechnicalDomainType::Tool));
        assert_eq!(domains.len(), 3);
    }

    #[test]
    fn test_all_skills_keeps_cross_category_duplicates() {
        let store = store_with_qualifications();
        let skills = all_skills(store.technical_domains());
        assert_eq!(skills.len(), 11);
        assert_eq!(skills.iter().filter(|s| **s == "Python").count(), 2);
    }

    #[test]
    fn test_unknown_lookups_are_none() {
        let store = normalize(RawContent::default(), &NormalizeOptions::default());
        assert!(store.experience_by_id("exp-404").is_none());
        assert!(store.education_by_id("edu-404").is_none());
        assert!(store.project_by_slug("missing").is_none());
        assert!(store.coursework_for_education("edu-404").is_empty());
    }

    #[test]
    fn test_project_lookups_and_visibility_filter() {
        let project = |id: i64, slug: Option<&str>, visibility: &str| RawProject {
            id,
            header: format!("P{id}"),
            slug: slug.map(str::to_string),
            description: None,
            introduction: None,
            programming: vec![],
            tools: vec![],
            skills: vec![],
            experience_id: None,
            education_id: None,
            visibility: Some(visibility.to_string()),
            features: vec![],
            tech_stack: vec![],
            link: None,
            color: None,
            image_name: None,
        };
        let raw = RawContent {
            projects: vec![
                project(1, Some("grid"), "selected_work"),
                project(2, None, "personal_document"),
                project(3, Some("thesis"), "work_page_project"),
            ],
            ..Default::default()
        };
        let store = normalize(raw, &NormalizeOptions::default());

        assert_eq!(store.project_by_slug("thesis").unwrap().id, "proj-3");
        let personal = store.projects_by_visibility(Visibility::PersonalDocument);
        assert_eq!(personal.len(), 1);
        assert_eq!(personal[0].id, "proj-2");
    }
}
