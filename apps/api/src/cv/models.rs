//! Normalized, UI-ready entities. Built once by `cv::normalize` and never
//! mutated afterwards.

use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeneralInfo {
    pub id: String,
    pub name: Option<String>,
    pub title: String,
    pub summary: Option<String>,
    pub email: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub location: Option<String>,
    /// RFC 3339 timestamp of the load that produced this value.
    pub last_compiled: Option<String>,
    pub cv_pdf_link: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TechnicalDomainType {
    Language,
    Tool,
    Skill,
}

impl FromStr for TechnicalDomainType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "language" => Ok(TechnicalDomainType::Language),
            "tool" => Ok(TechnicalDomainType::Tool),
            "skill" => Ok(TechnicalDomainType::Skill),
            other => Err(format!(
                "unknown technical domain `{other}`; expected language|tool|skill"
            )),
        }
    }
}

/// One entry of the qualifications taxonomy. Skill strings are not unique
/// across domain types.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TechnicalDomain {
    pub id: String,
    #[serde(rename = "type")]
    pub domain_type: TechnicalDomainType,
    pub skill: String,
    pub is_highlighted: bool,
    pub order_index: usize,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LanguageProficiency {
    Native,
    Fluent,
    Professional,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpokenLanguage {
    pub language: String,
    pub proficiency: LanguageProficiency,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Experience {
    pub id: String,
    /// Numeric id from the source record; the authoritative recency order.
    #[serde(skip)]
    pub source_id: i64,
    pub company: String,
    pub role: String,
    pub start: String,
    pub end: String,
    pub period: String,
    pub promotion: Option<String>,
    pub description: Option<String>,
    pub full_description: Option<String>,
    pub location: Option<String>,
    pub order_index: usize,
    /// programming ++ tools ++ domain, duplicates kept.
    pub skills: Vec<String>,
    pub programming_skills: Vec<String>,
    pub tool_skills: Vec<String>,
    pub domain_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Education {
    pub id: String,
    pub institution: String,
    /// Display form: "<degree_type> <field>".
    pub degree: String,
    pub degree_type: String,
    pub field: String,
    pub specialization: Option<String>,
    pub year: i32,
    pub thesis: Option<String>,
    pub honours: Option<String>,
    pub full_description: Option<String>,
    pub coursework: Vec<String>,
    pub location: Option<String>,
    pub order_index: usize,
    pub programming_skills: Vec<String>,
    pub tool_skills: Vec<String>,
    pub domain_skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    SelectedWork,
    WorkPageProject,
    PersonalDocument,
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "selected_work" => Ok(Visibility::SelectedWork),
            "work_page_project" => Ok(Visibility::WorkPageProject),
            "personal_document" => Ok(Visibility::PersonalDocument),
            other => Err(format!("unknown visibility `{other}`")),
        }
    }
}

/// A project. Advisory `visibility` decides which pages list it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectedWork {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub color: Option<String>,
    pub slug: Option<String>,
    pub tags: Vec<String>,
    pub full_description: Option<String>,
    pub image_name: Option<String>,
    pub features: Vec<String>,
    pub tech_stack: Vec<String>,
    pub order_index: usize,
    pub related_experience_id: Option<String>,
    pub related_education_id: Option<String>,
    pub visibility: Visibility,
    pub programming_skills: Vec<String>,
    pub tool_skills: Vec<String>,
    pub domain_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Coursework {
    pub id: String,
    pub education_id: String,
    pub name: String,
    pub technical_domain: Option<TechnicalDomainType>,
    pub technical_domain_item: Option<String>,
    pub order_index: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Publication {
    pub id: String,
    pub title: String,
    pub authors: Option<String>,
    pub venue: Option<String>,
    pub year: Option<i32>,
    pub link: Option<String>,
    pub order_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_parses_and_serializes_snake_case() {
        let v: Visibility = "personal_document".parse().unwrap();
        assert_eq!(v, Visibility::PersonalDocument);
        assert_eq!(
            serde_json::to_value(v).unwrap(),
            serde_json::json!("personal_document")
        );
    }

    #[test]
    fn test_experience_json_omits_source_id() {
        let experience = Experience {
            id: "exp-3".to_string(),
            source_id: 3,
            company: "Bodil Energi".to_string(),
            role: "Tech Lead".to_string(),
            start: "Aug 2024".to_string(),
            end: "Present".to_string(),
            period: "Aug 2024 – Present".to_string(),
            promotion: None,
            description: None,
            full_description: None,
            location: None,
            order_index: 0,
            skills: vec![],
            programming_skills: vec![],
            tool_skills: vec![],
            domain_skills: vec![],
        };
        let json = serde_json::to_value(&experience).unwrap();
        assert_eq!(json["id"], "exp-3");
        assert!(json.get("source_id").is_none());
    }

    #[test]
    fn test_unknown_visibility_rejected() {
        assert!("secret".parse::<Visibility>().is_err());
    }

    #[test]
    fn test_domain_type_parse_is_case_insensitive() {
        assert_eq!(
            " Tool ".parse::<TechnicalDomainType>().unwrap(),
            TechnicalDomainType::Tool
        );
        assert!("theory".parse::<TechnicalDomainType>().is_err());
    }

    #[test]
    fn test_technical_domain_serializes_type_key() {
        let domain = TechnicalDomain {
            id: "gen-1".to_string(),
            domain_type: TechnicalDomainType::Language,
            skill: "Rust".to_string(),
            is_highlighted: true,
            order_index: 0,
        };
        let json = serde_json::to_value(&domain).unwrap();
        assert_eq!(json["type"], "language");
    }
}
