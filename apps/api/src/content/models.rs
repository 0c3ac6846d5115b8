use serde::Deserialize;

/// Everything read from the data directory, before normalization.
///
/// Singletons are `None` when their file is missing or unparseable;
/// collections are empty when their directory is missing.
#[derive(Debug, Clone, Default)]
pub struct RawContent {
    pub information: Option<RawGeneralInfo>,
    pub config: Option<RawSiteConfig>,
    pub qualifications: Option<RawQualifications>,
    pub experience: Vec<RawExperience>,
    pub education: Vec<RawEducation>,
    pub projects: Vec<RawProject>,
    pub coursework: Vec<RawCoursework>,
    pub publications: Vec<RawPublication>,
}

/// A singleton file may be written either as a mapping or as a
/// one-element sequence.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_first(self) -> Option<T> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.into_iter().next(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawGeneralInfo {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub identity: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSiteConfig {
    pub cv_pdf_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawQualifications {
    pub native_language: Option<String>,
    pub fluent_languages: Vec<String>,
    pub professional_language: Vec<String>,
    pub programming: Vec<String>,
    pub tools: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawExperience {
    pub id: i64,
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub promotion: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub programming: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEducation {
    pub id: i64,
    pub university: String,
    /// Field of study, e.g. "Mathematics".
    pub name: String,
    pub degree: String,
    pub year: i32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub thesis: Option<String>,
    #[serde(default)]
    pub programming: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProject {
    pub id: i64,
    pub header: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub programming: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_id: Option<i64>,
    #[serde(default)]
    pub education_id: Option<i64>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub image_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCoursework {
    pub education_id: i64,
    #[serde(default)]
    pub courses: Vec<RawCourse>,
}

/// A course is usually a bare name; the mapping form carries a domain
/// classification.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCourse {
    Name(String),
    Classified {
        name: String,
        #[serde(default)]
        technical_domain: Option<String>,
        #[serde(default)]
        technical_domain_item: Option<String>,
    },
}

impl RawCourse {
    pub fn name(&self) -> &str {
        match self {
            RawCourse::Name(name) => name,
            RawCourse::Classified { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPublication {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub link: Option<String>,
}
