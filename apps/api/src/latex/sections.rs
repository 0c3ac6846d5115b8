//! CV document assembly: preamble, left profile column, right column with
//! work experience and education.

use crate::cv::models::{Education, Experience, LanguageProficiency, TechnicalDomainType};
use crate::cv::store::{skills_by_type, CvStore};
use crate::latex::escape::{escape_latex, escape_url};

const PREAMBLE: &str = r#"\documentclass[11pt, a4paper]{article}

\usepackage[T1]{fontenc}
\usepackage[utf8]{inputenc}
\usepackage[english]{babel}
\usepackage[left = 0mm, right = 0mm, top = 0mm, bottom = 0mm]{geometry}
\usepackage[stretch = 25, shrink = 25, tracking=true, letterspace=30]{microtype}
\usepackage{graphicx}
\usepackage{xcolor}
\usepackage{marvosym}

\usepackage{enumitem}
\setlist{parsep = 0pt, topsep = 0pt, partopsep = 1pt, itemsep = 1pt, leftmargin = 6mm}

\usepackage{FiraSans}
\renewcommand{\familydefault}{\sfdefault}

\definecolor{cvblue}{HTML}{304263}

\newcommand{\dates}[1]{\hfill\mbox{\textbf{#1}}}
\newcommand{\is}{\par\vskip.5ex plus .4ex}
\newcommand{\smaller}[1]{\small$\diamond$\ #1}
\newcommand{\headleft}[1]{\vspace*{3ex}\textsc{\textbf{#1}}\par%
    \vspace*{-1.5ex}\hrulefill\par\vspace*{0.7ex}}
\newcommand{\headright}[1]{\vspace*{2.5ex}\textsc{\Large\color{cvblue}#1}\par%
    \vspace*{-2ex}{\color{cvblue}\hrulefill}\par}
\newcommand{\grayed}[1]{\hfill\mbox{\textcolor{gray}{#1}}}

\usepackage[colorlinks = true, urlcolor = white, linkcolor = white]{hyperref}

\begin{document}

\setlength{\topskip}{0pt}
\setlength{\parindent}{0pt}
\setlength{\parskip}{0pt}
\setlength{\fboxsep}{0pt}
\pagestyle{empty}
\raggedbottom
"#;

const LEFT_COLUMN_OPEN: &str = r#"
\begin{minipage}[t]{0.33\textwidth}
\colorbox{cvblue}{\begin{minipage}[t][5mm][t]{\textwidth}\null\hfill\null\end{minipage}}

\vspace{-.2ex}
\colorbox{cvblue!90}{\color{white}
\kern0.09\textwidth\relax
\begin{minipage}[t][293mm][t]{0.82\textwidth}
\raggedright
\vspace*{2.5ex}
"#;

const LEFT_COLUMN_CLOSE: &str = r#"
\end{minipage}%
\kern0.09\textwidth\relax}
\end{minipage}%
\hskip2.5em
\begin{minipage}[t]{0.56\textwidth}
\setlength{\parskip}{0.8ex}

\vspace{2ex}
"#;

const DOCUMENT_CLOSE: &str = r#"
\end{minipage}
\end{document}
"#;

/// Renders the full CV as a LaTeX document.
pub fn render_cv(store: &CvStore) -> String {
    let mut out = String::from(PREAMBLE);

    out.push_str(LEFT_COLUMN_OPEN);
    out.push_str(&format_profile(store));
    out.push_str(LEFT_COLUMN_CLOSE);

    if !store.experience().is_empty() {
        out.push_str("\n\\headright{Work Experience}\n");
        for experience in store.experience() {
            out.push_str(&format_experience(experience));
        }
    }

    if !store.education().is_empty() {
        out.push_str("\n\\headright{Education}\n");
        for education in store.education() {
            out.push_str(&format_education(education));
        }
    }

    out.push_str(DOCUMENT_CLOSE);
    out
}

fn format_profile(store: &CvStore) -> String {
    let info = store.general_info();
    let mut out = String::new();

    if let Some(name) = &info.name {
        out.push_str(&format!("\\Large {} \\normalsize\n\n", format_name(name)));
        out.push_str("\\vspace*{0.5ex}\n\n");
    }

    out.push_str(&format!("\\headleft{{{}}}\n", escape_latex(&info.title)));
    if let Some(summary) = &info.summary {
        out.push_str(&escape_latex(summary));
        out.push('\n');
    }

    let mut contact = Vec::new();
    if let Some(email) = &info.email {
        contact.push(format!(
            "\\href{{mailto:{}}}{{{}}}",
            escape_url(email),
            escape_latex(email)
        ));
    }
    if let Some(linkedin) = &info.linkedin {
        contact.push(format!(
            "\\href{{https://www.{}}}{{{}}}",
            escape_url(linkedin),
            escape_latex(linkedin)
        ));
    }
    if let Some(github) = &info.github {
        contact.push(format!(
            "\\href{{https://{}}}{{{}}}",
            escape_url(github),
            escape_latex(github)
        ));
    }
    if !contact.is_empty() {
        out.push_str("\n\\headleft{Contact Information}\n");
        out.push_str(&contact.join("\\\\\n"));
        out.push('\n');
    }

    let languages: Vec<String> = store
        .spoken_languages()
        .iter()
        .map(|l| {
            format!(
                "{} --- {}",
                escape_latex(&l.language),
                proficiency_label(l.proficiency)
            )
        })
        .collect();
    out.push_str(&format_itemized("Languages", &languages));

    let domains = store.technical_domains();
    for (heading, domain_type) in [
        ("Programming Languages", TechnicalDomainType::Language),
        ("Tools \\& Frameworks", TechnicalDomainType::Tool),
        ("Skills", TechnicalDomainType::Skill),
    ] {
        let items: Vec<String> = skills_by_type(domains, domain_type)
            .into_iter()
            .map(escape_latex)
            .collect();
        out.push_str(&format_itemized(heading, &items));
    }

    out
}

/// Given names plain, family name in bold small caps.
fn format_name(name: &str) -> String {
    match name.rsplit_once(' ') {
        Some((given, family)) => format!(
            "{} \\textbf{{\\textsc{{{}}}}}",
            escape_latex(given),
            escape_latex(family)
        ),
        None => format!("\\textbf{{\\textsc{{{}}}}}", escape_latex(name)),
    }
}

fn proficiency_label(proficiency: LanguageProficiency) -> &'static str {
    match proficiency {
        LanguageProficiency::Native => "Native",
        LanguageProficiency::Fluent => "Fluent",
        LanguageProficiency::Professional => "Professional",
    }
}

fn format_itemized(heading: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let body: String = items.iter().map(|item| format!("\\item {item}\n")).collect();
    format!("\n\\headleft{{{heading}}}\n\\begin{{itemize}}\n{body}\\end{{itemize}}\n")
}

fn format_experience(experience: &Experience) -> String {
    let promotion = experience
        .promotion
        .as_deref()
        .map(|p| format!(" \\grayed{{{}}}", escape_latex(p)))
        .unwrap_or_default();
    let description = experience
        .description
        .as_deref()
        .map(escape_latex)
        .unwrap_or_default();
    let skills = experience
        .domain_skills
        .iter()
        .chain(&experience.programming_skills)
        .chain(&experience.tool_skills)
        .map(|s| escape_latex(s))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = format!(
        "\n{{\\large\\textbf{{{}}}}}\\dates{{{} -- {}}}\n\n\\textbf{{{}}}{} \\\\\n",
        escape_latex(&experience.company),
        escape_latex(&experience.start),
        escape_latex(&experience.end),
        escape_latex(&experience.role),
        promotion
    );
    if !description.is_empty() {
        out.push_str(&format!("\\\\\n{description}\\\\\n"));
    }
    if !skills.is_empty() {
        out.push_str(&format!("\\smaller{{{skills}}}\\\\\n"));
    }
    out
}

fn format_education(education: &Education) -> String {
    let mut items = Vec::new();
    if let Some(specialization) = &education.specialization {
        items.push(format!(
            "\\item Specialization in \\textbf{{{}}}\n",
            escape_latex(specialization)
        ));
    }
    if let Some(thesis) = &education.thesis {
        items.push(format!("\\item \\textbf{{Thesis:}} {}\n", escape_latex(thesis)));
    }

    let mut out = format!(
        "\n{{\\large {} in \\textbf{{{}}}}} \\dates{{{}}}\n\nat {}\n",
        escape_latex(&education.degree_type),
        escape_latex(&education.field),
        education.year,
        escape_latex(&education.institution)
    );
    // An empty itemize does not compile.
    if !items.is_empty() {
        out.push_str("\\begin{itemize}\n");
        out.push_str(&items.concat());
        out.push_str("\\end{itemize}\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models::{
        RawContent, RawEducation, RawExperience, RawGeneralInfo, RawQualifications,
    };
    use crate::cv::normalize::{normalize, NormalizeOptions};

    fn store() -> CvStore {
        let raw = RawContent {
            information: Some(RawGeneralInfo {
                firstname: Some("Ada".to_string()),
                lastname: Some("Lovelace".to_string()),
                identity: Some("Algo & Quant Engineer".to_string()),
                description: Some("Models 100% of the grid.".to_string()),
                email: Some("ada@example.com".to_string()),
                linkedin: Some("ada".to_string()),
                github: None,
            }),
            qualifications: Some(RawQualifications {
                native_language: Some("Danish".to_string()),
                fluent_languages: vec!["English".to_string()],
                programming: vec!["Python".to_string(), "C#".to_string()],
                tools: vec!["Power BI".to_string()],
                skills: vec![],
                ..Default::default()
            }),
            experience: vec![RawExperience {
                id: 2,
                company: "Bodil Energi".to_string(),
                title: "Tech Lead".to_string(),
                start: "Aug 2024".to_string(),
                end: "Present".to_string(),
                promotion: Some("Promoted June 2025".to_string()),
                location: None,
                description: "Grid stabilization.".to_string(),
                programming: vec!["Rust".to_string()],
                tools: vec!["Docker".to_string()],
                skills: vec!["Forecasting".to_string(), "Control".to_string()],
            }],
            education: vec![
                RawEducation {
                    id: 1,
                    university: "University of Copenhagen".to_string(),
                    name: "Mathematics".to_string(),
                    degree: "MSc".to_string(),
                    year: 2024,
                    location: None,
                    specialization: Some("Probability".to_string()),
                    thesis: Some("unfinished".to_string()),
                    programming: vec![],
                    tools: vec![],
                    skills: vec![],
                },
                RawEducation {
                    id: 0,
                    university: "DTU".to_string(),
                    name: "Software".to_string(),
                    degree: "BSc".to_string(),
                    year: 2020,
                    location: None,
                    specialization: None,
                    thesis: None,
                    programming: vec![],
                    tools: vec![],
                    skills: vec![],
                },
            ],
            ..Default::default()
        };
        normalize(raw, &NormalizeOptions::default())
    }

    #[test]
    fn test_document_is_complete() {
        let tex = render_cv(&store());
        assert!(tex.starts_with("\\documentclass"));
        assert!(tex.trim_end().ends_with("\\end{document}"));
        assert!(tex.contains("\\headright{Work Experience}"));
        assert!(tex.contains("\\headright{Education}"));
    }

    #[test]
    fn test_profile_escapes_and_formats() {
        let tex = render_cv(&store());
        assert!(tex.contains("Ada \\textbf{\\textsc{Lovelace}}"));
        assert!(tex.contains("\\headleft{Algo \\& Quant Engineer}"));
        assert!(tex.contains("Models 100\\% of the grid."));
        assert!(tex.contains("\\href{mailto:ada@example.com}{ada@example.com}"));
        assert!(tex.contains("\\href{https://www.linkedin.com/in/ada}"));
        assert!(tex.contains("\\item Danish --- Native"));
        assert!(tex.contains("\\item C\\#"));
        // No skills were listed, so no empty section.
        assert!(!tex.contains("\\headleft{Skills}"));
    }

    #[test]
    fn test_contact_links_escape_url_specials() {
        let mut store = store();
        store.general_info.email = Some("ada%ops@example.com".to_string());
        store.general_info.github = Some("github.com/ada#readme".to_string());
        let tex = render_cv(&store);
        assert!(tex.contains("\\href{mailto:ada\\%ops@example.com}{ada\\%ops@example.com}"));
        assert!(tex.contains("\\href{https://github.com/ada\\#readme}{github.com/ada\\#readme}"));
    }

    #[test]
    fn test_experience_entry() {
        let tex = render_cv(&store());
        assert!(tex.contains("{\\large\\textbf{Bodil Energi}}\\dates{Aug 2024 -- Present}"));
        assert!(tex.contains("\\textbf{Tech Lead} \\grayed{Promoted June 2025}"));
        assert!(tex.contains("\\smaller{Forecasting, Control, Rust, Docker}"));
    }

    #[test]
    fn test_education_entries_skip_absent_items() {
        let tex = render_cv(&store());
        assert!(tex.contains("{\\large MSc in \\textbf{Mathematics}} \\dates{2024}"));
        assert!(tex.contains("\\item Specialization in \\textbf{Probability}"));
        assert!(!tex.contains("Thesis:"));
        let bsc = tex.split("BSc in").nth(1).unwrap();
        assert!(!bsc.contains("\\begin{itemize}"));
    }
}
