//! Filesystem loader for the raw content store.
//!
//! Layout under the data root:
//! - `general/{information,config,qualifications}.yaml` — singletons
//! - `{experience,education,projects,coursework,publications}/*.yaml` — each
//!   file a sequence of records, concatenated in file-name order
//!
//! Content problems never abort loading: a missing file or directory yields
//! an absent singleton or an empty collection, and a file that fails to parse
//! is skipped with a warning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::content::models::{OneOrMany, RawContent};

const GENERAL_DIR: &str = "general";
const INFORMATION_FILE: &str = "information.yaml";
const CONFIG_FILE: &str = "config.yaml";
const QUALIFICATIONS_FILE: &str = "qualifications.yaml";

const EXPERIENCE_DIR: &str = "experience";
const EDUCATION_DIR: &str = "education";
const PROJECTS_DIR: &str = "projects";
const COURSEWORK_DIR: &str = "coursework";
const PUBLICATIONS_DIR: &str = "publications";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content root {path} could not be read: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Reads every record group under `root`.
///
/// Returns an error only when `root` exists but cannot be listed. A missing
/// root loads as empty content.
pub fn load_content(root: &Path) -> Result<RawContent, ContentError> {
    match fs::metadata(root) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Content root {} does not exist; serving empty CV", root.display());
            return Ok(RawContent::default());
        }
        Err(source) => {
            return Err(ContentError::Root {
                path: root.to_path_buf(),
                source,
            })
        }
    }
    fs::read_dir(root).map_err(|source| ContentError::Root {
        path: root.to_path_buf(),
        source,
    })?;

    let general = root.join(GENERAL_DIR);
    let content = RawContent {
        information: read_singleton(&general.join(INFORMATION_FILE)),
        config: read_singleton(&general.join(CONFIG_FILE)),
        qualifications: read_singleton(&general.join(QUALIFICATIONS_FILE)),
        experience: read_category(&root.join(EXPERIENCE_DIR)),
        education: read_category(&root.join(EDUCATION_DIR)),
        projects: read_category(&root.join(PROJECTS_DIR)),
        coursework: read_category(&root.join(COURSEWORK_DIR)),
        publications: read_category(&root.join(PUBLICATIONS_DIR)),
    };

    info!(
        "Loaded content from {}: {} experience, {} education, {} projects, {} coursework, {} publications",
        root.display(),
        content.experience.len(),
        content.education.len(),
        content.projects.len(),
        content.coursework.len(),
        content.publications.len()
    );

    Ok(content)
}

/// Reads a singleton file. Missing or malformed files yield `None`.
fn read_singleton<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.is_file() {
        debug!("Singleton {} not present", path.display());
        return None;
    }
    match parse_file::<OneOrMany<T>>(path) {
        Ok(parsed) => parsed.into_first(),
        Err(e) => {
            warn!("Skipping {e}");
            None
        }
    }
}

/// Reads and concatenates every YAML file in `dir`, sorted by file name.
fn read_category<T: DeserializeOwned>(dir: &Path) -> Vec<T> {
    let files = match yaml_files(dir) {
        Ok(files) => files,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Category directory {} not present", dir.display());
            return Vec::new();
        }
        Err(e) => {
            warn!("Skipping category {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for path in files {
        match parse_file::<Option<Vec<T>>>(&path) {
            // An empty file parses as null.
            Ok(parsed) => records.extend(parsed.unwrap_or_default()),
            Err(e) => warn!("Skipping {e}"),
        }
    }
    records
}

fn yaml_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    files.sort();
    Ok(files)
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let text = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, body: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_missing_root_loads_empty() {
        let dir = TempDir::new().unwrap();
        let content = load_content(&dir.path().join("nope")).unwrap();
        assert!(content.information.is_none());
        assert!(content.experience.is_empty());
    }

    #[test]
    fn test_missing_singletons_are_absent() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "experience/a.yaml", "[]");

        let content = load_content(dir.path()).unwrap();
        assert!(content.information.is_none());
        assert!(content.config.is_none());
        assert!(content.qualifications.is_none());
    }

    #[test]
    fn test_category_files_concatenate_in_name_order() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "experience/b.yaml",
            "- { id: 2, company: Beta, title: Dev }",
        );
        write(
            dir.path(),
            "experience/a.yaml",
            "- { id: 1, company: Alpha, title: Dev }\n- { id: 5, company: Alpha, title: Lead }",
        );

        let content = load_content(dir.path()).unwrap();
        let companies: Vec<_> = content
            .experience
            .iter()
            .map(|e| e.company.as_str())
            .collect();
        assert_eq!(companies, vec!["Alpha", "Alpha", "Beta"]);
    }

    #[test]
    fn test_malformed_file_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "projects/bad.yaml", "- id: [unterminated");
        write(
            dir.path(),
            "projects/good.yaml",
            "- { id: 1, header: Grid, slug: grid, visibility: selected_work }",
        );
        write(dir.path(), "general/information.yaml", "identity: [");

        let content = load_content(dir.path()).unwrap();
        assert_eq!(content.projects.len(), 1);
        assert!(content.information.is_none());
    }

    #[test]
    fn test_empty_file_and_non_yaml_files_ignored() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "education/empty.yaml", "");
        write(dir.path(), "education/notes.txt", "not yaml");

        let content = load_content(dir.path()).unwrap();
        assert!(content.education.is_empty());
    }

    #[test]
    fn test_singleton_reads_first_of_sequence() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "general/information.yaml",
            "- identity: Quant Engineer\n  email: me@example.com",
        );

        let content = load_content(dir.path()).unwrap();
        let info = content.information.unwrap();
        assert_eq!(info.identity.as_deref(), Some("Quant Engineer"));
        assert_eq!(info.email.as_deref(), Some("me@example.com"));
    }
}
