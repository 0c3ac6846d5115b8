//! Relational Join Layer — resolves foreign keys at query time.
//!
//! Stored entities only carry ids; the joined views below are assembled per
//! call by scanning the sibling collections. Projects marked
//! `personal_document` never appear as related projects.

use serde::Serialize;

use crate::cv::models::{Coursework, Education, Experience, SelectedWork, Visibility};
use crate::cv::stack::{SkillCategories, TechStack};
use crate::cv::store::CvStore;

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceWithProjects<'a> {
    #[serde(flatten)]
    pub experience: &'a Experience,
    pub related_projects: Vec<&'a SelectedWork>,
}

impl ExperienceWithProjects<'_> {
    pub fn tech_stack(&self) -> TechStack {
        let own = std::iter::once(self.experience as &dyn SkillCategories);
        let related = self
            .related_projects
            .iter()
            .map(|p| *p as &dyn SkillCategories);
        TechStack::union(own.chain(related))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EducationWithProjects<'a> {
    #[serde(flatten)]
    pub education: &'a Education,
    pub related_projects: Vec<&'a SelectedWork>,
    pub structured_coursework: Vec<&'a Coursework>,
}

impl EducationWithProjects<'_> {
    pub fn tech_stack(&self) -> TechStack {
        let own = std::iter::once(self.education as &dyn SkillCategories);
        let related = self
            .related_projects
            .iter()
            .map(|p| *p as &dyn SkillCategories);
        TechStack::union(own.chain(related))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectedWorkWithRelations<'a> {
    #[serde(flatten)]
    pub project: &'a SelectedWork,
    pub related_experience: Option<&'a Experience>,
    pub related_education: Option<&'a Education>,
}

impl SelectedWorkWithRelations<'_> {
    pub fn tech_stack(&self) -> TechStack {
        let own = std::iter::once(self.project as &dyn SkillCategories);
        let experience = self
            .related_experience
            .map(|e| e as &dyn SkillCategories);
        let education = self.related_education.map(|e| e as &dyn SkillCategories);
        TechStack::union(own.chain(experience).chain(education))
    }
}

impl CvStore {
    /// Experience plus its listed projects. `None` for an unknown id.
    pub fn experience_with_projects(&self, id: &str) -> Option<ExperienceWithProjects<'_>> {
        let experience = self.experience_by_id(id)?;
        Some(ExperienceWithProjects {
            experience,
            related_projects: self.listed_projects_where(|p| {
                p.related_experience_id.as_deref() == Some(id)
            }),
        })
    }

    /// Education plus its listed projects and structured coursework. `None`
    /// for an unknown id.
    pub fn education_with_projects(&self, id: &str) -> Option<EducationWithProjects<'_>> {
        let education = self.education_by_id(id)?;
        Some(EducationWithProjects {
            education,
            related_projects: self.listed_projects_where(|p| {
                p.related_education_id.as_deref() == Some(id)
            }),
            structured_coursework: self.coursework_for_education(id),
        })
    }

    /// Project plus the experience and education it references. Dangling
    /// references resolve to `None`.
    pub fn project_with_relations(&self, slug: &str) -> Option<SelectedWorkWithRelations<'_>> {
        let project = self.project_by_slug(slug)?;
        Some(SelectedWorkWithRelations {
            project,
            related_experience: project
                .related_experience_id
                .as_deref()
                .and_then(|id| self.experience_by_id(id)),
            related_education: project
                .related_education_id
                .as_deref()
                .and_then(|id| self.education_by_id(id)),
        })
    }

    fn listed_projects_where<F>(&self, matches: F) -> Vec<&SelectedWork>
    where
        F: Fn(&SelectedWork) -> bool,
    {
        self.projects
            .iter()
            .filter(|p| p.visibility != Visibility::PersonalDocument && matches(*p))
            .collect()
    }
}
