//! Technical-stack aggregation across an entity and its related entities.
//!
//! Each category is a set union computed independently: a skill string
//! appears at most once per category, but the same string may appear in
//! more than one category.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cv::models::{Education, Experience, SelectedWork};

/// Anything carrying the three categorized skill lists.
pub trait SkillCategories {
    fn programming_skills(&self) -> &[String];
    fn tool_skills(&self) -> &[String];
    fn domain_skills(&self) -> &[String];
}

impl SkillCategories for Experience {
    fn programming_skills(&self) -> &[String] {
        &self.programming_skills
    }
    fn tool_skills(&self) -> &[String] {
        &self.tool_skills
    }
    fn domain_skills(&self) -> &[String] {
        &self.domain_skills
    }
}

impl SkillCategories for Education {
    fn programming_skills(&self) -> &[String] {
        &self.programming_skills
    }
    fn tool_skills(&self) -> &[String] {
        &self.tool_skills
    }
    fn domain_skills(&self) -> &[String] {
        &self.domain_skills
    }
}

impl SkillCategories for SelectedWork {
    fn programming_skills(&self) -> &[String] {
        &self.programming_skills
    }
    fn tool_skills(&self) -> &[String] {
        &self.tool_skills
    }
    fn domain_skills(&self) -> &[String] {
        &self.domain_skills
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TechStack {
    pub programming: Vec<String>,
    pub tools: Vec<String>,
    pub skills: Vec<String>,
}

impl TechStack {
    /// Unions the categorized skills of every source, first-seen order kept.
    pub fn union<'a, I>(sources: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn SkillCategories>,
    {
        let mut programming = UnionBuilder::default();
        let mut tools = UnionBuilder::default();
        let mut skills = UnionBuilder::default();

        for source in sources {
            programming.extend(source.programming_skills());
            tools.extend(source.tool_skills());
            skills.extend(source.domain_skills());
        }

        TechStack {
            programming: programming.items,
            tools: tools.items,
            skills: skills.items,
        }
    }
}

#[derive(Default)]
struct UnionBuilder {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl UnionBuilder {
    fn extend(&mut self, values: &[String]) {
        for value in values {
            if self.seen.insert(value.clone()) {
                self.items.push(value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::models::Visibility;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn project(programming: &[&str], tools: &[&str], domain: &[&str]) -> SelectedWork {
        SelectedWork {
            id: "proj-1".to_string(),
            title: "Grid".to_string(),
            description: None,
            link: None,
            color: None,
            slug: Some("grid".to_string()),
            tags: vec![],
            full_description: None,
            image_name: None,
            features: vec![],
            tech_stack: vec![],
            order_index: 0,
            related_experience_id: None,
            related_education_id: None,
            visibility: Visibility::SelectedWork,
            programming_skills: strings(programming),
            tool_skills: strings(tools),
            domain_skills: strings(domain),
        }
    }

    #[test]
    fn test_union_deduplicates_per_category() {
        let a = project(&["Python", "Rust"], &["Git"], &["Forecasting"]);
        let b = project(&["Rust", "SQL"], &["Git", "Docker"], &["Python"]);

        let stack = TechStack::union([&a as &dyn SkillCategories, &b]);

        assert_eq!(stack.programming, strings(&["Python", "Rust", "SQL"]));
        assert_eq!(stack.tools, strings(&["Git", "Docker"]));
        // Categories are independent: "Python" may sit in two of them.
        assert_eq!(stack.skills, strings(&["Forecasting", "Python"]));
    }

    #[test]
    fn test_union_of_nothing_is_empty() {
        let stack = TechStack::union(std::iter::empty::<&dyn SkillCategories>());
        assert_eq!(stack, TechStack::default());
    }

    #[test]
    fn test_duplicates_within_one_source_collapse() {
        let a = project(&["R", "R"], &[], &[]);
        let stack = TechStack::union([&a as &dyn SkillCategories]);
        assert_eq!(stack.programming, strings(&["R"]));
    }
}
