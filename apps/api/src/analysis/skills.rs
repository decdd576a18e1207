//! Skill gap detection against the knowledge base skill table.

use std::collections::BTreeSet;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::analysis::knowledge::KnowledgeBase;

/// Learning plan for one skill the résumé is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecommendation {
    /// Title-cased display name, e.g. "Machine Learning".
    pub name: String,
    pub resources: Vec<String>,
    pub tips: String,
    pub interview: String,
}

/// Whole-word, case-insensitive matcher for every skill in the table.
pub struct SkillMatcher {
    knowledge: Arc<KnowledgeBase>,
    patterns: Vec<(String, Regex)>,
}

impl SkillMatcher {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Result<Self, regex::Error> {
        let patterns = knowledge
            .skills
            .keys()
            .map(|skill| Ok((skill.clone(), skill_pattern(skill)?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self {
            knowledge,
            patterns,
        })
    }

    /// Canonical names of every known skill mentioned in `text`.
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        self.patterns
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(skill, _)| skill.clone())
            .collect()
    }

    /// Skills the job description asks for that the résumé never mentions,
    /// in alphabetical order.
    pub fn identify_missing_skills(&self, resume_text: &str, jd_text: &str) -> Vec<String> {
        let resume_skills = self.extract_skills(resume_text);
        self.extract_skills(jd_text)
            .difference(&resume_skills)
            .cloned()
            .collect()
    }

    pub fn get_recommendations(&self, missing_skills: &[String]) -> Vec<SkillRecommendation> {
        missing_skills
            .iter()
            .filter_map(|skill| {
                self.knowledge.skill(skill).map(|record| SkillRecommendation {
                    name: title_case(skill),
                    resources: record.resources.clone(),
                    tips: record.tips.clone(),
                    interview: record.interview.clone(),
                })
            })
            .collect()
    }
}

/// A boundary is only asserted on an edge that is a word character, so
/// `c++` still matches "c++ developer" while `java` never matches "javascript".
fn skill_pattern(skill: &str) -> Result<Regex, regex::Error> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let starts_word = skill.chars().next().is_some_and(is_word);
    let ends_word = skill.chars().last().is_some_and(is_word);

    let pattern = format!(
        "{}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(skill),
        if ends_word { r"\b" } else { "" },
    );
    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

/// Uppercases the first letter of every alphabetic run: "c++" → "C++",
/// "machine learning" → "Machine Learning".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
