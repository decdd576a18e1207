use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::knowledge::KnowledgeBase;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern is valid")
});

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Sections every résumé is expected to carry. Each absent one costs 10 points.
const REQUIRED_SECTIONS: &[&str] = &["experience", "education", "skills", "projects"];

const MISSING_EMAIL_PENALTY: i32 = 20;
const MISSING_SECTION_PENALTY: i32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// 0 – 100
    pub score: u32,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerWords {
    pub count: usize,
    /// Matched verbs in action-verb list order.
    pub words: Vec<String>,
}

/// Structural health: contact email plus the four core sections.
pub fn check_resume_health(text: &str) -> HealthReport {
    let mut score = 100_i32;
    let mut issues = Vec::new();

    if !EMAIL.is_match(text) {
        score -= MISSING_EMAIL_PENALTY;
        issues.push("Missing Email Address".to_string());
    }

    let text_lower = text.to_lowercase();
    for section in REQUIRED_SECTIONS {
        if !text_lower.contains(section) {
            score -= MISSING_SECTION_PENALTY;
            issues.push(format!("Missing '{}' section", capitalize(section)));
        }
    }

    HealthReport {
        score: score.clamp(0, 100) as u32,
        issues,
    }
}

/// Counts which action verbs appear as whole words, case-insensitively.
pub fn analyze_power_words(text: &str, kb: &KnowledgeBase) -> PowerWords {
    let text_lower = text.to_lowercase();
    let words: HashSet<&str> = WORD.find_iter(&text_lower).map(|m| m.as_str()).collect();

    let found: Vec<String> = kb
        .action_verbs
        .iter()
        .filter(|verb| words.contains(*verb))
        .map(|verb| verb.to_string())
        .collect();

    PowerWords {
        count: found.len(),
        words: found,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_resume_is_healthy() {
        let text = "jane@example.com\nExperience\nEducation\nSkills\nProjects";
        let report = check_resume_health(text);
        assert_eq!(report.score, 100);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_missing_email_costs_twenty() {
        let report = check_resume_health("EXPERIENCE EDUCATION SKILLS PROJECTS");
        assert_eq!(report.score, 80);
        assert_eq!(report.issues, vec!["Missing Email Address".to_string()]);
    }

    #[test]
    fn test_missing_sections_cost_ten_each() {
        let report = check_resume_health("me@mail.io Experience: built Docker pipelines");
        assert_eq!(report.score, 70);
        assert_eq!(
            report.issues,
            vec![
                "Missing 'Education' section".to_string(),
                "Missing 'Skills' section".to_string(),
                "Missing 'Projects' section".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_text_floors_at_forty() {
        let report = check_resume_health("");
        assert_eq!(report.score, 40);
        assert_eq!(report.issues.len(), 5);
        assert_eq!(report.issues[0], "Missing Email Address");
    }

    #[test]
    fn test_health_score_bounded() {
        for text in ["", "a", "x@y.zz experience education skills projects"] {
            let report = check_resume_health(text);
            assert!(report.score <= 100);
        }
    }

    #[test]
    fn test_power_words_whole_word_only() {
        let kb = KnowledgeBase::builtin().unwrap();
        let result = analyze_power_words("Led the team. Architected services; misled nobody", &kb);
        assert_eq!(result.count, 2);
        assert_eq!(result.words, vec!["architected".to_string(), "led".to_string()]);
    }

    #[test]
    fn test_power_words_empty() {
        let kb = KnowledgeBase::builtin().unwrap();
        let result = analyze_power_words("", &kb);
        assert_eq!(result.count, 0);
        assert!(result.words.is_empty());
    }
}
