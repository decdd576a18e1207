//! Knowledge base: the read-only lookup tables every analyzer consults.
//!
//! Built once at startup and shared through `Arc<KnowledgeBase>`. Nothing in
//! here is mutated after construction.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Skill table shipped with the binary. `SKILL_DB_PATH` replaces it at startup.
const BUILTIN_SKILLS_JSON: &str = include_str!("../../data/skills.json");

/// Strong action verbs counted as "power words" in a résumé.
pub const ACTION_VERBS: &[&str] = &[
    "architected",
    "engineered",
    "spearheaded",
    "orchestrated",
    "pioneered",
    "deployed",
    "optimized",
    "scaled",
    "accelerated",
    "revamped",
    "modernized",
    "automated",
    "implemented",
    "designed",
    "developed",
    "managed",
    "led",
    "created",
    "built",
    "resolved",
];

/// Function words dropped from keyword tokenization.
pub const KEYWORD_STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "else", "when", "at", "by", "for", "in",
    "of", "on", "to", "with", "as", "from", "into", "is", "are", "was", "were", "be", "been",
    "being", "it", "its", "this", "that", "these", "those", "i", "you", "he", "she", "they", "we",
    "my", "your", "his", "her", "their", "our", "me", "him", "them", "us", "not", "no", "yes",
    "do", "does", "did", "done", "have", "has", "had", "will", "would", "can", "could", "should",
    "may", "might", "must", "about", "over", "under", "more", "most", "less", "least", "very",
    "than",
];

/// Learning material attached to one known skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub resources: Vec<String>,
    pub tips: String,
    pub interview: String,
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    /// Keyed by canonical lowercase skill name. Ordered so iteration is stable.
    pub skills: BTreeMap<String, SkillRecord>,
    pub action_verbs: Vec<&'static str>,
    pub stopwords: HashSet<&'static str>,
}

impl KnowledgeBase {
    /// Knowledge base backed by the bundled skill table.
    pub fn builtin() -> Result<Self> {
        Self::from_skill_json(BUILTIN_SKILLS_JSON).context("Bundled skill table is malformed")
    }

    /// Knowledge base whose skill table is read from a JSON file on disk.
    pub fn from_skill_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill table at {}", path.display()))?;
        Self::from_skill_json(&raw)
            .with_context(|| format!("Skill table at {} is malformed", path.display()))
    }

    pub fn from_skill_json(raw: &str) -> Result<Self> {
        let parsed: BTreeMap<String, SkillRecord> = serde_json::from_str(raw)?;
        let skills = parsed
            .into_iter()
            .map(|(name, record)| (name.trim().to_lowercase(), record))
            .filter(|(name, _)| !name.is_empty())
            .collect();

        Ok(Self {
            skills,
            action_verbs: ACTION_VERBS.to_vec(),
            stopwords: KEYWORD_STOPWORDS.iter().copied().collect(),
        })
    }

    pub fn skill(&self, name: &str) -> Option<&SkillRecord> {
        self.skills.get(name)
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_has_fourteen_skills() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(kb.skills.len(), 14);
        for name in ["python", "machine learning", "c++", "css"] {
            assert!(kb.skill(name).is_some(), "missing skill {name}");
        }
    }

    #[test]
    fn test_builtin_records_are_complete() {
        let kb = KnowledgeBase::builtin().unwrap();
        for (name, record) in &kb.skills {
            assert!(!record.resources.is_empty(), "{name} has no resources");
            assert!(!record.tips.is_empty(), "{name} has no tip");
            assert!(!record.interview.is_empty(), "{name} has no interview question");
        }
    }

    #[test]
    fn test_skill_keys_are_normalized() {
        let raw = r#"{" Rust ": {"resources": ["The Book"], "tips": "Borrow", "interview": "Lifetimes?"}}"#;
        let kb = KnowledgeBase::from_skill_json(raw).unwrap();
        assert!(kb.skill("rust").is_some());
    }

    #[test]
    fn test_malformed_table_is_rejected() {
        assert!(KnowledgeBase::from_skill_json("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_twenty_action_verbs() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(kb.action_verbs.len(), 20);
        assert!(kb.is_stopword("the"));
        assert!(!kb.is_stopword("python"));
    }

    #[test]
    fn test_skill_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skills.json");
        std::fs::write(
            &path,
            r#"{"go": {"resources": ["Tour of Go"], "tips": "Channels", "interview": "Goroutines?"}}"#,
        )
        .unwrap();
        let kb = KnowledgeBase::from_skill_file(&path).unwrap();
        assert_eq!(kb.skills.len(), 1);
        assert!(kb.skill("go").is_some());
    }
}
