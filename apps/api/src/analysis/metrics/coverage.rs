//! Section and keyword coverage.
//!
//! Keyword ranking is by frequency. Equal counts keep the order in which the
//! tokens first appeared; that order is incidental and should not be read as
//! a ranking signal.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::knowledge::KnowledgeBase;
use crate::analysis::preprocess::tokenize;

/// Sections looked for when computing coverage, in display order.
pub const KNOWN_SECTIONS: &[&str] = &[
    "summary",
    "experience",
    "education",
    "skills",
    "projects",
    "certifications",
    "achievements",
];

pub const DEFAULT_TOP_KEYWORDS: usize = 12;
/// How many job-description keywords keyword coverage is measured against.
pub const COVERAGE_KEYWORDS: usize = 15;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionCoverage {
    pub present: Vec<String>,
    pub missing: Vec<String>,
    /// 0 – 100
    pub coverage: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordCoverage {
    /// 0 – 100
    pub coverage: u32,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

pub fn analyze_section_coverage(text: &str) -> SectionCoverage {
    let text_lower = text.to_lowercase();
    let (present, missing): (Vec<&str>, Vec<&str>) = KNOWN_SECTIONS
        .iter()
        .partition(|section| text_lower.contains(*section));

    SectionCoverage {
        coverage: percent(present.len(), KNOWN_SECTIONS.len()),
        present: present.into_iter().map(String::from).collect(),
        missing: missing.into_iter().map(String::from).collect(),
    }
}

/// Most frequent keyword tokens in `text`, at most `limit` of them.
pub fn get_top_keywords(text: &str, limit: usize, kb: &KnowledgeBase) -> Vec<String> {
    let tokens = tokenize(text, kb);

    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for token in tokens {
        match index.get(&token) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(token.clone(), order.len());
                order.push((token, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.into_iter().take(limit).map(|(word, _)| word).collect()
}

/// How many of the job description's top keywords the résumé mentions.
pub fn calculate_keyword_coverage(
    resume_text: &str,
    jd_text: &str,
    kb: &KnowledgeBase,
) -> KeywordCoverage {
    let jd_keywords = get_top_keywords(jd_text, COVERAGE_KEYWORDS, kb);
    if jd_keywords.is_empty() {
        return KeywordCoverage::default();
    }

    let resume_tokens: HashSet<String> = tokenize(resume_text, kb).into_iter().collect();
    let (mut matched, mut missing): (Vec<String>, Vec<String>) = jd_keywords
        .into_iter()
        .partition(|keyword| resume_tokens.contains(keyword));
    matched.sort();
    missing.sort();

    KeywordCoverage {
        coverage: percent(matched.len(), matched.len() + missing.len()),
        matched,
        missing,
    }
}

/// `part / whole` as a whole percentage, 0 when `whole` is 0.
pub(crate) fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round().clamp(0.0, 100.0) as u32
}
