//! ATS readiness, the action checklist, and per-skill score impact.

use serde::{Deserialize, Serialize};

use crate::analysis::metrics::coverage::SectionCoverage;
use crate::analysis::metrics::stats::ResumeStats;
use crate::analysis::skills::title_case;

const MIN_WORDS: usize = 200;
const MAX_WORDS: usize = 1000;
const MIN_BULLETS: usize = 3;
/// Cap on the gain promised for any single missing skill.
const MAX_IMPACT_PER_SKILL: f64 = 15.0;

/// Estimated similarity gain from adding one missing skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreImpact {
    pub skill: String,
    pub impact: f64,
    pub action: String,
}

/// Starts from the health score and subtracts for length, bullets and skill gaps.
pub fn calculate_ats_readiness(
    health_score: u32,
    missing_skills: &[String],
    stats: &ResumeStats,
) -> u32 {
    let mut score = health_score as i64;
    if stats.word_count < MIN_WORDS {
        score -= 10;
    }
    if stats.word_count > MAX_WORDS {
        score -= 8;
    }
    if stats.bullet_count < MIN_BULLETS {
        score -= 6;
    }
    if !missing_skills.is_empty() {
        score -= (missing_skills.len() as i64 * 2).min(20);
    }
    score.clamp(0, 100) as u32
}

/// Ordered remediation steps shown to the user.
pub fn build_action_checklist(
    health_issues: &[String],
    missing_skills: &[String],
    stats: &ResumeStats,
    section_coverage: &SectionCoverage,
) -> Vec<String> {
    let mut actions: Vec<String> = health_issues.to_vec();

    if stats.word_count < MIN_WORDS {
        actions.push("Resume is too short; aim for 250–700 words.".to_string());
    }
    if stats.word_count > MAX_WORDS {
        actions.push("Resume is long; trim to key impact statements.".to_string());
    }
    if stats.bullet_count < MIN_BULLETS {
        actions.push("Add bullet points under experience/projects.".to_string());
    }

    if !section_coverage.missing.is_empty() {
        let sections: Vec<String> = section_coverage
            .missing
            .iter()
            .map(|s| title_case(s))
            .collect();
        actions.push(format!("Consider adding sections: {}.", sections.join(", ")));
    }

    if !missing_skills.is_empty() {
        actions.push("Add missing skills into experience/project bullets where relevant.".to_string());
    }

    actions
}

/// Splits the remaining headroom (100 − score) evenly across missing skills,
/// capped at 15 points each.
pub fn calculate_score_breakdown(missing_skills: &[String], current_score: f64) -> Vec<ScoreImpact> {
    if missing_skills.is_empty() {
        return vec![];
    }

    let headroom = (100.0 - current_score).max(0.0);
    let per_skill = (headroom / missing_skills.len() as f64).min(MAX_IMPACT_PER_SKILL);
    let impact = (per_skill * 10.0).round() / 10.0;

    missing_skills
        .iter()
        .map(|skill| ScoreImpact {
            skill: skill.clone(),
            impact,
            action: format!("Integrate '{skill}' into your experience section."),
        })
        .collect()
}
