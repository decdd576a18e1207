//! Report assembly: runs every analyzer over one résumé / job description pair
//! and collects the results into an immutable [`AnalysisReport`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::knowledge::KnowledgeBase;
use crate::analysis::metrics::coverage::{
    analyze_section_coverage, calculate_keyword_coverage, get_top_keywords, KeywordCoverage,
    SectionCoverage, DEFAULT_TOP_KEYWORDS,
};
use crate::analysis::metrics::health::{analyze_power_words, check_resume_health};
use crate::analysis::metrics::readiness::{
    build_action_checklist, calculate_ats_readiness, calculate_score_breakdown, ScoreImpact,
};
use crate::analysis::metrics::stats::{analyze_resume_stats, ResumeStats};
use crate::analysis::preprocess::Preprocessor;
use crate::analysis::similarity::calculate_similarity;
use crate::analysis::skills::{SkillMatcher, SkillRecommendation};

/// Full analysis result. Persisted verbatim into history as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// TF-IDF cosine similarity, 0 – 100, two decimals.
    pub similarity_score: f64,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<SkillRecommendation>,
    pub score_breakdown: Vec<ScoreImpact>,
    pub power_word_count: usize,
    pub power_words: Vec<String>,
    pub health_score: u32,
    pub health_issues: Vec<String>,
    pub resume_stats: ResumeStats,
    pub section_coverage: SectionCoverage,
    pub keyword_coverage: KeywordCoverage,
    pub ats_score: u32,
    pub action_checklist: Vec<String>,
    pub jd_top_keywords: Vec<String>,
    pub filename: String,
}

/// Owns the shared, read-only analysis inputs: knowledge base, skill matcher
/// and the similarity preprocessing strategy.
pub struct Analyzer {
    knowledge: Arc<KnowledgeBase>,
    preprocessor: Arc<dyn Preprocessor>,
    skills: SkillMatcher,
}

impl Analyzer {
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        preprocessor: Arc<dyn Preprocessor>,
    ) -> Result<Self, regex::Error> {
        let skills = SkillMatcher::new(knowledge.clone())?;
        Ok(Self {
            knowledge,
            preprocessor,
            skills,
        })
    }

    pub fn preprocessor_name(&self) -> &'static str {
        self.preprocessor.name()
    }

    /// Runs every analyzer and assembles the report. Never fails: empty or
    /// degenerate text yields zero counts, empty lists and baseline scores.
    pub fn analyze(&self, resume_text: &str, jd_text: &str, filename: &str) -> AnalysisReport {
        let kb = self.knowledge.as_ref();

        let similarity_score = calculate_similarity(resume_text, jd_text, self.preprocessor.as_ref());
        let missing_skills = self.skills.identify_missing_skills(resume_text, jd_text);
        let recommendations = self.skills.get_recommendations(&missing_skills);
        let score_breakdown = calculate_score_breakdown(&missing_skills, similarity_score);

        let power_words = analyze_power_words(resume_text, kb);
        let health = check_resume_health(resume_text);
        let resume_stats = analyze_resume_stats(resume_text);
        let section_coverage = analyze_section_coverage(resume_text);
        let keyword_coverage = calculate_keyword_coverage(resume_text, jd_text, kb);
        let ats_score = calculate_ats_readiness(health.score, &missing_skills, &resume_stats);
        let action_checklist = build_action_checklist(
            &health.issues,
            &missing_skills,
            &resume_stats,
            &section_coverage,
        );
        let jd_top_keywords = get_top_keywords(jd_text, DEFAULT_TOP_KEYWORDS, kb);

        debug!(
            filename,
            similarity_score,
            ats_score,
            health_score = health.score,
            missing = missing_skills.len(),
            "Analysis complete"
        );

        AnalysisReport {
            similarity_score,
            missing_skills,
            recommendations,
            score_breakdown,
            power_word_count: power_words.count,
            power_words: power_words.words,
            health_score: health.score,
            health_issues: health.issues,
            resume_stats,
            section_coverage,
            keyword_coverage,
            ats_score,
            action_checklist,
            jd_top_keywords,
            filename: filename.to_string(),
        }
    }
}
