//! Lexical similarity between a résumé and a job description.
//!
//! Both texts are preprocessed, vectorized with a TF-IDF model fitted on
//! exactly these two documents, and compared by cosine similarity.
//!
//! Weighting:
//! - tf = raw term count
//! - idf = ln((1 + n) / (1 + df)) + 1, with n = 2
//! - each row is L2-normalized before the dot product

use std::collections::HashMap;

use crate::analysis::preprocess::Preprocessor;

/// Similarity in percent, rounded to two decimals. Returns 0.0 when either
/// side has no terms left after preprocessing.
pub fn calculate_similarity(
    resume_text: &str,
    jd_text: &str,
    preprocessor: &dyn Preprocessor,
) -> f64 {
    let resume = preprocessor.preprocess(resume_text);
    let jd = preprocessor.preprocess(jd_text);

    let resume_counts = term_counts(&resume);
    let jd_counts = term_counts(&jd);
    if resume_counts.is_empty() || jd_counts.is_empty() {
        return 0.0;
    }

    let resume_vec = tfidf_vector(&resume_counts, &jd_counts);
    let jd_vec = tfidf_vector(&jd_counts, &resume_counts);

    let dot: f64 = resume_vec
        .iter()
        .filter_map(|(term, weight)| jd_vec.get(term).map(|other| weight * other))
        .sum();
    let norm = l2_norm(&resume_vec) * l2_norm(&jd_vec);
    if norm == 0.0 {
        return 0.0;
    }

    let score = (dot / norm * 100.0).clamp(0.0, 100.0);
    (score * 100.0).round() / 100.0
}

/// Terms are runs of two or more word characters.
fn term_counts(text: &str) -> HashMap<&str, u32> {
    let mut counts = HashMap::new();
    for term in text
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
    {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

fn tfidf_vector<'a>(
    counts: &HashMap<&'a str, u32>,
    other: &HashMap<&str, u32>,
) -> HashMap<&'a str, f64> {
    const DOCUMENTS: f64 = 2.0;
    counts
        .iter()
        .map(|(term, &tf)| {
            let df = if other.contains_key(term) { 2.0 } else { 1.0 };
            let idf = ((1.0 + DOCUMENTS) / (1.0 + df)).ln() + 1.0;
            (*term, tf as f64 * idf)
        })
        .collect()
}

fn l2_norm(vector: &HashMap<&str, f64>) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::preprocess::{LemmatizingPreprocessor, PlainPreprocessor};

    #[test]
    fn test_identical_text_scores_100() {
        let text = "Senior Rust engineer building distributed storage systems";
        let score = calculate_similarity(text, text, &PlainPreprocessor);
        assert!((score - 100.0).abs() < 0.01, "Score was {score}");

        let score = calculate_similarity(text, text, &LemmatizingPreprocessor::new());
        assert!((score - 100.0).abs() < 0.01, "Score was {score}");
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(calculate_similarity("", "", &PlainPreprocessor), 0.0);
        assert_eq!(calculate_similarity("python", "", &PlainPreprocessor), 0.0);
        assert_eq!(calculate_similarity("", "python", &PlainPreprocessor), 0.0);
    }

    #[test]
    fn test_text_that_cleans_to_nothing_scores_zero() {
        assert_eq!(calculate_similarity("123 456 !!", "42", &PlainPreprocessor), 0.0);
        // Only stopwords survive cleaning, so the stemmed vector is empty.
        let score = calculate_similarity("the and of", "the and of", &LemmatizingPreprocessor::new());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero() {
        let score = calculate_similarity("apples oranges", "rust kubernetes", &PlainPreprocessor);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_known_two_document_value() {
        // "aa bb" vs "aa cc": shared term idf = 1, unique terms idf = ln(1.5) + 1.
        // cosine = 1 / (1 + (ln(1.5) + 1)^2)
        let unique = 1.5_f64.ln() + 1.0;
        let expected = 1.0 / (1.0 + unique * unique) * 100.0;
        let score = calculate_similarity("aa bb", "aa cc", &PlainPreprocessor);
        assert!((score - expected).abs() < 0.01, "Score was {score}, expected {expected}");
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let resume = "Built Docker pipelines and Python services for data teams";
        let jd = "Looking for Python engineer with Docker and Kubernetes experience";
        let score = calculate_similarity(resume, jd, &PlainPreprocessor);
        assert!(score > 0.0 && score < 100.0, "Score was {score}");
    }

    #[test]
    fn test_score_rounded_to_two_decimals() {
        let score = calculate_similarity("aa bb cc", "aa dd", &PlainPreprocessor);
        assert_eq!(score, (score * 100.0).round() / 100.0);
    }

    #[test]
    fn test_single_letter_words_are_ignored() {
        assert_eq!(calculate_similarity("a b c", "a b c", &PlainPreprocessor), 0.0);
    }
}
