//! Text normalization for the two scoring paths.
//!
//! Similarity scoring runs text through a [`Preprocessor`] chosen at startup.
//! Keyword and skill analysis use [`tokenize`], which keeps tech tokens such
//! as `c++`, `c#` and `node.js` intact.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

use crate::analysis::knowledge::KnowledgeBase;

static KEYWORD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z][a-z0-9+.#-]+").expect("keyword token pattern is valid"));

/// English stopwords applied by the stemming strategy before similarity scoring.
const LINGUISTIC_STOPWORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "be", "became", "because", "become", "becomes", "becoming", "been",
    "before", "beforehand", "behind", "being", "below", "beside", "besides", "between", "beyond",
    "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing", "done", "down",
    "due", "during", "each", "either", "else", "elsewhere", "enough", "etc", "even", "ever",
    "every", "everyone", "everything", "everywhere", "except", "few", "for", "former",
    "formerly", "from", "further", "had", "has", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hers", "herself", "him", "himself", "his", "how",
    "however", "i", "if", "in", "indeed", "into", "is", "it", "its", "itself", "just", "last",
    "latter", "least", "less", "many", "may", "me", "meanwhile", "might", "mine", "more",
    "moreover", "most", "mostly", "much", "must", "my", "myself", "namely", "neither", "never",
    "nevertheless", "next", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now",
    "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other",
    "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "per", "perhaps",
    "please", "quite", "rather", "re", "really", "same", "seem", "seemed", "seeming", "seems",
    "several", "she", "should", "since", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "than", "that", "the", "their",
    "them", "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
    "therein", "these", "they", "this", "those", "though", "through", "throughout", "thru",
    "thus", "to", "together", "too", "toward", "towards", "under", "unless", "until", "up",
    "upon", "us", "used", "using", "very", "via", "was", "we", "well", "were", "what",
    "whatever", "when", "whence", "whenever", "where", "whereas", "whereby", "wherein",
    "whether", "which", "while", "who", "whoever", "whole", "whom", "whose", "why", "will",
    "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Normalizes raw text before the TF-IDF similarity pass.
///
/// Carried in `Analyzer` as `Arc<dyn Preprocessor>` so the strategy is picked
/// once at startup instead of being checked at every call site.
pub trait Preprocessor: Send + Sync {
    /// Short label for logs and diagnostics.
    fn name(&self) -> &'static str;

    fn preprocess(&self, text: &str) -> String;
}

/// Which similarity preprocessing strategy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreprocessMode {
    Plain,
    #[default]
    Lemmatized,
}

impl FromStr for PreprocessMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(PreprocessMode::Plain),
            "lemmatized" | "stemmed" => Ok(PreprocessMode::Lemmatized),
            other => Err(format!(
                "unknown preprocessing mode '{other}' (expected 'plain' or 'lemmatized')"
            )),
        }
    }
}

/// Builds the preprocessing strategy for the configured mode.
pub fn build_preprocessor(mode: PreprocessMode) -> Arc<dyn Preprocessor> {
    match mode {
        PreprocessMode::Plain => Arc::new(PlainPreprocessor),
        PreprocessMode::Lemmatized => Arc::new(LemmatizingPreprocessor::new()),
    }
}

/// Letters and whitespace only, lowercased.
pub struct PlainPreprocessor;

impl Preprocessor for PlainPreprocessor {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn preprocess(&self, text: &str) -> String {
        clean_text(text)
    }
}

/// Plain cleaning followed by stopword removal and Snowball stemming.
pub struct LemmatizingPreprocessor {
    stemmer: Stemmer,
    stopwords: HashSet<&'static str>,
}

impl LemmatizingPreprocessor {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stopwords: LINGUISTIC_STOPWORDS.iter().copied().collect(),
        }
    }
}

impl Default for LemmatizingPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor for LemmatizingPreprocessor {
    fn name(&self) -> &'static str {
        "lemmatized"
    }

    fn preprocess(&self, text: &str) -> String {
        clean_text(text)
            .split_whitespace()
            .filter(|word| !self.stopwords.contains(*word))
            .map(|word| self.stemmer.stem(word).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Drops everything except ASCII letters and whitespace, then lowercases.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Keyword tokens: lowercase, start with a letter, may carry `+ . # -`.
/// Stopwords and tokens of two characters or fewer are dropped.
pub fn tokenize(text: &str, kb: &KnowledgeBase) -> Vec<String> {
    let lowered = text.to_lowercase();
    KEYWORD_TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str().trim_end_matches(&['.', '-'][..]))
        .filter(|token| token.chars().count() > 2 && !kb.is_stopword(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::builtin().unwrap()
    }

    #[test]
    fn test_clean_text_strips_digits_and_punctuation() {
        assert_eq!(clean_text("Led 5 teams, shipped C++!"), "led  teams shipped c");
    }

    #[test]
    fn test_plain_preprocessor_keeps_stopwords() {
        let out = PlainPreprocessor.preprocess("The Quick fox");
        assert_eq!(out, "the quick fox");
    }

    #[test]
    fn test_lemmatizer_drops_stopwords_and_stems() {
        let out = LemmatizingPreprocessor::new().preprocess("The engineers were deploying services");
        let words: Vec<&str> = out.split_whitespace().collect();
        assert_eq!(words.len(), 3, "got {out:?}");
        assert!(!words.contains(&"the"));
        assert!(!words.contains(&"were"));
        assert!(words.contains(&"deploy"));
    }

    #[test]
    fn test_lemmatizer_empty_input() {
        assert_eq!(LemmatizingPreprocessor::new().preprocess(""), "");
        assert_eq!(LemmatizingPreprocessor::new().preprocess("123 !!"), "");
    }

    #[test]
    fn test_preprocess_mode_parsing() {
        assert_eq!("plain".parse::<PreprocessMode>(), Ok(PreprocessMode::Plain));
        assert_eq!(
            " Lemmatized ".parse::<PreprocessMode>(),
            Ok(PreprocessMode::Lemmatized)
        );
        assert!("spacy".parse::<PreprocessMode>().is_err());
        assert_eq!(PreprocessMode::default(), PreprocessMode::Lemmatized);
    }

    #[test]
    fn test_build_preprocessor_selects_strategy() {
        assert_eq!(build_preprocessor(PreprocessMode::Plain).name(), "plain");
        assert_eq!(build_preprocessor(PreprocessMode::Lemmatized).name(), "lemmatized");
    }

    #[test]
    fn test_tokenize_keeps_tech_tokens() {
        let tokens = tokenize("Strong C++ and C# skills; Node.js required.", &kb());
        assert!(tokens.contains(&"c++".to_string()));
        assert!(tokens.contains(&"node.js".to_string()));
        assert!(tokens.contains(&"required".to_string()));
        // "c#" is only two characters long
        assert!(!tokens.contains(&"c#".to_string()));
    }

    #[test]
    fn test_tokenize_drops_stopwords_and_short_tokens() {
        let tokens = tokenize("The team is on it with AWS and Go", &kb());
        assert_eq!(tokens, vec!["team".to_string(), "aws".to_string()]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("", &kb()).is_empty());
    }
}
