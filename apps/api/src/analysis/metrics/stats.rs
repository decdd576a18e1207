use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));
static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence pattern is valid"));
static BULLET_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[•\-*]\s+").expect("bullet pattern is valid"));

/// Line boundaries, including the bare `\r` and Unicode separators some PDF
/// and DOCX extractors emit. A `\r\n` pair yields an extra empty line, which
/// never counts as a bullet.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeStats {
    pub word_count: usize,
    pub char_count: usize,
    pub sentence_count: usize,
    /// One decimal; 0.0 when there are no sentences.
    pub avg_words_per_sentence: f64,
    pub bullet_count: usize,
}

pub fn analyze_resume_stats(text: &str) -> ResumeStats {
    if text.is_empty() {
        return ResumeStats::default();
    }

    let word_count = WORD.find_iter(text).count();
    let sentence_count = SENTENCE_END
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();
    let bullet_count = text
        .split(LINE_BREAKS)
        .filter(|line| BULLET_LINE.is_match(line))
        .count();

    let avg_words_per_sentence = if sentence_count > 0 {
        (word_count as f64 / sentence_count as f64 * 10.0).round() / 10.0
    } else {
        0.0
    };

    ResumeStats {
        word_count,
        char_count: text.chars().count(),
        sentence_count,
        avg_words_per_sentence,
        bullet_count,
    }
}
