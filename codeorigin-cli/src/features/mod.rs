//! Feature extraction for authorship scoring
//!
//! Turns raw source text into a fixed set of lexical/statistical features.
//! Nothing here parses code: every feature is a count, a ratio or a regex
//! match over the raw text, and none of them look at the language hint.

mod patterns;

pub use patterns::{AI_COMMENT_PHRASES, AI_FUNCTION_NAMES, AI_VARIABLE_NAMES, COMMENT_MARKERS};

use crate::models::CodeSample;
use regex::RegexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Below this many non-blank lines indentation is treated as perfectly uniform
const MIN_LINES_FOR_INDENT_VARIANCE: usize = 2;

/// Features derived from one code sample.
///
/// Serialized with snake_case keys; this is the `features` object of the
/// HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Newline-separated segments, never below 1
    pub line_count: usize,
    pub char_count: usize,
    pub has_comments: bool,
    pub has_function_like: bool,
    /// Distinct generic variable names found
    pub ai_variable_name_hits: usize,
    /// Distinct generic function verbs found
    pub ai_function_name_hits: usize,
    /// Distinct assistant-style comment phrases found
    pub ai_comment_pattern_hits: usize,
    /// 1.0 for uniform indentation, towards 0.0 as it disperses
    pub indentation_consistency: f64,
    /// Comment markers per line
    pub comment_ratio: f64,
    pub long_descriptive_comment_count: usize,
    pub avg_line_length: f64,
    pub complexity_score: f64,
}

/// Extracts a [`FeatureSet`] from a [`CodeSample`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, sample: &CodeSample) -> FeatureSet {
        let text = sample.text();
        let lines: Vec<&str> = text.split('\n').collect();
        let line_count = lines.len().max(1);

        let features = FeatureSet {
            line_count,
            char_count: text.chars().count(),
            has_comments: has_comments(text),
            has_function_like: patterns::function_like_re().is_match(text),
            ai_variable_name_hits: distinct_matches(patterns::ai_variable_set(), text),
            ai_function_name_hits: distinct_matches(patterns::ai_function_set(), text),
            ai_comment_pattern_hits: comment_phrase_hits(text),
            indentation_consistency: indentation_consistency(&lines),
            comment_ratio: comment_marker_count(text) as f64 / line_count as f64,
            long_descriptive_comment_count: patterns::long_comment_re().find_iter(text).count(),
            avg_line_length: lines.iter().map(|l| l.chars().count()).sum::<usize>() as f64
                / line_count as f64,
            complexity_score: complexity_score(text),
        };

        debug!(
            language = %sample.language(),
            lines = features.line_count,
            var_hits = features.ai_variable_name_hits,
            fn_hits = features.ai_function_name_hits,
            phrase_hits = features.ai_comment_pattern_hits,
            indentation = features.indentation_consistency,
            "extracted features"
        );

        features
    }
}

fn has_comments(text: &str) -> bool {
    COMMENT_MARKERS.iter().any(|m| text.contains(m))
}

/// Number of distinct vocabulary words matched, ignoring case
fn distinct_matches(set: &RegexSet, text: &str) -> usize {
    set.matches(text).iter().count()
}

fn comment_phrase_hits(text: &str) -> usize {
    let lower = text.to_lowercase();
    AI_COMMENT_PHRASES
        .iter()
        .filter(|phrase| lower.contains(*phrase))
        .count()
}

/// Every occurrence counts, so one line can contribute several markers
fn comment_marker_count(text: &str) -> usize {
    COMMENT_MARKERS.iter().map(|m| text.matches(m).count()).sum()
}

/// Leading space/tab characters before the first other character
fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// 1 / (1 + population standard deviation of indent widths).
///
/// Only dispersion matters: a block indented 8 everywhere scores the same
/// as one indented 0 everywhere.
pub fn indentation_consistency(lines: &[&str]) -> f64 {
    let indents: Vec<f64> = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_whitespace(l) as f64)
        .collect();

    if indents.len() < MIN_LINES_FOR_INDENT_VARIANCE {
        return 1.0;
    }

    let n = indents.len() as f64;
    let mean = indents.iter().sum::<f64>() / n;
    let variance = indents.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    1.0 / (1.0 + variance.sqrt())
}

fn complexity_score(text: &str) -> f64 {
    patterns::complexity_re()
        .find_iter(text)
        .map(|m| patterns::complexity_weight(m.as_str()))
        .sum::<u32>() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;

    fn extract(text: &str) -> FeatureSet {
        FeatureExtractor::new().extract(&CodeSample::new(text, Language::Python))
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let f = extract("");
        assert_eq!(f.line_count, 1);
        assert_eq!(f.char_count, 0);
        assert!(!f.has_comments);
        assert_eq!(f.indentation_consistency, 1.0);
        assert_eq!(f.comment_ratio, 0.0);
        assert_eq!(f.avg_line_length, 0.0);
    }

    #[test]
    fn test_line_and_char_counts() {
        let f = extract("a\nbb\nccc\n");
        assert_eq!(f.line_count, 4);
        assert_eq!(f.char_count, 9);
        assert!((f.avg_line_length - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_char_count_uses_characters_not_bytes() {
        let f = extract("héllo");
        assert_eq!(f.char_count, 5);
    }

    #[test]
    fn test_comment_markers_are_language_agnostic() {
        assert!(extract("x = 1 # note").has_comments);
        assert!(extract("int x; // note").has_comments);
        assert!(extract("/* block").has_comments);
        assert!(extract("block */").has_comments);
        assert!(!extract("x = 1").has_comments);
    }

    #[test]
    fn test_comment_ratio_counts_every_marker() {
        // "//", "/*", "*/" on one line, "#" on another
        let f = extract("a // b /* c */\n# d");
        assert_eq!(f.line_count, 2);
        assert!((f.comment_ratio - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_vocabulary_hits_count_distinct_words() {
        let f = extract("result = data\nresult = RESULT + data\nvalue");
        assert_eq!(f.ai_variable_name_hits, 3);

        let f = extract("process(); process(); Handle(); runner()");
        assert_eq!(f.ai_function_name_hits, 2);
    }

    #[test]
    fn test_case_folded_spellings_count_once() {
        // U+017F LATIN SMALL LETTER LONG S folds to 's'
        let f = extract("result = 1\nre\u{17f}ult = 2");
        assert_eq!(f.ai_variable_name_hits, 1);

        let f = extract("re\u{17f}pon\u{17f}e = proce\u{17f}\u{17f}(RESPONSE)");
        assert_eq!(f.ai_variable_name_hits, 1);
        assert_eq!(f.ai_function_name_hits, 1);
    }

    #[test]
    fn test_all_vocabulary_words_found() {
        let text = format!(
            "{}\n{}",
            AI_VARIABLE_NAMES.join(" "),
            AI_FUNCTION_NAMES.join(" ")
        );
        let f = extract(&text);
        assert_eq!(f.ai_variable_name_hits, AI_VARIABLE_NAMES.len());
        assert_eq!(f.ai_function_name_hits, AI_FUNCTION_NAMES.len());
    }

    #[test]
    fn test_comment_phrases_are_substrings() {
        let f = extract("# Example Usage: call this function\n# Note That it works");
        assert_eq!(f.ai_comment_pattern_hits, 3);
        // phrases match anywhere, not only in comments
        let f = extract("msg = \"make sure\"");
        assert_eq!(f.ai_comment_pattern_hits, 1);
    }

    #[test]
    fn test_uniform_indentation_is_fully_consistent() {
        let f = extract("    a\n    b\n\n    c\n    d");
        assert_eq!(f.indentation_consistency, 1.0);
        let f = extract("\ta\n\tb");
        assert_eq!(f.indentation_consistency, 1.0);
    }

    #[test]
    fn test_indentation_consistency_uses_population_stddev() {
        // indents 0 and 4: mean 2, variance 4, stddev 2 -> 1/3
        let f = extract("a\n    b");
        assert!((f.indentation_consistency - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_non_blank_line_defaults_to_consistent() {
        let f = extract("\n\n        lonely\n   \n");
        assert_eq!(f.indentation_consistency, 1.0);
    }

    #[test]
    fn test_function_like_detection() {
        assert!(extract("def f(): return 1").has_function_like);
        assert!(extract("function f() {}").has_function_like);
        assert!(!extract("x = 1").has_function_like);
    }

    #[test]
    fn test_long_descriptive_comments_counted() {
        let text = format!(
            "# {}\nx = 1\n// {}\n",
            "explaining at great length ".repeat(3),
            "and again in a second language ".repeat(2)
        );
        let f = extract(&text);
        assert_eq!(f.long_descriptive_comment_count, 2);
    }

    #[test]
    fn test_complexity_score_is_weighted() {
        // if(1) + for(2) + while(2) + def(1) + class(2)
        let f = extract("class A:\n  def f(self):\n    if x:\n      for i in y:\n        while z: pass");
        assert!((f.complexity_score - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_features_serialize_with_snake_case_keys() {
        let json = serde_json::to_value(extract("x = 1")).unwrap();
        for key in [
            "line_count",
            "char_count",
            "has_comments",
            "has_function_like",
            "ai_variable_name_hits",
            "ai_function_name_hits",
            "ai_comment_pattern_hits",
            "indentation_consistency",
            "comment_ratio",
            "long_descriptive_comment_count",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }
}
