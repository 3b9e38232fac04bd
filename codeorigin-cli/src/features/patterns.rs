//! Vocabularies and compiled patterns used by the feature extractor
//!
//! All regexes are compiled once and shared across threads.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;

/// Generic identifiers AI assistants reach for when naming variables
pub const AI_VARIABLE_NAMES: &[&str] = &[
    "result", "data", "output", "value", "item", "temp", "response",
];

/// Generic verbs AI assistants reach for when naming functions
pub const AI_FUNCTION_NAMES: &[&str] = &[
    "process",
    "handle",
    "execute",
    "run",
    "generate",
    "create",
    "calculate",
];

/// Explanatory phrases typical of assistant-written comments (lower case)
pub const AI_COMMENT_PHRASES: &[&str] = &[
    "example usage",
    "this function",
    "this will",
    "note that",
    "make sure",
];

/// Line and block comment markers, counted language-agnostically
pub const COMMENT_MARKERS: &[&str] = &["//", "#", "/*", "*/"];

/// Keyword weights for the lexical complexity score
pub const COMPLEXITY_WEIGHTS: &[(&str, u32)] = &[
    ("if", 1),
    ("for", 2),
    ("while", 2),
    ("try", 1),
    ("def", 1),
    ("function", 1),
    ("fn", 1),
    ("func", 1),
    ("class", 2),
    ("lambda", 1),
];

static AI_VARIABLE_SET: OnceLock<RegexSet> = OnceLock::new();
static AI_FUNCTION_SET: OnceLock<RegexSet> = OnceLock::new();
static FUNCTION_LIKE_RE: OnceLock<Regex> = OnceLock::new();
static LONG_COMMENT_RE: OnceLock<Regex> = OnceLock::new();
static COMPLEXITY_RE: OnceLock<Regex> = OnceLock::new();

/// One case-insensitive whole-word pattern per vocabulary entry, so every
/// spelling the case folding admits maps back to a single word
fn vocabulary_set(words: &[&str]) -> RegexSet {
    RegexSet::new(
        words
            .iter()
            .map(|w| format!(r"(?i)\b{}\b", regex::escape(w))),
    )
    .expect("valid regex")
}

pub fn ai_variable_set() -> &'static RegexSet {
    AI_VARIABLE_SET.get_or_init(|| vocabulary_set(AI_VARIABLE_NAMES))
}

pub fn ai_function_set() -> &'static RegexSet {
    AI_FUNCTION_SET.get_or_init(|| vocabulary_set(AI_FUNCTION_NAMES))
}

/// `function` as a whole word, or `def `/`func `/`fn `/`sub ` starting a word
pub fn function_like_re() -> &'static Regex {
    FUNCTION_LIKE_RE
        .get_or_init(|| Regex::new(r"\b(?:function\b|(?:def|func|fn|sub) )").expect("valid regex"))
}

/// Line comments with 50+ trailing characters, or block comments of 100+
pub fn long_comment_re() -> &'static Regex {
    LONG_COMMENT_RE.get_or_init(|| {
        Regex::new(r"#[^\n]{50,}|//[^\n]{50,}|/\*[\s\S]{100,}\*/").expect("valid regex")
    })
}

pub fn complexity_re() -> &'static Regex {
    COMPLEXITY_RE.get_or_init(|| {
        let alternation = COMPLEXITY_WEIGHTS
            .iter()
            .map(|(kw, _)| *kw)
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"\b({})\b", alternation)).expect("valid regex")
    })
}

/// Weight of a keyword captured by [`complexity_re`]
pub fn complexity_weight(keyword: &str) -> u32 {
    COMPLEXITY_WEIGHTS
        .iter()
        .find(|(kw, _)| *kw == keyword)
        .map(|(_, w)| *w)
        .unwrap_or(0)
}
