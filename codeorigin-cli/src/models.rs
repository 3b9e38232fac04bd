//! Core data models for codeorigin
//!
//! These models flow between the feature extractor, the heuristic scorer
//! and the outer surfaces (HTTP service, CLI reporters).

use crate::scoring::{IndicatorKind, ScoreBreakdown, INDICATORS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Patterns listed in a report summary
const MAX_COMMON_PATTERNS: usize = 5;

/// Declared language of a code sample.
///
/// Advisory only: the engine never checks the hint against the content
/// and never gates a feature on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "String", from = "String")]
pub enum Language {
    #[default]
    Python,
    Java,
    Cpp,
    Html,
    Css,
    Javascript,
    Typescript,
    /// Any hint outside the known set, kept verbatim (lower-cased)
    Other(String),
}

impl Language {
    /// Tags accepted on the wire, in display order
    pub const SUPPORTED: &'static [&'static str] = &[
        "python",
        "java",
        "cpp",
        "html",
        "css",
        "javascript",
        "typescript",
    ];

    /// Parse a language hint. Never fails: unknown tags become `Other`.
    pub fn from_hint(hint: &str) -> Self {
        let lower = hint.trim().to_lowercase();
        match lower.as_str() {
            "" | "python" | "py" => Language::Python,
            "java" => Language::Java,
            "cpp" | "c++" | "cxx" => Language::Cpp,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            "javascript" | "js" => Language::Javascript,
            "typescript" | "ts" => Language::Typescript,
            _ => Language::Other(lower),
        }
    }

    /// Guess a language from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        let lang = match ext.as_str() {
            "py" | "pyi" => Language::Python,
            "java" => Language::Java,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "h" => Language::Cpp,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            "js" | "mjs" | "cjs" | "jsx" => Language::Javascript,
            "ts" | "tsx" | "mts" => Language::Typescript,
            _ => return None,
        };
        Some(lang)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::Html => "html",
            Language::Css => "css",
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
            Language::Other(tag) => tag,
        }
    }
}

impl From<String> for Language {
    fn from(tag: String) -> Self {
        Language::from_hint(&tag)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.as_str().to_string()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single submission to score. Built per request and dropped after scoring.
#[derive(Debug, Clone)]
pub struct CodeSample {
    text: String,
    language: Language,
}

impl CodeSample {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> &Language {
        &self.language
    }
}

/// Binary authorship verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "AI")]
    Ai,
    Human,
}

impl Verdict {
    pub fn is_ai(&self) -> bool {
        matches!(self, Verdict::Ai)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Ai => write!(f, "AI"),
            Verdict::Human => write!(f, "Human"),
        }
    }
}

/// Confidence band for a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl DetectionLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.9 {
            DetectionLevel::VeryHigh
        } else if confidence > 0.75 {
            DetectionLevel::High
        } else if confidence > 0.6 {
            DetectionLevel::Medium
        } else {
            DetectionLevel::Low
        }
    }

    /// Capitalised label used at the start of the headline reason
    pub fn label(&self) -> &'static str {
        match self {
            DetectionLevel::Low => "Low",
            DetectionLevel::Medium => "Moderate",
            DetectionLevel::High => "High",
            DetectionLevel::VeryHigh => "Very high",
        }
    }
}

impl std::fmt::Display for DetectionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionLevel::Low => write!(f, "low"),
            DetectionLevel::Medium => write!(f, "medium"),
            DetectionLevel::High => write!(f, "high"),
            DetectionLevel::VeryHigh => write!(f, "very_high"),
        }
    }
}

/// Result of scoring one file in a CLI run
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub path: PathBuf,
    pub language: Language,
    pub result: crate::scoring::ScoreResult,
}

/// Aggregate over a batch of scored files
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub total_files: usize,
    pub ai_generated_files: usize,
    pub human_generated_files: usize,
    /// Files that failed validation (too short, too large, unreadable)
    pub skipped_files: Vec<SkippedFile>,
    pub average_confidence: f64,
    pub languages_detected: Vec<Language>,
    /// AI-leaning indicators most often seen among AI-classified files
    pub most_common_ai_patterns: Vec<String>,
    pub file_results: Vec<FileResult>,
    pub detector_version: String,
    pub analysis_start: chrono::DateTime<chrono::Utc>,
    pub analysis_end: chrono::DateTime<chrono::Utc>,
    pub total_analysis_time_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

impl DetectionReport {
    /// Build a report from per-file results
    pub fn from_results(
        file_results: Vec<FileResult>,
        skipped_files: Vec<SkippedFile>,
        analysis_start: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        let analysis_end = chrono::Utc::now();
        let total_files = file_results.len();
        let ai_generated_files = file_results
            .iter()
            .filter(|r| r.result.verdict.is_ai())
            .count();

        let average_confidence = if total_files == 0 {
            0.0
        } else {
            file_results.iter().map(|r| r.result.confidence).sum::<f64>() / total_files as f64
        };

        let mut languages_detected: Vec<Language> = Vec::new();
        for r in &file_results {
            if !languages_detected.contains(&r.language) {
                languages_detected.push(r.language.clone());
            }
        }

        let most_common_ai_patterns = most_common_ai_patterns(&file_results);
        let elapsed = analysis_end - analysis_start;

        Self {
            total_files,
            ai_generated_files,
            human_generated_files: total_files - ai_generated_files,
            skipped_files,
            average_confidence,
            languages_detected,
            most_common_ai_patterns,
            file_results,
            detector_version: env!("CARGO_PKG_VERSION").to_string(),
            analysis_start,
            analysis_end,
            total_analysis_time_ms: elapsed.num_microseconds().unwrap_or(0) as f64 / 1000.0,
        }
    }

    pub fn ai_percentage(&self) -> f64 {
        if self.total_files == 0 {
            return 0.0;
        }
        self.ai_generated_files as f64 / self.total_files as f64 * 100.0
    }

    pub fn human_percentage(&self) -> f64 {
        if self.total_files == 0 {
            return 0.0;
        }
        self.human_generated_files as f64 / self.total_files as f64 * 100.0
    }
}

/// Rank AI-leaning indicators by how many AI-classified files they fired in.
/// Ties keep indicator table order.
fn most_common_ai_patterns(file_results: &[FileResult]) -> Vec<String> {
    let mut counts: Vec<(IndicatorKind, usize)> = Vec::new();
    for r in file_results.iter().filter(|r| r.result.verdict.is_ai()) {
        for kind in ScoreBreakdown::of(&r.result.features).ai_leaning() {
            match counts.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, n)) => *n += 1,
                None => counts.push((kind, 1)),
            }
        }
    }
    counts.sort_by_key(|(kind, n)| {
        let order = INDICATORS.iter().position(|i| i.kind == *kind).unwrap_or(usize::MAX);
        (std::cmp::Reverse(*n), order)
    });
    counts
        .into_iter()
        .take(MAX_COMMON_PATTERNS)
        .map(|(kind, _)| kind.description().to_string())
        .collect()
}
