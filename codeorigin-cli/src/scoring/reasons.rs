//! Human-readable justifications for a verdict
//!
//! The headline restating confidence always comes first. The rest follow a
//! fixed priority: variable names, function names, comment phrasing,
//! formatting, then comment density / absence.

use super::indicators::{
    HIGH_COMMENT_RATIO, HUMAN_INDENT_CEILING, LOW_COMMENT_RATIO, MIN_LINES_FOR_SPARSE_COMMENTS,
    NATURAL_COMMENT_RATIO, UNIFORM_INDENT_FLOOR,
};
use crate::features::FeatureSet;
use crate::models::{DetectionLevel, Verdict};

/// Headline reason, e.g. "High confidence (82.4%) in AI authorship"
pub fn headline(verdict: Verdict, confidence: f64) -> String {
    format!(
        "{} confidence ({:.1}%) in {} authorship",
        DetectionLevel::from_confidence(confidence).label(),
        confidence * 100.0,
        verdict
    )
}

pub fn generate(features: &FeatureSet, verdict: Verdict, confidence: f64) -> Vec<String> {
    let mut reasons = vec![headline(verdict, confidence)];
    match verdict {
        Verdict::Ai => reasons.extend(ai_reasons(features)),
        Verdict::Human => reasons.extend(human_reasons(features)),
    }
    reasons
}

fn ai_reasons(f: &FeatureSet) -> Vec<String> {
    let mut reasons = Vec::new();

    if f.ai_variable_name_hits > 2 {
        reasons.push(format!(
            "High use of AI-typical variable names ({} distinct)",
            f.ai_variable_name_hits
        ));
    } else if f.ai_variable_name_hits > 0 {
        reasons.push(format!(
            "Uses generic variable names common in generated code ({} distinct)",
            f.ai_variable_name_hits
        ));
    }

    if f.ai_function_name_hits > 1 {
        reasons.push(format!(
            "Multiple generic function verbs such as process/handle/generate ({} distinct)",
            f.ai_function_name_hits
        ));
    } else if f.ai_function_name_hits == 1 {
        reasons.push("Contains a generic, AI-style function name".to_string());
    }

    if f.ai_comment_pattern_hits > 0 {
        reasons.push(format!(
            "Contains AI-typical comment patterns ({} found)",
            f.ai_comment_pattern_hits
        ));
    }

    if f.indentation_consistency > UNIFORM_INDENT_FLOOR {
        reasons.push("Extremely consistent indentation typical of AI".to_string());
    }

    if f.comment_ratio > HIGH_COMMENT_RATIO {
        reasons.push(format!(
            "High comment-to-code ratio ({:.1}%) suggests AI",
            f.comment_ratio * 100.0
        ));
    } else if f.comment_ratio < LOW_COMMENT_RATIO && f.line_count > MIN_LINES_FOR_SPARSE_COMMENTS {
        reasons.push(format!(
            "Almost no comments across {} lines, a common trait of generated snippets",
            f.line_count
        ));
    }
    if f.long_descriptive_comment_count > 0 {
        reasons.push("Contains overly detailed explanatory comments".to_string());
    }

    reasons
}

fn human_reasons(f: &FeatureSet) -> Vec<String> {
    let mut reasons = Vec::new();

    if f.ai_variable_name_hits == 0 {
        reasons.push("Diverse, specific variable naming typical of humans".to_string());
    }

    if f.ai_function_name_hits == 0 {
        reasons.push("No generic AI-style function names".to_string());
    }

    if f.ai_variable_name_hits <= 1 && f.ai_comment_pattern_hits == 0 {
        reasons.push("Lacks typical AI code generation patterns".to_string());
    }

    if f.indentation_consistency < HUMAN_INDENT_CEILING {
        reasons.push("Inconsistent indentation patterns suggest human writing".to_string());
    }

    if !f.has_comments {
        reasons.push("No comments, common in quick hand-written code".to_string());
    } else if f.comment_ratio < NATURAL_COMMENT_RATIO && f.long_descriptive_comment_count == 0 {
        reasons.push("Natural commenting style suggests human authorship".to_string());
    }

    reasons
}
