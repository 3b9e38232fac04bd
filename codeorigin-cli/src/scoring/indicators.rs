//! Weighted indicators
//!
//! Each indicator is a pure function from a [`FeatureSet`] to a small signed
//! contribution, paired with the maximum weight it adds to the normalizer.

use crate::features::FeatureSet;
use serde::Serialize;

/// Indentation consistency above this looks machine-formatted
pub const UNIFORM_INDENT_FLOOR: f64 = 0.9;
/// Indentation consistency below this looks hand-written
pub const HUMAN_INDENT_CEILING: f64 = 0.7;
/// Comment markers per line above this is over-commented
pub const HIGH_COMMENT_RATIO: f64 = 0.3;
/// Comment markers per line below this is under-commented...
pub const LOW_COMMENT_RATIO: f64 = 0.05;
/// ...but only once the sample has more lines than this
pub const MIN_LINES_FOR_SPARSE_COMMENTS: usize = 10;
/// Comment markers per line below this read as a natural, light touch
pub const NATURAL_COMMENT_RATIO: f64 = 0.2;

/// Which rule produced a contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    VariableNames,
    FunctionNames,
    CommentPatterns,
    Formatting,
    CommentDensity,
    VerboseComments,
}

impl IndicatorKind {
    /// Short label used in aggregate reports
    pub fn description(&self) -> &'static str {
        match self {
            IndicatorKind::VariableNames => "Generic variable names",
            IndicatorKind::FunctionNames => "Generic function names",
            IndicatorKind::CommentPatterns => "Assistant-style comment phrasing",
            IndicatorKind::Formatting => "Uniform indentation",
            IndicatorKind::CommentDensity => "Unusual comment density",
            IndicatorKind::VerboseComments => "Verbose explanatory comments",
        }
    }
}

/// One indicator rule
#[derive(Clone, Copy)]
pub struct Indicator {
    pub kind: IndicatorKind,
    pub weight: i32,
    pub evaluate: fn(&FeatureSet) -> i32,
}

/// Contribution of one indicator to a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub kind: IndicatorKind,
    pub points: i32,
    pub weight: i32,
}

/// Evaluation order matters only for reporting
pub const INDICATORS: &[Indicator] = &[
    Indicator {
        kind: IndicatorKind::VariableNames,
        weight: 2,
        evaluate: variable_names,
    },
    Indicator {
        kind: IndicatorKind::FunctionNames,
        weight: 2,
        evaluate: function_names,
    },
    Indicator {
        kind: IndicatorKind::CommentPatterns,
        weight: 2,
        evaluate: comment_patterns,
    },
    Indicator {
        kind: IndicatorKind::Formatting,
        weight: 1,
        evaluate: formatting,
    },
    Indicator {
        kind: IndicatorKind::CommentDensity,
        weight: 1,
        evaluate: comment_density,
    },
    Indicator {
        kind: IndicatorKind::VerboseComments,
        weight: 1,
        evaluate: verbose_comments,
    },
];

fn variable_names(f: &FeatureSet) -> i32 {
    match f.ai_variable_name_hits {
        0 => 0,
        1..=2 => 1,
        _ => 2,
    }
}

fn function_names(f: &FeatureSet) -> i32 {
    match f.ai_function_name_hits {
        0 => 0,
        1 => 1,
        _ => 2,
    }
}

fn comment_patterns(f: &FeatureSet) -> i32 {
    match f.ai_comment_pattern_hits {
        0 => 0,
        1 => 1,
        _ => 2,
    }
}

/// The only indicator that can pull the score down
fn formatting(f: &FeatureSet) -> i32 {
    if f.indentation_consistency > UNIFORM_INDENT_FLOOR {
        1
    } else if f.indentation_consistency < HUMAN_INDENT_CEILING {
        -1
    } else {
        0
    }
}

fn comment_density(f: &FeatureSet) -> i32 {
    let over = f.comment_ratio > HIGH_COMMENT_RATIO;
    let under =
        f.comment_ratio < LOW_COMMENT_RATIO && f.line_count > MIN_LINES_FOR_SPARSE_COMMENTS;
    i32::from(over || under)
}

fn verbose_comments(f: &FeatureSet) -> i32 {
    i32::from(f.long_descriptive_comment_count > 0)
}
