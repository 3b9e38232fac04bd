//! Heuristic authorship scorer
//!
//! Accumulates weighted indicators over a [`FeatureSet`], normalizes by the
//! total indicator weight, perturbs with a bounded jitter and clamps into
//! [`MIN_SCORE`, `MAX_SCORE`]. The clamp keeps a heuristic detector from ever
//! reporting near-certainty.
//!
//! ```text
//! normalized = ai_score / indicator_weight
//! final      = clamp(normalized + jitter, 0.15, 0.85)
//! verdict    = AI if final > 0.5 else Human
//! ```

pub mod indicators;
pub mod jitter;
mod reasons;

pub use indicators::{Contribution, IndicatorKind, INDICATORS};
pub use jitter::{FixedJitter, JitterSource, NoJitter, SeededJitter, UniformJitter};

use crate::features::FeatureSet;
use crate::models::{DetectionLevel, Verdict};
use serde::Serialize;
use std::sync::Arc;

/// Lowest reportable AI probability
pub const MIN_SCORE: f64 = 0.15;
/// Highest reportable AI probability
pub const MAX_SCORE: f64 = 0.85;
/// Scores strictly above this are AI
pub const DECISION_THRESHOLD: f64 = 0.5;
/// Used if the indicator weights ever sum to zero
const FALLBACK_SCORE: f64 = 0.4;

/// Per-indicator accumulation before normalization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub contributions: Vec<Contribution>,
    pub ai_score: i32,
    pub indicator_weight: i32,
}

impl ScoreBreakdown {
    /// Evaluate every indicator against `features`
    pub fn of(features: &FeatureSet) -> Self {
        let contributions: Vec<Contribution> = INDICATORS
            .iter()
            .map(|ind| Contribution {
                kind: ind.kind,
                points: (ind.evaluate)(features),
                weight: ind.weight,
            })
            .collect();

        Self {
            ai_score: contributions.iter().map(|c| c.points).sum(),
            indicator_weight: contributions.iter().map(|c| c.weight).sum(),
            contributions,
        }
    }

    pub fn normalized(&self) -> f64 {
        if self.indicator_weight == 0 {
            return FALLBACK_SCORE;
        }
        self.ai_score as f64 / self.indicator_weight as f64
    }

    /// Whether a given indicator contributed a non-zero amount
    pub fn fired(&self, kind: IndicatorKind) -> bool {
        self.contributions
            .iter()
            .any(|c| c.kind == kind && c.points != 0)
    }

    /// Indicators that pushed towards AI, in table order
    pub fn ai_leaning(&self) -> impl Iterator<Item = IndicatorKind> + '_ {
        self.contributions
            .iter()
            .filter(|c| c.points > 0)
            .map(|c| c.kind)
    }
}

/// Outcome of scoring one sample
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub verdict: Verdict,
    /// Probability of the winning class
    pub confidence: f64,
    pub ai_probability: f64,
    pub human_probability: f64,
    pub detection_level: DetectionLevel,
    /// Headline first, never empty
    pub reasons: Vec<String>,
    pub features: FeatureSet,
}

/// Converts features into a verdict. Cheap to clone; the jitter source is shared.
#[derive(Debug, Clone)]
pub struct HeuristicScorer {
    jitter: Arc<dyn JitterSource>,
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new(Arc::new(UniformJitter::default()))
    }
}

impl HeuristicScorer {
    pub fn new(jitter: Arc<dyn JitterSource>) -> Self {
        Self { jitter }
    }

    /// Scorer with the jitter pinned to zero
    pub fn deterministic() -> Self {
        Self::new(Arc::new(NoJitter))
    }

    /// Evaluate every indicator without normalizing or perturbing
    pub fn breakdown(&self, features: &FeatureSet) -> ScoreBreakdown {
        ScoreBreakdown::of(features)
    }

    pub fn score(&self, features: FeatureSet) -> ScoreResult {
        let normalized = self.breakdown(&features).normalized();
        let final_score = finalize(normalized + self.jitter.sample());
        verdict_from_score(final_score, features)
    }
}

/// Clamp into the reportable range. NaN collapses to the lower bound.
fn finalize(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

fn verdict_from_score(final_score: f64, features: FeatureSet) -> ScoreResult {
    let verdict = if final_score > DECISION_THRESHOLD {
        Verdict::Ai
    } else {
        Verdict::Human
    };
    let confidence = match verdict {
        Verdict::Ai => final_score,
        Verdict::Human => 1.0 - final_score,
    };

    ScoreResult {
        verdict,
        confidence,
        ai_probability: final_score,
        human_probability: 1.0 - final_score,
        detection_level: DetectionLevel::from_confidence(confidence),
        reasons: reasons::generate(&features, verdict, confidence),
        features,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> FeatureSet {
        FeatureSet {
            line_count: 1,
            char_count: 17,
            has_comments: false,
            has_function_like: true,
            ai_variable_name_hits: 0,
            ai_function_name_hits: 0,
            ai_comment_pattern_hits: 0,
            indentation_consistency: 1.0,
            comment_ratio: 0.0,
            long_descriptive_comment_count: 0,
            avg_line_length: 17.0,
            complexity_score: 1.0,
        }
    }

    fn maxed() -> FeatureSet {
        FeatureSet {
            line_count: 40,
            ai_variable_name_hits: 7,
            ai_function_name_hits: 7,
            ai_comment_pattern_hits: 5,
            comment_ratio: 0.0,
            long_descriptive_comment_count: 2,
            ..features()
        }
    }

    #[test]
    fn test_breakdown_single_formatting_point() {
        let b = HeuristicScorer::deterministic().breakdown(&features());
        assert_eq!(b.ai_score, 1);
        assert_eq!(b.indicator_weight, 9);
        assert!(b.fired(IndicatorKind::Formatting));
        assert!(!b.fired(IndicatorKind::VariableNames));
        assert!((b.normalized() - 1.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_low_score_clamps_to_floor() {
        let r = HeuristicScorer::deterministic().score(features());
        assert_eq!(r.ai_probability, MIN_SCORE);
        assert_eq!(r.verdict, Verdict::Human);
        assert!((r.confidence - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_maxed_features_clamp_to_ceiling() {
        let scorer = HeuristicScorer::new(Arc::new(FixedJitter(0.05)));
        let r = scorer.score(maxed());
        assert_eq!(scorer.breakdown(&maxed()).ai_score, 9);
        assert_eq!(r.ai_probability, MAX_SCORE);
        assert_eq!(r.verdict, Verdict::Ai);
        assert_eq!(r.confidence, MAX_SCORE);
    }

    #[test]
    fn test_exact_threshold_is_human() {
        assert_eq!(verdict_from_score(0.5, features()).verdict, Verdict::Human);
        assert_eq!(verdict_from_score(0.5000001, features()).verdict, Verdict::Ai);
    }

    #[test]
    fn test_negative_formatting_can_pull_below_zero() {
        let mut f = features();
        f.indentation_consistency = 0.2;
        let b = HeuristicScorer::deterministic().breakdown(&f);
        assert_eq!(b.ai_score, -1);
        let r = HeuristicScorer::new(Arc::new(FixedJitter(-0.05))).score(f);
        assert_eq!(r.ai_probability, MIN_SCORE);
    }

    #[test]
    fn test_zero_weight_falls_back() {
        let b = ScoreBreakdown {
            contributions: Vec::new(),
            ai_score: 0,
            indicator_weight: 0,
        };
        assert_eq!(b.normalized(), 0.4);
    }

    #[test]
    fn test_nan_jitter_saturates_to_floor() {
        let r = HeuristicScorer::new(Arc::new(FixedJitter(f64::NAN))).score(maxed());
        assert_eq!(r.ai_probability, MIN_SCORE);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        for jitter in [-0.05, -0.013, 0.0, 0.021, 0.05] {
            let scorer = HeuristicScorer::new(Arc::new(FixedJitter(jitter)));
            for f in [features(), maxed()] {
                let r = scorer.score(f);
                assert_eq!(r.ai_probability + r.human_probability, 1.0);
                assert!(r.confidence >= 0.5 && r.confidence <= MAX_SCORE);
            }
        }
    }

    #[test]
    fn test_random_jitter_stays_within_clamp() {
        let scorer = HeuristicScorer::default();
        for _ in 0..500 {
            let r = scorer.score(maxed());
            assert!((MIN_SCORE..=MAX_SCORE).contains(&r.ai_probability));
            assert!(r.reasons[0].contains("confidence"));
        }
    }
}
