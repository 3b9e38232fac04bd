//! Detection facade: input policy, then extractor, then scorer
//!
//! The engine itself is total; everything that can be rejected is rejected
//! here, before any feature is computed.

use crate::config::Config;
use crate::error::{DetectError, DetectResult};
use crate::features::FeatureExtractor;
use crate::models::{CodeSample, Language};
use crate::scoring::{HeuristicScorer, JitterSource, ScoreResult, SeededJitter, UniformJitter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Minimum trimmed length accepted for analysis
pub const DEFAULT_MIN_CODE_LENGTH: usize = 10;
/// Maximum length accepted for analysis
pub const DEFAULT_MAX_CODE_LENGTH: usize = 50_000;

/// Size policy applied before scoring (the `[limits]` config section)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    pub min_code_length: usize,
    pub max_code_length: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_code_length: DEFAULT_MIN_CODE_LENGTH,
            max_code_length: DEFAULT_MAX_CODE_LENGTH,
        }
    }
}

impl InputLimits {
    /// Trim surrounding whitespace and enforce the size policy
    pub fn validate<'a>(&self, text: &'a str) -> DetectResult<&'a str> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DetectError::EmptyInput);
        }
        let len = trimmed.chars().count();
        if len < self.min_code_length {
            return Err(DetectError::TooShort {
                len,
                min: self.min_code_length,
            });
        }
        if len > self.max_code_length {
            return Err(DetectError::Oversize {
                len,
                max: self.max_code_length,
            });
        }
        Ok(trimmed)
    }
}

/// Validates, extracts and scores. Stateless apart from the shared jitter source.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    extractor: FeatureExtractor,
    scorer: HeuristicScorer,
    limits: InputLimits,
}

impl Detector {
    pub fn new(scorer: HeuristicScorer, limits: InputLimits) -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            scorer,
            limits,
        }
    }

    /// Build from configuration; a seed selects a reproducible jitter stream
    pub fn from_config(config: &Config) -> Self {
        let mut engine = config.engine.clone();
        engine.sanitize();
        let jitter: Arc<dyn JitterSource> = match engine.seed {
            Some(seed) => Arc::new(SeededJitter::new(engine.jitter, seed)),
            None => Arc::new(UniformJitter::new(engine.jitter)),
        };
        Self::new(HeuristicScorer::new(jitter), config.limits)
    }

    pub fn limits(&self) -> InputLimits {
        self.limits
    }

    pub fn scorer(&self) -> &HeuristicScorer {
        &self.scorer
    }

    /// Score a sample without applying the size policy
    pub fn score_sample(&self, sample: &CodeSample) -> ScoreResult {
        let features = self.extractor.extract(sample);
        self.scorer.score(features)
    }

    /// Validate and score raw text with a language hint
    pub fn detect(&self, text: &str, language: Language) -> DetectResult<ScoreResult> {
        let code = self.limits.validate(text)?;
        let sample = CodeSample::new(code, language);
        let result = self.score_sample(&sample);
        info!(
            language = %sample.language(),
            verdict = %result.verdict,
            confidence = result.confidence,
            "scored sample"
        );
        Ok(result)
    }
}

/// Score `text` with default extractor and a randomly jittered scorer.
///
/// No size policy is applied; any string, including the empty one, yields a
/// result.
pub fn score(text: &str, language_hint: &str) -> ScoreResult {
    let sample = CodeSample::new(text, Language::from_hint(language_hint));
    Detector::default().score_sample(&sample)
}
