//! Wire types for the HTTP service

use crate::features::FeatureSet;
use crate::models::{DetectionLevel, Verdict};
use crate::scoring::ScoreResult;
use serde::{Deserialize, Serialize};

/// `POST /detect` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Display-oriented subset of the feature set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub lines_of_code: usize,
    pub comment_ratio: f64,
    pub avg_line_length: f64,
    pub complexity_score: f64,
}

impl From<&FeatureSet> for Analysis {
    fn from(f: &FeatureSet) -> Self {
        Self {
            lines_of_code: f.line_count,
            comment_ratio: f.comment_ratio,
            avg_line_length: f.avg_line_length,
            complexity_score: f.complexity_score,
        }
    }
}

/// `POST /detect` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectResponse {
    pub prediction: Verdict,
    pub confidence: f64,
    pub is_ai_generated: bool,
    pub ai_probability: f64,
    pub human_probability: f64,
    pub detection_level: DetectionLevel,
    pub analysis: Analysis,
    pub features: FeatureSet,
    pub reasons: Vec<String>,
}

impl From<ScoreResult> for DetectResponse {
    fn from(r: ScoreResult) -> Self {
        Self {
            prediction: r.verdict,
            confidence: r.confidence,
            is_ai_generated: r.verdict.is_ai(),
            ai_probability: r.ai_probability,
            human_probability: r.human_probability,
            detection_level: r.detection_level,
            analysis: Analysis::from(&r.features),
            features: r.features,
            reasons: r.reasons,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_status: &'static str,
    pub api_version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub supported_languages: &'static [&'static str],
    pub min_code_length: usize,
    pub max_code_length: usize,
    pub features_analyzed: &'static [&'static str],
}
