//! codeorigin - Heuristic AI-vs-human code authorship detection
//!
//! A pure, lexical scoring engine: a code snippet goes in, a verdict with a
//! confidence, a per-feature breakdown and human-readable reasons comes out.
//! The same engine backs the `codeorigin` CLI and its HTTP API.
//!
//! ```no_run
//! let result = codeorigin::score("def f(): return 1", "python");
//! println!("{} ({:.2})", result.verdict, result.confidence);
//! ```

pub mod cli;
pub mod config;
pub mod detector;
pub mod error;
pub mod features;
pub mod models;
pub mod reporters;
pub mod scoring;
pub mod server;

pub use detector::{score, Detector, InputLimits};
pub use error::{DetectError, DetectResult};
pub use features::{FeatureExtractor, FeatureSet};
pub use models::{CodeSample, DetectionLevel, Language, Verdict};
pub use scoring::{HeuristicScorer, ScoreResult};
