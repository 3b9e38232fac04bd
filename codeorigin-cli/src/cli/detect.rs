//! Detect command - score files, directories, or stdin

use crate::config::Config;
use crate::detector::Detector;
use crate::models::{DetectionReport, FileResult, Language, SkippedFile};
use crate::reporters;
use anyhow::{Context, Result};
use console::style;
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const STDIN_NAME: &str = "<stdin>";

/// Run the detect command
pub fn run(
    config: &Config,
    paths: &[PathBuf],
    language: Option<&str>,
    format: &str,
    output: Option<&Path>,
    fail_on_ai: bool,
) -> Result<()> {
    let start = chrono::Utc::now();
    let detector = Detector::from_config(config);
    let forced = language.map(Language::from_hint);

    let report = if paths.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        let lang = forced.unwrap_or_default();
        let outcome = score_text(&detector, PathBuf::from(STDIN_NAME), &text, lang);
        let (results, skipped) = split_outcomes(vec![outcome]);
        DetectionReport::from_results(results, skipped, start)
    } else {
        let inputs = collect_inputs(paths, forced.as_ref())?;
        info!("Scoring {} files", inputs.len());
        analyze_files(&detector, inputs, start)
    };

    let rendered = reporters::report(&report, format)?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Report written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => println!("{}", rendered),
    }

    if fail_on_ai && report.ai_generated_files > 0 {
        eprintln!(
            "{} {} file(s) classified as AI-generated",
            style("✗").red(),
            report.ai_generated_files
        );
        std::process::exit(1);
    }

    Ok(())
}

/// Score every collected file in parallel
pub(crate) fn analyze_files(
    detector: &Detector,
    inputs: Vec<(PathBuf, Language)>,
    start: chrono::DateTime<chrono::Utc>,
) -> DetectionReport {
    let outcomes: Vec<Result<FileResult, SkippedFile>> = inputs
        .into_par_iter()
        .map(|(path, lang)| match std::fs::read_to_string(&path) {
            Ok(text) => score_text(detector, path, &text, lang),
            Err(e) => Err(SkippedFile {
                reason: format!("Failed to read: {e}"),
                path,
            }),
        })
        .collect();

    let (results, skipped) = split_outcomes(outcomes);
    DetectionReport::from_results(results, skipped, start)
}

fn score_text(
    detector: &Detector,
    path: PathBuf,
    text: &str,
    language: Language,
) -> Result<FileResult, SkippedFile> {
    match detector.detect(text, language.clone()) {
        Ok(result) => Ok(FileResult {
            path,
            language,
            result,
        }),
        Err(e) => {
            debug!("Skipping {}: {}", path.display(), e);
            Err(SkippedFile {
                path,
                reason: e.to_string(),
            })
        }
    }
}

fn split_outcomes(
    outcomes: Vec<Result<FileResult, SkippedFile>>,
) -> (Vec<FileResult>, Vec<SkippedFile>) {
    let mut results = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(r) => results.push(r),
            Err(s) => skipped.push(s),
        }
    }
    (results, skipped)
}

/// Expand the given paths into (file, language) pairs.
///
/// Explicit files are always included; directories contribute only files
/// with a recognised extension, respecting .gitignore.
pub(crate) fn collect_inputs(
    paths: &[PathBuf],
    forced: Option<&Language>,
) -> Result<Vec<(PathBuf, Language)>> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_file() {
            let lang = forced
                .cloned()
                .or_else(|| Language::from_path(path))
                .unwrap_or_default();
            inputs.push((path.clone(), lang));
        } else if path.is_dir() {
            for file in collect_source_files(path) {
                let Some(detected) = Language::from_path(&file) else {
                    continue;
                };
                let lang = forced.cloned().unwrap_or(detected);
                inputs.push((file, lang));
            }
        } else {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
    }

    inputs.sort_by(|a, b| a.0.cmp(&b.0));
    inputs.dedup_by(|a, b| a.0 == b.0);
    Ok(inputs)
}

/// Collect source files under `root`, respecting .gitignore
fn collect_source_files(root: &Path) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .require_git(false)
        .add_custom_ignore_filename(".codeoriginignore");

    builder
        .build()
        .flatten()
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.into_path())
        .collect()
}
