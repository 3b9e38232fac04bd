//! Text (terminal) reporter with colors and formatting

use crate::models::{DetectionLevel, DetectionReport, Verdict};
use anyhow::Result;

/// Verdict colors (ANSI escape codes)
fn verdict_color(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Ai => "\x1b[91m",    // Light red
        Verdict::Human => "\x1b[32m", // Green
    }
}

/// Detection level colors
fn level_color(level: DetectionLevel) -> &'static str {
    match level {
        DetectionLevel::VeryHigh => "\x1b[31m", // Red
        DetectionLevel::High => "\x1b[91m",     // Light red
        DetectionLevel::Medium => "\x1b[33m",   // Yellow
        DetectionLevel::Low => "\x1b[90m",      // Gray
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Render report as formatted terminal output
pub fn render(report: &DetectionReport) -> Result<String> {
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{BOLD}Code Origin Analysis{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Files: {}  AI: {BOLD}{}{RESET} ({:.1}%)  Human: {BOLD}{}{RESET} ({:.1}%)  Skipped: {}\n",
        report.total_files,
        report.ai_generated_files,
        report.ai_percentage(),
        report.human_generated_files,
        report.human_percentage(),
        report.skipped_files.len()
    ));
    if report.total_files > 0 {
        out.push_str(&format!(
            "Average confidence: {:.1}%  Languages: {}\n",
            report.average_confidence * 100.0,
            report
                .languages_detected
                .iter()
                .map(|l| l.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if !report.most_common_ai_patterns.is_empty() {
        out.push_str(&format!(
            "Common AI patterns: {}\n",
            report.most_common_ai_patterns.join(", ")
        ));
    }
    out.push('\n');

    if report.file_results.is_empty() {
        out.push_str(&format!("{DIM}No files analyzed.{RESET}\n"));
    } else {
        out.push_str(&format!("{BOLD}RESULTS{RESET}\n"));
        for file in &report.file_results {
            let r = &file.result;
            let vc = verdict_color(r.verdict);
            let lc = level_color(r.detection_level);
            out.push_str(&format!(
                "  {vc}{:<5}{RESET} {lc}{:>5.1}%{RESET}  {}  {DIM}[{}]{RESET}\n",
                r.verdict.to_string(),
                r.confidence * 100.0,
                file.path.display(),
                file.language
            ));
            // First reason is the headline; the rest explain it
            for reason in r.reasons.iter().skip(1) {
                out.push_str(&format!("        {DIM}- {reason}{RESET}\n"));
            }
        }
    }

    if !report.skipped_files.is_empty() {
        out.push_str(&format!("\n{BOLD}SKIPPED{RESET}\n"));
        for skipped in &report.skipped_files {
            out.push_str(&format!(
                "  {}  {DIM}{}{RESET}\n",
                skipped.path.display(),
                skipped.reason
            ));
        }
    }

    out.push_str(&format!(
        "\n{DIM}Completed in {}ms{RESET}\n",
        report.total_analysis_time_ms
    ));

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_render_lists_files_and_skips() {
        let out = render(&test_report()).unwrap();
        assert!(out.contains("Code Origin Analysis"));
        assert!(out.contains("gen.py"));
        assert!(out.contains("hand.py"));
        assert!(out.contains("SKIPPED"));
        assert!(out.contains("tiny.js"));
    }

    #[test]
    fn test_render_empty_report() {
        let report = DetectionReport::from_results(Vec::new(), Vec::new(), chrono::Utc::now());
        let out = render(&report).unwrap();
        assert!(out.contains("No files analyzed"));
        assert!(!out.contains("SKIPPED"));
    }
}
