//! JSON reporter
//!
//! Outputs the full DetectionReport as pretty-printed JSON, plus the
//! percentage summary that is computed rather than stored.

use crate::models::DetectionReport;
use anyhow::Result;
use serde_json::json;

/// Render report as JSON
pub fn render(report: &DetectionReport) -> Result<String> {
    let mut value = serde_json::to_value(report)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert(
            "summary".to_string(),
            json!({
                "total_files": report.total_files,
                "ai_generated_files": report.ai_generated_files,
                "human_generated_files": report.human_generated_files,
                "skipped_files": report.skipped_files.len(),
                "ai_percentage": report.ai_percentage(),
                "human_percentage": report.human_percentage(),
            }),
        );
    }
    Ok(serde_json::to_string_pretty(&value)?)
}
