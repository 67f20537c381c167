//! Output formatter trait

use condo_domain::OutputFormat;
use serde::Serialize;

/// A result that can be rendered for the console or as JSON
pub trait Report: Serialize {
    /// Full breakdown with every figure
    fn format_full(&self) -> String;

    /// One-line verdict
    fn format_summary(&self) -> String {
        self.format_full()
    }

    /// Format as JSON
    fn format_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Render `report` in the requested format.
pub fn render(report: &impl Report, format: OutputFormat) -> String {
    match format {
        OutputFormat::Full => report.format_full(),
        OutputFormat::Summary => report.format_summary(),
        OutputFormat::Json => report.format_json(),
    }
}
