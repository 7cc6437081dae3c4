//! Report renderers.

pub mod json;
pub mod text;

use lantern_core::config::ReportFormat;

use crate::engine::types::Report;

pub use json::JsonReporter;
pub use text::TextReporter;

/// Renders a finished report.
pub trait Reporter {
    fn name(&self) -> &'static str;
    fn render(&self, report: &Report) -> Result<String, serde_json::Error>;
}

pub fn reporter_for(format: ReportFormat) -> Box<dyn Reporter> {
    match format {
        ReportFormat::Text => Box::new(TextReporter),
        ReportFormat::Json => Box::new(JsonReporter),
    }
}
