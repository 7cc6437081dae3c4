use super::Reporter;
use crate::engine::types::Report;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, report: &Report) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(report)
    }
}
