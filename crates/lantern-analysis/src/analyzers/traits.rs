//! The analyzer contract.

use lantern_core::errors::AnalysisResult;
use lantern_core::{Issue, Severity, Status};

use super::context::AnalysisContext;

/// Verdict of one analyzer run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub status: Status,
    pub message: String,
    pub issues: Vec<Issue>,
}

impl Outcome {
    pub fn passed(message: impl Into<String>) -> Self {
        Self::with_status(Status::Passed, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_status(Status::Warning, message)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::with_status(Status::Failed, message)
    }

    fn with_status(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            issues: Vec::new(),
        }
    }

    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.push(issue);
        self
    }

    pub fn with_issues(mut self, issues: impl IntoIterator<Item = Issue>) -> Self {
        self.issues.extend(issues);
        self
    }
}

/// A single performance check.
///
/// `should_run` decides relevance for the current environment; `analyze`
/// inspects one artifact and returns a verdict. Analyzers must not mutate
/// the inspected project.
pub trait Analyzer: Send + Sync {
    /// Stable kebab-case identifier, e.g. `config-caching`.
    fn id(&self) -> &'static str;

    fn title(&self) -> &'static str;

    fn severity(&self) -> Severity;

    /// Estimated minutes to fix.
    fn time_to_fix(&self) -> u32;

    fn should_run(&self, _ctx: &AnalysisContext) -> bool {
        true
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome>;
}
