//! Report types produced by the engine.

use std::path::PathBuf;

use lantern_core::{AppEnvironment, Issue, Severity, Status};
use serde::{Deserialize, Serialize};

/// Result of one analyzer within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerRun {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    /// Estimated minutes to fix.
    pub time_to_fix: u32,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
    /// Stable error code for `errored` runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    pub duration_ms: u64,
}

/// Count of runs per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub passed: usize,
    pub warning: usize,
    pub failed: usize,
    pub not_applicable: usize,
    pub errored: usize,
}

impl Summary {
    pub fn from_runs(runs: &[AnalyzerRun]) -> Self {
        let mut summary = Self::default();
        for run in runs {
            summary.record(run.status);
        }
        summary
    }

    pub fn record(&mut self, status: Status) {
        match status {
            Status::Passed => self.passed += 1,
            Status::Warning => self.warning += 1,
            Status::Failed => self.failed += 1,
            Status::NotApplicable => self.not_applicable += 1,
            Status::Errored => self.errored += 1,
        }
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Passed => self.passed,
            Status::Warning => self.warning,
            Status::Failed => self.failed,
            Status::NotApplicable => self.not_applicable,
            Status::Errored => self.errored,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.warning + self.failed + self.not_applicable + self.errored
    }
}

/// The complete result of analyzing one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub project: PathBuf,
    pub environment: AppEnvironment,
    pub runs: Vec<AnalyzerRun>,
    pub summary: Summary,
}

impl Report {
    pub fn new(project: PathBuf, environment: AppEnvironment, runs: Vec<AnalyzerRun>) -> Self {
        let summary = Summary::from_runs(&runs);
        Self {
            project,
            environment,
            runs,
            summary,
        }
    }

    /// Failed or errored runs always count; warnings only when asked.
    pub fn has_failures(&self, fail_on_warning: bool) -> bool {
        self.summary.failed > 0
            || self.summary.errored > 0
            || (fail_on_warning && self.summary.warning > 0)
    }

    pub fn run(&self, id: &str) -> Option<&AnalyzerRun> {
        self.runs.iter().find(|r| r.id == id)
    }
}
