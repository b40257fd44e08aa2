// SPDX-License-Identifier: PMPL-1.0-or-later
//! Output sinks for audit runs.
//!
//! The reporter forwards every finding and the end-of-run summary to a
//! [`FindingSink`]. [`TracingSink`] is the console output of the tool;
//! [`MemorySink`] collects events for tests and embedding callers.

use crate::finding::Finding;
use crate::reporter::AuditReport;
use tracing::{error, info, warn};

/// Receiver of audit events
pub trait FindingSink {
    /// Called once before the first rule runs
    fn begin_run(&mut self) {}

    /// Called for every finding, in emission order. `error_number` is the
    /// running error count including this finding, or `None` for warnings.
    fn record(&mut self, finding: &Finding, error_number: Option<usize>);

    /// Called once after the last rule, with the completed report
    fn finish_run(&mut self, report: &AuditReport);
}

impl<S: FindingSink + ?Sized> FindingSink for &mut S {
    fn begin_run(&mut self) {
        (**self).begin_run();
    }

    fn record(&mut self, finding: &Finding, error_number: Option<usize>) {
        (**self).record(finding, error_number);
    }

    fn finish_run(&mut self, report: &AuditReport) {
        (**self).finish_run(report);
    }
}

/// Pass/fail summary line for a completed run
pub fn summary_line(error_count: usize) -> String {
    if error_count == 0 {
        "Audit complete: no critical accessibility errors found.".to_string()
    } else {
        format!(
            "Audit complete: found {} accessibility error(s). Offending elements are marked with an outline.",
            error_count
        )
    }
}

/// Sink that emits structured `tracing` events
#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    source: Option<String>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag every event with the audited document's name
    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }

    fn source(&self) -> &str {
        self.source.as_deref().unwrap_or("-")
    }
}

impl FindingSink for TracingSink {
    fn begin_run(&mut self) {
        info!(source = self.source(), "Running accessibility audit");
    }

    fn record(&mut self, finding: &Finding, error_number: Option<usize>) {
        let location = finding.location_string();
        let element = finding
            .element
            .as_ref()
            .map(|el| el.snippet())
            .unwrap_or_default();

        match error_number {
            Some(n) => error!(
                source = self.source(),
                rule = %finding.rule,
                %location,
                %element,
                "[A11Y Error #{}] {}",
                n,
                finding.message
            ),
            None => warn!(
                source = self.source(),
                rule = %finding.rule,
                %location,
                "[A11Y Warning] {}",
                finding.message
            ),
        }
    }

    fn finish_run(&mut self, report: &AuditReport) {
        info!(
            source = self.source(),
            errors = report.error_count,
            warnings = report.warning_count(),
            "{}",
            summary_line(report.error_count)
        );
    }
}

/// Event captured by [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    RunStarted,
    Finding {
        finding: Finding,
        error_number: Option<usize>,
    },
    Summary {
        error_count: usize,
        line: String,
    },
}

/// Sink that keeps every event in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub events: Vec<SinkEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded findings across all runs, in order
    pub fn findings(&self) -> Vec<&Finding> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Finding { finding, .. } => Some(finding),
                _ => None,
            })
            .collect()
    }

    /// Summary lines across all runs, in order
    pub fn summaries(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Summary { line, .. } => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of completed runs observed
    pub fn runs(&self) -> usize {
        self.summaries().len()
    }
}

impl FindingSink for MemorySink {
    fn begin_run(&mut self) {
        self.events.push(SinkEvent::RunStarted);
    }

    fn record(&mut self, finding: &Finding, error_number: Option<usize>) {
        self.events.push(SinkEvent::Finding {
            finding: finding.clone(),
            error_number,
        });
    }

    fn finish_run(&mut self, report: &AuditReport) {
        self.events.push(SinkEvent::Summary {
            error_count: report.error_count,
            line: summary_line(report.error_count),
        });
    }
}
