// SPDX-License-Identifier: PMPL-1.0-or-later
//! Per-run finding accumulator.
//!
//! The [`Reporter`] is owned by a single run. It appends findings in emission
//! order, keeps the error counter, records the outline marker for every
//! error element and forwards everything to the sink as it arrives.

use crate::finding::{ElementId, Finding, RuleId, Severity};
use crate::sink::FindingSink;
use serde::{Deserialize, Serialize};

/// Result of one audit run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Number of error-severity findings
    pub error_count: usize,
    /// All findings, in emission order
    pub findings: Vec<Finding>,
    /// Elements that received the outline marker, in marking order
    pub marked: Vec<ElementId>,
}

impl AuditReport {
    /// Error-severity findings
    pub fn errors(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Error)
    }

    /// Warning-severity findings
    pub fn warnings(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Warning)
    }

    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.severity == severity).collect()
    }

    pub fn by_rule(&self, rule: RuleId) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.rule == rule).collect()
    }

    pub fn warning_count(&self) -> usize {
        self.findings.iter().filter(|f| f.severity == Severity::Warning).count()
    }

    /// No errors (warnings allowed)
    pub fn passed(&self) -> bool {
        self.error_count == 0
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Accumulates findings for a single run
pub struct Reporter<'s> {
    report: AuditReport,
    sink: &'s mut dyn FindingSink,
}

impl<'s> Reporter<'s> {
    pub fn new(sink: &'s mut dyn FindingSink) -> Self {
        Self {
            report: AuditReport::default(),
            sink,
        }
    }

    /// Clear counter, findings and markers
    pub fn reset(&mut self) {
        self.report = AuditReport::default();
    }

    /// Record one finding: count it, mark it, forward it
    pub fn record(&mut self, finding: Finding) {
        let error_number = if finding.is_error() {
            self.report.error_count += 1;
            if let Some(element) = &finding.element {
                self.report.marked.push(element.id);
            }
            Some(self.report.error_count)
        } else {
            None
        };

        self.sink.record(&finding, error_number);
        self.report.findings.push(finding);
    }

    /// Snapshot of everything recorded so far
    pub fn summary(&self) -> AuditReport {
        self.report.clone()
    }

    pub fn error_count(&self) -> usize {
        self.report.error_count
    }

    pub(crate) fn begin(&mut self) {
        self.sink.begin_run();
    }

    /// Emit the summary entry and hand the report back
    pub(crate) fn finish(self) -> AuditReport {
        let Reporter { report, sink } = self;
        sink.finish_run(&report);
        report
    }
}
