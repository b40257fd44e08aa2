// SPDX-License-Identifier: PMPL-1.0-or-later
//! Audit runner and its re-invocable handle.
//!
//! [`Auditor::run`] executes every enabled rule once, in rule-set order, with
//! a fresh [`Reporter`], then emits the summary. [`AuditHandle`] adds the
//! document lifecycle: a run requested while the document is still loading
//! is held back and fires exactly once when [`AuditHandle::document_ready`]
//! is called. After that, [`AuditHandle::check_accessibility`] runs
//! immediately.

use crate::config::RulesConfig;
use crate::document::Document;
use crate::error::{AuditError, Result};
use crate::finding::RuleId;
use crate::reporter::{AuditReport, Reporter};
use crate::rules::{Rule, RULE_SET};
use crate::sink::FindingSink;
use std::collections::HashSet;
use tracing::debug;

/// Runs the rule set over a document
#[derive(Debug, Clone, Default)]
pub struct Auditor {
    disabled: HashSet<RuleId>,
}

impl Auditor {
    /// Auditor with every rule enabled
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RulesConfig) -> Self {
        Self {
            disabled: config.disabled.iter().copied().collect(),
        }
    }

    /// Suppress one finding kind
    pub fn disable(mut self, rule: RuleId) -> Self {
        self.disabled.insert(rule);
        self
    }

    pub fn is_enabled(&self, rule: RuleId) -> bool {
        !self.disabled.contains(&rule)
    }

    /// Rules with at least one enabled finding kind, in execution order
    pub fn active_rules(&self) -> impl Iterator<Item = &'static dyn Rule> + '_ {
        RULE_SET
            .iter()
            .copied()
            .filter(|rule| rule.produces().iter().any(|id| self.is_enabled(*id)))
    }

    /// Run every active rule once and return the report
    pub fn run(&self, document: &Document, sink: &mut dyn FindingSink) -> AuditReport {
        let mut reporter = Reporter::new(sink);
        reporter.begin();

        for rule in self.active_rules() {
            let findings = rule.check(document);
            debug!("{}: {} finding(s)", rule.name(), findings.len());

            for finding in findings {
                if self.is_enabled(finding.rule) {
                    reporter.record(finding);
                }
            }
        }

        reporter.finish()
    }
}

enum Lifecycle {
    /// Document still loading; `queued` holds at most one deferred run
    Pending { queued: bool },
    Ready(Document),
}

/// Re-invocable entry point bound to one document and one sink
pub struct AuditHandle<S: FindingSink> {
    auditor: Auditor,
    sink: S,
    lifecycle: Lifecycle,
    completed_runs: usize,
}

impl<S: FindingSink> AuditHandle<S> {
    /// Handle for a document that has not been parsed yet
    pub fn new(auditor: Auditor, sink: S) -> Self {
        Self {
            auditor,
            sink,
            lifecycle: Lifecycle::Pending { queued: false },
            completed_runs: 0,
        }
    }

    /// Handle for an already parsed document
    pub fn with_document(auditor: Auditor, sink: S, document: Document) -> Self {
        Self {
            auditor,
            sink,
            lifecycle: Lifecycle::Ready(document),
            completed_runs: 0,
        }
    }

    /// Run the audit now, or defer it until the document is ready.
    ///
    /// Returns `None` when deferred. Repeated calls while pending still
    /// produce a single run.
    pub fn check_accessibility(&mut self) -> Option<AuditReport> {
        if let Lifecycle::Pending { queued } = &mut self.lifecycle {
            if !*queued {
                debug!("Document not ready; deferring audit until it is parsed");
            }
            *queued = true;
            return None;
        }
        self.run_ready()
    }

    /// Signal that the document has been parsed. Runs the deferred audit,
    /// if one was requested.
    pub fn document_ready(&mut self, document: Document) -> Result<Option<AuditReport>> {
        let queued = match &self.lifecycle {
            Lifecycle::Ready(_) => return Err(AuditError::AlreadyReady),
            Lifecycle::Pending { queued } => *queued,
        };

        self.lifecycle = Lifecycle::Ready(document);

        if queued {
            Ok(self.run_ready())
        } else {
            Ok(None)
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Ready(_))
    }

    /// Whether a run is waiting for the document
    pub fn is_run_queued(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Pending { queued: true })
    }

    pub fn completed_runs(&self) -> usize {
        self.completed_runs
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Take back the document (if parsed) and the sink
    pub fn into_parts(self) -> (Option<Document>, S) {
        let document = match self.lifecycle {
            Lifecycle::Ready(document) => Some(document),
            Lifecycle::Pending { .. } => None,
        };
        (document, self.sink)
    }

    fn run_ready(&mut self) -> Option<AuditReport> {
        let Lifecycle::Ready(document) = &self.lifecycle else {
            return None;
        };
        let report = self.auditor.run(document, &mut self.sink);
        self.completed_runs += 1;
        Some(report)
    }
}
