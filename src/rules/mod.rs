// SPDX-License-Identifier: PMPL-1.0-or-later
//! The fixed accessibility rule set.
//!
//! Each rule module inspects one class of elements (or the page as a whole)
//! and returns its findings in document order. Rules are pure with respect to
//! the document: they read it and produce findings, nothing else. Marking the
//! offending elements is the reporter's job.

pub mod buttons;
pub mod click_handlers;
pub mod forms;
pub mod iframes;
pub mod images;
pub mod links;
pub mod roles;
pub mod structure;
pub mod tables;

use crate::document::Document;
use crate::finding::{Finding, RuleId};

/// Trait implemented by all rules
pub trait Rule: Send + Sync {
    /// Human-readable name of this rule
    fn name(&self) -> &str;

    /// Short description of what this rule checks
    fn description(&self) -> &str;

    /// Finding kinds this rule can produce
    fn produces(&self) -> &[RuleId];

    /// Inspect the document and return findings in document order
    fn check(&self, document: &Document) -> Vec<Finding>;
}

/// Every rule, in execution order
pub static RULE_SET: [&dyn Rule; 9] = [
    &images::ImageAltRule,
    &buttons::ButtonNameRule,
    &forms::FormLabelRule,
    &links::LinkNameRule,
    &roles::RoleFocusRule,
    &tables::TableRule,
    &iframes::IframeTitleRule,
    &click_handlers::ClickHandlerRule,
    &structure::PageStructureRule,
];
