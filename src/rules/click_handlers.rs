// SPDX-License-Identifier: PMPL-1.0-or-later
//! Bare click handler rule
//!
//! An inline `onclick` on anything other than `<button>` or `<a>` must come
//! with an explicit `role` so assistive technology announces it as interactive.

use crate::document::{class_label, has_attr, Document};
use crate::finding::{Finding, RuleId};
use crate::rules::Rule;

/// Bare click handler rule
pub struct ClickHandlerRule;

impl Rule for ClickHandlerRule {
    fn name(&self) -> &str {
        "Click Handler Role"
    }

    fn description(&self) -> &str {
        "Checks elements with onclick for a native control tag or an explicit role"
    }

    fn produces(&self) -> &[RuleId] {
        &[RuleId::ClickHandlerRole]
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        document
            .elements()
            .filter(|(_, el)| has_attr(el, "onclick"))
            .filter(|(_, el)| {
                !matches!(el.value().name(), "button" | "a") && !has_attr(el, "role")
            })
            .map(|(id, el)| {
                Finding::new(
                    RuleId::ClickHandlerRole,
                    format!(
                        "Element {} with class \"{}\" has onclick but no matching role (for example role=\"button\")",
                        el.value().name(),
                        class_label(&el)
                    ),
                )
                .with_element(document.describe(id, el))
            })
            .collect()
    }
}
