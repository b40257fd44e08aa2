// SPDX-License-Identifier: PMPL-1.0-or-later
//! Interactive role keyboard focusability rule
//!
//! An element that claims an interactive ARIA role must be reachable by
//! keyboard: either a natively focusable tag or an explicit `tabindex`.

use crate::document::{class_label, has_attr, Document};
use crate::finding::{Finding, RuleId};
use crate::rules::Rule;

/// ARIA roles that promise keyboard interaction
pub const INTERACTIVE_ROLES: &[&str] = &["button", "link", "menuitem", "tab", "checkbox", "radio"];

/// Tags focusable without a tabindex
pub const NATIVELY_FOCUSABLE: &[&str] = &["a", "button", "input", "select", "textarea"];

/// Interactive role keyboard focusability rule
pub struct RoleFocusRule;

impl Rule for RoleFocusRule {
    fn name(&self) -> &str {
        "Interactive Role Focusability"
    }

    fn description(&self) -> &str {
        "Checks that elements with interactive ARIA roles can receive keyboard focus"
    }

    fn produces(&self) -> &[RuleId] {
        &[RuleId::RoleFocusable]
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (id, el) in document.elements() {
            let Some(role) = el.value().attr("role") else {
                continue;
            };
            if !INTERACTIVE_ROLES.contains(&role) {
                continue;
            }
            if NATIVELY_FOCUSABLE.contains(&el.value().name()) || has_attr(&el, "tabindex") {
                continue;
            }

            findings.push(
                Finding::new(
                    RuleId::RoleFocusable,
                    format!(
                        "Element with role=\"{}\" and class \"{}\" has no tabindex (not reachable by keyboard)",
                        role,
                        class_label(&el)
                    ),
                )
                .with_element(document.describe(id, el)),
            );
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> Vec<Finding> {
        RoleFocusRule.check(&Document::parse(html))
    }

    #[test]
    fn test_focusable_elements_pass() {
        let findings = check(
            r##"<a role="button" href="#">A</a>
               <div role="tab" tabindex="0">Tab</div>
               <li role="menuitem" tabindex="-1">Item</li>
               <div role="dialog"></div>
               <div role="navigation"></div>"##,
        );
        assert!(findings.is_empty(), "got: {:?}", findings);
    }

    #[test]
    fn test_unfocusable_roles_fail_in_document_order() {
        let findings = check(
            r#"<div role="checkbox" class="c1"></div>
               <span role="button" class="b1">Go</span>
               <li role="radio"></li>"#,
        );
        assert_eq!(findings.len(), 3);
        assert!(findings[0].message.contains("role=\"checkbox\""));
        assert!(findings[1].message.contains("role=\"button\""));
        assert!(findings[2].message.contains("role=\"radio\""));
    }

    #[test]
    fn test_role_match_is_exact() {
        assert!(check(r#"<div role="button link"></div>"#).is_empty());
    }
}
