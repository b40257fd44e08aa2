// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form control label rule
//!
//! Every `<input>` (except `type="hidden"`), `<select>` and `<textarea>` needs
//! a `<label for>` pointing at its id, a wrapping `<label>`, `aria-label`,
//! `aria-labelledby` or `title`.

use crate::document::{class_label, has_aria_name, has_attr, is_inside, Document};
use crate::finding::{Finding, RuleId};
use crate::rules::Rule;
use scraper::ElementRef;
use std::collections::HashSet;

/// Values of the HTML `input` `type` attribute; anything else is a text field
const INPUT_TYPES: &[&str] = &[
    "button", "checkbox", "color", "date", "datetime-local", "email", "file", "hidden",
    "image", "month", "number", "password", "radio", "range", "reset", "search", "submit",
    "tel", "text", "time", "url", "week",
];

/// Form control label rule
pub struct FormLabelRule;

impl Rule for FormLabelRule {
    fn name(&self) -> &str {
        "Form Control Label"
    }

    fn description(&self) -> &str {
        "Checks form controls for an associated label or aria attribute"
    }

    fn produces(&self) -> &[RuleId] {
        &[RuleId::FormLabel]
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let label_targets: HashSet<&str> = document
            .elements_named("label")
            .filter_map(|(_, label)| label.value().attr("for"))
            .collect();

        let mut findings = Vec::new();

        for (id, control) in document.elements() {
            if !is_labelable_control(&control) {
                continue;
            }

            let has_label_for = control
                .value()
                .attr("id")
                .filter(|id| !id.is_empty())
                .is_some_and(|id| label_targets.contains(id));

            if has_label_for
                || has_aria_name(&control)
                || has_attr(&control, "title")
                || is_inside(&control, "label")
            {
                continue;
            }

            findings.push(
                Finding::new(
                    RuleId::FormLabel,
                    format!(
                        "Form field {} with class \"{}\" has no associated label or aria attribute",
                        control_kind(&control),
                        class_label(&control)
                    ),
                )
                .with_element(document.describe(id, control)),
            );
        }

        findings
    }
}

fn is_labelable_control(element: &ElementRef<'_>) -> bool {
    match element.value().name() {
        "input" => !element
            .value()
            .attr("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("hidden")),
        "select" | "textarea" => true,
        _ => false,
    }
}

/// Control type as the DOM reports it (`text`, `email`, `select-one`, ...)
fn control_kind(element: &ElementRef<'_>) -> String {
    match element.value().name() {
        "input" => element
            .value()
            .attr("type")
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| INPUT_TYPES.contains(&t.as_str()))
            .unwrap_or_else(|| "text".to_string()),
        "select" if element.value().attr("multiple").is_some() => "select-multiple".to_string(),
        "select" => "select-one".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> Vec<Finding> {
        FormLabelRule.check(&Document::parse(html))
    }

    #[test]
    fn test_labelled_controls_pass() {
        let findings = check(
            r#"<form>
                <label for="email">Email</label><input id="email" type="email">
                <label>Name <input type="text"></label>
                <input type="search" aria-label="Search">
                <select aria-labelledby="lang-label"><option>en</option></select>
                <textarea title="Message"></textarea>
                <input type="hidden" name="token">
            </form>"#,
        );
        assert!(findings.is_empty(), "got: {:?}", findings);
    }

    #[test]
    fn test_unlabelled_controls_fail() {
        let findings = check(
            r#"<form>
                <input type="email" class="field">
                <select><option>a</option></select>
                <textarea></textarea>
                <input>
            </form>"#,
        );
        assert_eq!(findings.len(), 4);
        assert!(findings[0].message.starts_with("Form field email with class \"field\""));
        assert!(findings[1].message.starts_with("Form field select-one"));
        assert!(findings[2].message.starts_with("Form field textarea"));
        assert!(findings[3].message.starts_with("Form field text"));
    }

    #[test]
    fn test_label_for_must_match_id() {
        let findings = check(r#"<label for="other">X</label><input id="mine">"#);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_empty_id_does_not_match_empty_for() {
        let findings = check(r#"<label for="">X</label><input id="">"#);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_unknown_input_type_is_reported_as_text() {
        let findings = check(r#"<input type="foo" class="q"><input type="Tel">"#);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].message.starts_with("Form field text with class \"q\""));
        assert!(findings[1].message.starts_with("Form field tel"));
    }

    #[test]
    fn test_hidden_type_is_case_insensitive() {
        assert!(check(r#"<input type="HIDDEN">"#).is_empty());
    }
}
