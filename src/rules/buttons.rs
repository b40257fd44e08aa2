// SPDX-License-Identifier: PMPL-1.0-or-later
//! Button accessible name rule
//!
//! `<button>` and `role="button"` elements need visible text, `aria-label`,
//! `aria-labelledby` or `title`.

use crate::document::{class_label, has_aria_name, has_attr, has_visible_text, Document};
use crate::finding::{Finding, RuleId};
use crate::rules::Rule;

/// Button accessible name rule
pub struct ButtonNameRule;

impl Rule for ButtonNameRule {
    fn name(&self) -> &str {
        "Button Accessible Name"
    }

    fn description(&self) -> &str {
        "Checks buttons for text, aria-label, aria-labelledby or title"
    }

    fn produces(&self) -> &[RuleId] {
        &[RuleId::ButtonName]
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        document
            .elements()
            .filter(|(_, el)| {
                el.value().name() == "button" || el.value().attr("role") == Some("button")
            })
            .filter(|(_, el)| {
                !has_visible_text(el) && !has_aria_name(el) && !has_attr(el, "title")
            })
            .map(|(id, el)| {
                Finding::new(
                    RuleId::ButtonName,
                    format!(
                        "Button {} with class \"{}\" has no accessible name (no text content, aria-label, aria-labelledby or title)",
                        el.value().name(),
                        class_label(&el)
                    ),
                )
                .with_element(document.describe(id, el))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> Vec<Finding> {
        ButtonNameRule.check(&Document::parse(html))
    }

    #[test]
    fn test_button_with_text_passes() {
        assert!(check("<button>Submit</button>").is_empty());
    }

    #[test]
    fn test_named_buttons_pass() {
        let findings = check(
            r#"<button aria-label="Close"></button>
               <button aria-labelledby="t"></button>
               <button title="Menu"><svg></svg></button>
               <div role="button">Open</div>"#,
        );
        assert!(findings.is_empty(), "got: {:?}", findings);
    }

    #[test]
    fn test_icon_button_without_name_fails() {
        let findings = check(r#"<button class="menu-toggle"><span class="icon"> </span></button>"#);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("menu-toggle"));
        assert!(findings[0].message.starts_with("Button button"));
    }

    #[test]
    fn test_role_button_without_name_fails() {
        let findings = check(r#"<span role="button" tabindex="0"></span>"#);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].element.as_ref().map(|e| e.tag.as_str()), Some("span"));
    }
}
