// SPDX-License-Identifier: PMPL-1.0-or-later
//! Iframe title rule

use crate::document::{class_label, has_aria_name, has_attr, Document};
use crate::finding::{Finding, RuleId};
use crate::rules::Rule;

/// Iframe title rule
pub struct IframeTitleRule;

impl Rule for IframeTitleRule {
    fn name(&self) -> &str {
        "Iframe Title"
    }

    fn description(&self) -> &str {
        "Checks <iframe> elements for a title or aria name"
    }

    fn produces(&self) -> &[RuleId] {
        &[RuleId::IframeTitle]
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        document
            .elements_named("iframe")
            .filter(|(_, frame)| !has_attr(frame, "title") && !has_aria_name(frame))
            .map(|(id, frame)| {
                Finding::new(
                    RuleId::IframeTitle,
                    format!(
                        "iframe with class \"{}\" has no title or aria-label attribute",
                        class_label(&frame)
                    ),
                )
                .with_element(document.describe(id, frame))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> Vec<Finding> {
        IframeTitleRule.check(&Document::parse(html))
    }

    #[test]
    fn test_titled_frames_pass() {
        let findings = check(
            r#"<iframe src="map.html" title="Office location"></iframe>
               <iframe src="v.html" aria-label="Intro video"></iframe>
               <span id="chart-caption">Sales</span>
               <iframe src="chart.html" aria-labelledby="chart-caption"></iframe>"#,
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_untitled_frame_fails() {
        let findings = check(r#"<iframe src="https://example.com/embed" class="video"></iframe>"#);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "iframe with class \"video\" has no title or aria-label attribute"
        );
    }
}
