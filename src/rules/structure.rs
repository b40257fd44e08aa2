// SPDX-License-Identifier: PMPL-1.0-or-later
//! Page structure rule: main landmark and top-level heading count.
//!
//! Both checks are document-level and report at most one warning each.

use crate::document::Document;
use crate::finding::{Finding, RuleId};
use crate::rules::Rule;

/// Page structure rule
pub struct PageStructureRule;

impl Rule for PageStructureRule {
    fn name(&self) -> &str {
        "Page Structure"
    }

    fn description(&self) -> &str {
        "Checks for a main landmark and exactly one <h1>"
    }

    fn produces(&self) -> &[RuleId] {
        &[RuleId::LandmarkMain, RuleId::HeadingCount]
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();

        let has_main = document.any_element(|el| {
            el.value().name() == "main" || el.value().attr("role") == Some("main")
        });
        if !has_main {
            findings.push(Finding::new(
                RuleId::LandmarkMain,
                "Page has no <main> element or role=\"main\" landmark",
            ));
        }

        match document.elements_named("h1").count() {
            0 => findings.push(Finding::new(RuleId::HeadingCount, "Page has no <h1> heading")),
            1 => {}
            n => findings.push(Finding::new(
                RuleId::HeadingCount,
                format!("Page has {} <h1> headings; expected exactly one", n),
            )),
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> Vec<Finding> {
        PageStructureRule.check(&Document::parse(html))
    }

    #[test]
    fn test_well_structured_page_passes() {
        assert!(check("<main><h1>Title</h1></main>").is_empty());
        assert!(check(r#"<div role="main"><h1>Title</h1></div>"#).is_empty());
    }

    #[test]
    fn test_missing_main_and_heading() {
        let findings = check("<div>content</div>");
        let rules: Vec<RuleId> = findings.iter().map(|f| f.rule).collect();
        assert_eq!(rules, vec![RuleId::LandmarkMain, RuleId::HeadingCount]);
        assert!(findings.iter().all(|f| f.element.is_none() && !f.is_error()));
    }

    #[test]
    fn test_multiple_h1_reported_once() {
        let findings = check("<main><h1>A</h1><h1>B</h1><h1>C</h1></main>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Page has 3 <h1> headings; expected exactly one");
    }
}
