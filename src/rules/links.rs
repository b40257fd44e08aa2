// SPDX-License-Identifier: PMPL-1.0-or-later
//! Link accessible name rule

use crate::document::{class_label, has_aria_name, has_attr, has_descendant, has_visible_text, Document};
use crate::finding::{Finding, RuleId};
use crate::rules::Rule;

/// Link accessible name rule
pub struct LinkNameRule;

impl Rule for LinkNameRule {
    fn name(&self) -> &str {
        "Link Accessible Name"
    }

    fn description(&self) -> &str {
        "Checks a[href] for text, aria-label, aria-labelledby, title or an image with alt"
    }

    fn produces(&self) -> &[RuleId] {
        &[RuleId::LinkName]
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        document
            .elements_named("a")
            .filter(|(_, link)| has_attr(link, "href"))
            .filter(|(_, link)| {
                !has_visible_text(link)
                    && !has_aria_name(link)
                    && !has_attr(link, "title")
                    && !has_descendant(link, |el| {
                        el.value().name() == "img" && has_attr(el, "alt")
                    })
            })
            .map(|(id, link)| {
                Finding::new(
                    RuleId::LinkName,
                    format!("Link with class \"{}\" has no accessible text", class_label(&link)),
                )
                .with_element(document.describe(id, link))
            })
            .collect()
    }
}
