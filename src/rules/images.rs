// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text rule
//!
//! - Every `<img>` must carry an `alt` attribute (error)
//! - `alt=""` without `role="presentation"` is reported as a warning: it is
//!   correct for decorative images, so it is never counted as an error

use crate::document::{class_label, Document};
use crate::finding::{Finding, RuleId};
use crate::rules::Rule;

/// Image alt text rule
pub struct ImageAltRule;

impl Rule for ImageAltRule {
    fn name(&self) -> &str {
        "Image Alt Text"
    }

    fn description(&self) -> &str {
        "Checks <img> elements for an alt attribute"
    }

    fn produces(&self) -> &[RuleId] {
        &[RuleId::ImageAlt, RuleId::ImageAltEmpty]
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (id, img) in document.elements_named("img") {
            match img.value().attr("alt") {
                None => findings.push(
                    Finding::new(
                        RuleId::ImageAlt,
                        format!(
                            "Image with class \"{}\" has no alt attribute",
                            class_label(&img)
                        ),
                    )
                    .with_element(document.describe(id, img)),
                ),
                Some("") if img.value().attr("role") != Some("presentation") => findings.push(
                    Finding::new(
                        RuleId::ImageAltEmpty,
                        format!(
                            "Image with class \"{}\" has an empty alt. If it is decorative, add role=\"presentation\"",
                            class_label(&img)
                        ),
                    )
                    .with_element(document.describe(id, img)),
                ),
                Some(_) => {}
            }
        }

        findings
    }
}
