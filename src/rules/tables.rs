// SPDX-License-Identifier: PMPL-1.0-or-later
//! Table structure rule
//!
//! For every `<table>`, in document order:
//! - no `<th>` anywhere inside is an error (header cells)
//! - no `<caption>` and no `aria-label`/`aria-labelledby` is a warning

use crate::document::{class_label, has_aria_name, has_descendant, Document};
use crate::finding::{Finding, RuleId};
use crate::rules::Rule;

/// Table structure rule
pub struct TableRule;

impl Rule for TableRule {
    fn name(&self) -> &str {
        "Table Structure"
    }

    fn description(&self) -> &str {
        "Checks tables for header cells and a caption or aria description"
    }

    fn produces(&self) -> &[RuleId] {
        &[RuleId::TableHeaders, RuleId::TableDescription]
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (id, table) in document.elements_named("table") {
            let has_th = has_descendant(&table, |el| el.value().name() == "th");
            let has_caption = has_descendant(&table, |el| el.value().name() == "caption");

            if !has_th {
                findings.push(
                    Finding::new(
                        RuleId::TableHeaders,
                        format!(
                            "Table with class \"{}\" has no <th> header cells",
                            class_label(&table)
                        ),
                    )
                    .with_element(document.describe(id, table)),
                );
            }

            if !has_caption && !has_aria_name(&table) {
                findings.push(
                    Finding::new(
                        RuleId::TableDescription,
                        format!(
                            "Table with class \"{}\" has no <caption> or aria attribute describing it",
                            class_label(&table)
                        ),
                    )
                    .with_element(document.describe(id, table)),
                );
            }
        }

        findings
    }
}
