// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for scan results.
//!
//! Supports multiple output formats:
//! - Text: human-readable findings grouped by document
//! - JSON: the full scan report for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::finding::{RuleId, Severity};
use crate::scanner::ScanReport;
use crate::sink::summary_line;
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Generate a report from scan results
pub fn generate_report(scan: &ScanReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(scan),
        OutputFormat::Json => generate_json_report(scan),
        OutputFormat::Sarif => generate_sarif_report(scan),
    }
}

fn generate_text_report(scan: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str("=== Accessibility Audit Report ===\n\n");

    if scan.documents.is_empty() {
        output.push_str("No documents audited.\n");
        return output;
    }

    for doc in &scan.documents {
        let report = &doc.report;
        output.push_str(&format!(
            "{}: {} error(s), {} warning(s)\n",
            doc.path.display(),
            report.error_count,
            report.warning_count()
        ));

        for finding in &report.findings {
            output.push_str(&format!(
                "  [{}] {}: {}\n",
                finding.severity, finding.rule, finding.message
            ));
            output.push_str(&format!("    Location: {}\n", finding.location_string()));
        }

        output.push('\n');
    }

    output.push_str(&summary_line(scan.error_count()));
    output.push('\n');

    if scan.has_errors() {
        output.push_str(&format!("RESULT: FAIL ({} error(s))\n", scan.error_count()));
    } else if scan.has_warnings() {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

fn generate_json_report(scan: &ScanReport) -> String {
    serde_json::to_string_pretty(scan).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize report: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize)]
struct SarifRule {
    id: String,
    name: String,
    #[serde(rename = "defaultConfiguration")]
    default_configuration: SarifRuleConfiguration,
}

#[derive(Debug, Serialize)]
struct SarifRuleConfiguration {
    level: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<SarifRegion>,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifRegion {
    #[serde(rename = "startLine")]
    start_line: usize,
}

fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

fn generate_sarif_report(scan: &ScanReport) -> String {
    let results: Vec<SarifResult> = scan
        .documents
        .iter()
        .flat_map(|doc| {
            doc.report.findings.iter().map(move |f| SarifResult {
                rule_id: f.rule.to_string(),
                level: sarif_level(f.severity).to_string(),
                message: SarifMessage {
                    text: match &f.element {
                        Some(el) => format!("{} ({})", f.message, el.path),
                        None => f.message.clone(),
                    },
                },
                locations: vec![SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation {
                            uri: doc.path.display().to_string(),
                        },
                        region: f
                            .element
                            .as_ref()
                            .and_then(|el| el.line)
                            .map(|line| SarifRegion { start_line: line }),
                    },
                }],
            })
        })
        .collect();

    let rules = RuleId::ALL
        .iter()
        .map(|id| SarifRule {
            id: id.to_string(),
            name: id.name().to_string(),
            default_configuration: SarifRuleConfiguration {
                level: sarif_level(id.severity()).to_string(),
            },
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "a11y-audit".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}
