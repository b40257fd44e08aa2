// SPDX-License-Identifier: PMPL-1.0-or-later
//! Finding types produced by the rule set.
//!
//! A [`Finding`] names the rule that produced it, its severity, a message and
//! (for element-level rules) a descriptor of the offending element. Findings
//! are immutable once built and carry no ownership of the document: the
//! element is referenced by its document-order ordinal.

use crate::error::AuditError;
use serde::{Deserialize, Serialize};

/// Severity levels for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Counted violation; marks the element and fails the audit
    Error,
    /// Reported only; never counted or marked
    Warning,
}

impl Severity {
    /// Whether this severity fails the audit
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// Stable identifier of every kind of finding the rule set can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    ImageAlt,
    ImageAltEmpty,
    ButtonName,
    FormLabel,
    LinkName,
    RoleFocusable,
    TableHeaders,
    TableDescription,
    IframeTitle,
    ClickHandlerRole,
    LandmarkMain,
    HeadingCount,
}

impl RuleId {
    /// Every rule id, in rule-set order
    pub const ALL: [RuleId; 12] = [
        RuleId::ImageAlt,
        RuleId::ImageAltEmpty,
        RuleId::ButtonName,
        RuleId::FormLabel,
        RuleId::LinkName,
        RuleId::RoleFocusable,
        RuleId::TableHeaders,
        RuleId::TableDescription,
        RuleId::IframeTitle,
        RuleId::ClickHandlerRole,
        RuleId::LandmarkMain,
        RuleId::HeadingCount,
    ];

    /// Kebab-case identifier used in configuration and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::ImageAlt => "image-alt",
            RuleId::ImageAltEmpty => "image-alt-empty",
            RuleId::ButtonName => "button-name",
            RuleId::FormLabel => "form-label",
            RuleId::LinkName => "link-name",
            RuleId::RoleFocusable => "role-focusable",
            RuleId::TableHeaders => "table-headers",
            RuleId::TableDescription => "table-description",
            RuleId::IframeTitle => "iframe-title",
            RuleId::ClickHandlerRole => "click-handler-role",
            RuleId::LandmarkMain => "landmark-main",
            RuleId::HeadingCount => "heading-count",
        }
    }

    /// Human-readable rule name
    pub fn name(&self) -> &'static str {
        match self {
            RuleId::ImageAlt => "Image: Missing Alt",
            RuleId::ImageAltEmpty => "Image: Empty Alt Without Presentation Role",
            RuleId::ButtonName => "Button: Missing Accessible Name",
            RuleId::FormLabel => "Form Control: Missing Label",
            RuleId::LinkName => "Link: Missing Accessible Name",
            RuleId::RoleFocusable => "Interactive Role: Not Keyboard Focusable",
            RuleId::TableHeaders => "Table: Missing Header Cells",
            RuleId::TableDescription => "Table: Missing Caption",
            RuleId::IframeTitle => "Iframe: Missing Title",
            RuleId::ClickHandlerRole => "Click Handler: Missing Role",
            RuleId::LandmarkMain => "Page: Missing Main Landmark",
            RuleId::HeadingCount => "Page: Top-Level Heading Count",
        }
    }

    /// Severity every finding of this rule carries
    pub fn severity(&self) -> Severity {
        match self {
            RuleId::ImageAltEmpty
            | RuleId::TableDescription
            | RuleId::LandmarkMain
            | RuleId::HeadingCount => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuleId {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        RuleId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| AuditError::UnknownRule(s.to_string()))
    }
}

/// Document-order ordinal of an element (pre-order, elements only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub usize);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Descriptor of the element a finding points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    /// Identity within the audited document
    pub id: ElementId,
    /// Lowercase tag name
    pub tag: String,
    /// Raw `class` attribute, if non-empty
    pub class: Option<String>,
    /// CSS-like path from the root (or the nearest ancestor with an id)
    pub path: String,
    /// Estimated 1-indexed source line
    pub line: Option<usize>,
}

impl ElementInfo {
    /// Short opening-tag rendition, e.g. `<img class="hero">`
    pub fn snippet(&self) -> String {
        match &self.class {
            Some(class) => format!("<{} class=\"{}\">", self.tag, class),
            None => format!("<{}>", self.tag),
        }
    }
}

/// A single accessibility finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule that produced this finding
    pub rule: RuleId,
    /// Severity level
    pub severity: Severity,
    /// Detailed message
    pub message: String,
    /// Offending element; `None` for document-level findings
    pub element: Option<ElementInfo>,
}

impl Finding {
    /// Create a document-level finding with the rule's severity
    pub fn new(rule: RuleId, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity: rule.severity(),
            message: message.into(),
            element: None,
        }
    }

    /// Attach the offending element
    pub fn with_element(mut self, element: ElementInfo) -> Self {
        self.element = Some(element);
        self
    }

    /// Whether this finding is error-severity
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    /// Location string for display
    pub fn location_string(&self) -> String {
        match &self.element {
            Some(el) => match el.line {
                Some(line) => format!("{} (line {})", el.path, line),
                None => el.path.clone(),
            },
            None => "<document>".to_string(),
        }
    }
}
