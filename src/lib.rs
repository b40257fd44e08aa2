// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-audit - one-shot accessibility auditor for rendered HTML
//!
//! Parses a document, runs a fixed rule set over it, reports every violation
//! as an error or a warning, and marks error elements with an outline so they
//! can be located on the page.
//!
//! ## Rules
//!
//! Run in this order, each returning findings in document order:
//!
//! - **Image alt**: `<img>` without `alt` (error); empty `alt` without
//!   `role="presentation"` (warning)
//! - **Button name**: buttons without text, aria name or title
//! - **Form label**: controls without a label, aria name or title
//! - **Link name**: `a[href]` without text, aria name, title or `img[alt]`
//! - **Role focusability**: interactive ARIA roles on unfocusable elements
//! - **Tables**: missing `<th>` (error); missing caption or aria name (warning)
//! - **Iframe title**: `<iframe>` without title or aria name
//! - **Click handler role**: `onclick` on non-controls without a role
//! - **Page structure**: no main landmark; not exactly one `<h1>` (warnings)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use a11y_audit::{AuditHandle, Auditor, Document, MemorySink};
//!
//! let mut handle = AuditHandle::new(Auditor::new(), MemorySink::new());
//! handle.check_accessibility(); // deferred until the document is ready
//! let report = handle.document_ready(Document::parse(html))?;
//! ```

pub mod annotate;
pub mod config;
pub mod document;
pub mod error;
pub mod finding;
pub mod report;
pub mod reporter;
pub mod rules;
pub mod runner;
pub mod scanner;
pub mod sink;

pub use config::Config;
pub use document::Document;
pub use error::{AuditError, Result};
pub use finding::{ElementId, ElementInfo, Finding, RuleId, Severity};
pub use reporter::{AuditReport, Reporter};
pub use runner::{AuditHandle, Auditor};
pub use sink::{FindingSink, MemorySink, SinkEvent, TracingSink};
