// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document and directory scanning.
//!
//! Every document goes through an [`AuditHandle`]: the audit is requested
//! first, the source is read and parsed, and the ready signal then fires the
//! deferred run.

use crate::config::ScanConfig;
use crate::document::Document;
use crate::error::{AuditError, Result};
use crate::reporter::AuditReport;
use crate::runner::{AuditHandle, Auditor};
use crate::sink::TracingSink;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// A parsed document together with its audit result
pub struct AuditedDocument {
    pub document: Document,
    pub report: AuditReport,
}

/// Audit result for one file
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub report: AuditReport,
}

/// Aggregated results of a scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub generated_at: DateTime<Utc>,
    pub documents: Vec<DocumentReport>,
}

impl Default for ScanReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanReport {
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            documents: Vec::new(),
        }
    }

    pub fn push(&mut self, document: DocumentReport) {
        self.documents.push(document);
    }

    pub fn error_count(&self) -> usize {
        self.documents.iter().map(|d| d.report.error_count).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.documents.iter().map(|d| d.report.warning_count()).sum()
    }

    pub fn total_findings(&self) -> usize {
        self.documents.iter().map(|d| d.report.len()).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }
}

/// Audit a document read from `reader`, logging findings under `label`
pub fn audit_reader<R: Read>(label: &str, mut reader: R, auditor: &Auditor) -> Result<AuditedDocument> {
    let mut handle = AuditHandle::new(auditor.clone(), TracingSink::for_source(label));
    handle.check_accessibility();

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let source = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = source {
        warn!("{}: not valid UTF-8; invalid bytes replaced before auditing", label);
    }

    let report = handle
        .document_ready(Document::parse(&source))?
        .ok_or_else(|| AuditError::InvalidState("deferred audit did not run".to_string()))?;

    let (document, _) = handle.into_parts();
    let document = document
        .ok_or_else(|| AuditError::InvalidState("document missing after audit".to_string()))?;

    Ok(AuditedDocument { document, report })
}

/// Audit an in-memory HTML string
pub fn audit_source(label: &str, source: &str, auditor: &Auditor) -> Result<AuditedDocument> {
    audit_reader(label, source.as_bytes(), auditor)
}

/// Audit a single file
pub fn scan_file(path: &Path, auditor: &Auditor) -> Result<DocumentReport> {
    let file = File::open(path)?;
    let audited = audit_reader(&path.display().to_string(), file, auditor)?;
    Ok(DocumentReport {
        path: path.to_path_buf(),
        report: audited.report,
    })
}

/// Audit every matching file under `dir`
pub fn scan_directory(dir: &Path, auditor: &Auditor, config: &ScanConfig) -> Result<ScanReport> {
    let mut scan = ScanReport::new();

    info!("Scanning directory: {}", dir.display());

    let mut entries: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            if e.file_type().is_dir() && e.depth() > 0 {
                return !config.exclude.iter().any(|x| x == name) && !name.starts_with('.');
            }
            true
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_scannable(path, config))
        .collect();
    entries.sort();

    for path in entries {
        match scan_file(&path, auditor) {
            Ok(document) => scan.push(document),
            Err(AuditError::Io(e)) => warn!("Skipping {}: {}", path.display(), e),
            Err(e) => return Err(e),
        }
    }

    info!(
        "Scanned {} document(s), found {} error(s) and {} warning(s)",
        scan.documents.len(),
        scan.error_count(),
        scan.warning_count()
    );

    Ok(scan)
}

fn is_scannable(path: &Path, config: &ScanConfig) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    config
        .extensions
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(ext))
}
