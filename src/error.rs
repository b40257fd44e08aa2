// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for a11y-audit
//!
//! Rules never fail; these cover the operational surface around them.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("Document was already signalled ready")]
    AlreadyReady,

    #[error("Invalid state: {0}")]
    InvalidState(String),
}
