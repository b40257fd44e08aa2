// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration for a11y-audit
//!
//! Loaded from TOML. A missing file means defaults; every section and field
//! is optional.

use crate::error::{AuditError, Result};
use crate::finding::RuleId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: RulesConfig,
    pub marker: MarkerConfig,
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Finding kinds to suppress
    pub disabled: Vec<RuleId>,
}

/// Outline applied to error elements in annotated output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub outline: String,
    pub outline_offset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions audited during directory scans
    pub extensions: Vec<String>,
    /// Directory names skipped during directory scans
    pub exclude: Vec<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            outline: "2px solid red".to_string(),
            outline_offset: "2px".to_string(),
        }
    }
}

impl MarkerConfig {
    /// CSS declarations appended to a marked element's `style`
    pub fn declarations(&self) -> String {
        format!(
            "outline: {}; outline-offset: {}",
            self.outline, self.outline_offset
        )
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["html".to_string(), "htm".to_string()],
            exclude: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "target".to_string(),
                "dist".to_string(),
                "build".to_string(),
            ],
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("a11y-audit")
        .join("config.toml")
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| AuditError::Config(format!("TOML parse error: {}", e)))
}

pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(&config)
        .map_err(|e| AuditError::Config(format!("TOML serialize error: {}", e)))?;

    std::fs::write(path, content)?;
    Ok(())
}
