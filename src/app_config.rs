use anyhow::{anyhow, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::export::GroupingPolicy;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Grouping policy for sublist aggregation
    #[serde(default)]
    pub grouping: GroupingPolicy,

    /// Export output config
    #[serde(default)]
    pub export: ExportConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Export output format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    // @format: Legacy kwiclist XML
    #[default]
    Xml,
    // @format: Index document as JSON
    Json,
    // @format: Flat context list as JSON
    Contexts,
}

impl ExportFormat {
    // @returns: Capitalized format name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Xml => "XML",
            Self::Json => "JSON",
            Self::Contexts => "Contexts",
        }
    }

    // @returns: Lowercase format identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Xml => "xml".to_string(),
            Self::Json => "json".to_string(),
            Self::Contexts => "contexts".to_string(),
        }
    }

    // @returns: File extension of the output
    pub fn extension(&self) -> &str {
        match self {
            Self::Xml => "xml",
            Self::Json | Self::Contexts => "json",
        }
    }
}

// Implement Display trait for ExportFormat
impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for ExportFormat
impl std::str::FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            "contexts" => Ok(Self::Contexts),
            _ => Err(anyhow!("Invalid export format: {}", s)),
        }
    }
}

/// Export output configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportConfig {
    // @field: Output format
    #[serde(default)]
    pub format: ExportFormat,

    // @field: Indent XML / pretty-print JSON output
    #[serde(default = "default_true")]
    pub indent: bool,

    // @field: Sort contexts by keyword, location and number before aggregation
    #[serde(default)]
    pub sort: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            indent: default_true(),
            sort: false,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Grouping has no effect on the flat context list output
        if self.export.format == ExportFormat::Contexts
            && self.grouping != GroupingPolicy::default()
        {
            warn!(
                "Grouping policy '{}' is ignored for the contexts output format",
                self.grouping
            );
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            grouping: GroupingPolicy::default(),
            export: ExportConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
