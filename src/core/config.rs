//! Engine configuration.
//!
//! Configuration is explicit and injected at startup: the engine never
//! reads process-wide mutable settings. Callers either use
//! `EngineConfig::default()` or load one from JSON.

use serde::{Deserialize, Serialize};

use super::error::Result;
use crate::triggers::TriggerPriority;

/// How verification messages render values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Text used for absent values.
    pub null_text: String,

    /// Text used for a collection with no items.
    pub empty_collection_text: String,

    /// Separator between collection items.
    pub collection_separator: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            null_text: "null".to_string(),
            empty_collection_text: "<empty>".to_string(),
            collection_separator: ", ".to_string(),
        }
    }
}

/// Top-level configuration for a page object session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Value formatting used by the verification engine.
    pub formatter: FormatterConfig,

    /// Priority given to declared triggers that don't state one.
    pub default_priority: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            formatter: FormatterConfig::default(),
            default_priority: TriggerPriority::MEDIUM,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the formatter configuration (builder pattern).
    #[must_use]
    pub fn with_formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }

    /// Set the default trigger priority (builder pattern).
    #[must_use]
    pub fn with_default_priority(mut self, priority: i32) -> Self {
        self.default_priority = priority;
        self
    }
}
