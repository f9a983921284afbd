//! Declarative filter-rule configuration
//!
//! A JSON document maps category prefixes to minimum levels, globally and
//! per sink alias:
//!
//! ```json
//! {
//!   "logLevel": { "default": "Warning", "demo": "Information" },
//!   "sinks": {
//!     "Green": { "logLevel": { "default": "Debug" } },
//!     "Cyan":  { "logLevel": { "default": "Critical" } }
//!   }
//! }
//! ```
//!
//! The reserved `"default"` key sets the sink-wide (or global) minimum;
//! every other key is a category prefix. Any malformed level name is a
//! startup error: the document never half-loads.

use super::error::{LoggerError, Result};
use super::filter::{FilterRule, FilterSet};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_KEY: &str = "default";

/// Filter-rule document, as deserialized from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoggingConfig {
    /// Global minimum ("default") and per-category-prefix levels
    #[serde(default)]
    pub log_level: BTreeMap<String, String>,

    /// Per-sink sections, keyed by the sink's registration alias
    #[serde(default)]
    pub sinks: BTreeMap<String, SinkConfig>,
}

/// One sink's section of the filter-rule document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SinkConfig {
    #[serde(default)]
    pub log_level: BTreeMap<String, String>,
}

impl LoggingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggingConfig = serde_json::from_str(json)?;
        // Validate eagerly so a malformed document fails at startup, not on
        // the first log call.
        config.to_filter_set()?;
        Ok(config)
    }

    /// Lower the document into a [`FilterSet`]
    pub fn to_filter_set(&self) -> Result<FilterSet> {
        let mut filters = FilterSet::new();

        for (key, value) in &self.log_level {
            let level = parse_level("logLevel", key, value)?;
            if key == DEFAULT_KEY {
                filters.min_level = Some(level);
            } else {
                filters.rules.push(FilterRule::for_category(key, level));
            }
        }

        for (alias, sink) in &self.sinks {
            let component = format!("sinks.{}", alias);
            for (key, value) in &sink.log_level {
                let level = parse_level(&component, key, value)?;
                if key == DEFAULT_KEY {
                    filters.rules.push(FilterRule::for_sink(alias, level));
                } else {
                    filters.rules.push(FilterRule::new(
                        Some(alias.as_str()),
                        Some(key.as_str()),
                        level,
                    ));
                }
            }
        }

        Ok(filters)
    }
}

fn parse_level(component: &str, key: &str, value: &str) -> Result<LogLevel> {
    value
        .parse()
        .map_err(|message: String| LoggerError::config(format!("{}.{}", component, key), message))
}
