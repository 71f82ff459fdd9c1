//! Routing configuration — category rules, keyword groups, geographic
//! families and locality lists.
//!
//! The built-in table is generated by `build.rs` from
//! `config/routing.toml`. Alternate tables with the same layout can be
//! loaded at runtime and are validated before use.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{Result, RoutingError};
use crate::rules::normalize_category;
use crate::types::{Department, Priority};

include!(concat!(env!("OUT_DIR"), "/routing_tables.rs"));

/// Whole routing table, in evaluation order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoutingConfig {
    #[serde(rename = "category", default)]
    pub categories: Vec<CategoryRuleConfig>,
    #[serde(rename = "keyword_group", default)]
    pub keyword_groups: Vec<KeywordGroupConfig>,
    #[serde(rename = "geographic_rule", default)]
    pub geographic_rules: Vec<GeographicRuleConfig>,
    #[serde(default)]
    pub localities: LocalityConfig,
}

/// One direct mapping. Every entry in `keys` is a separate lookup key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryRuleConfig {
    pub keys: Vec<String>,
    pub department: Department,
    pub priority: Priority,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeywordGroupConfig {
    pub department: Department,
    pub priority: Priority,
    pub reason: String,
    pub keywords: Vec<String>,
}

/// Category family routed to the police in urban regions and to the
/// gendarmerie in rural ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeographicRuleConfig {
    pub name: String,
    pub markers: Vec<String>,
    pub priority: Priority,
    pub urban_reason: String,
    pub rural_reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LocalityConfig {
    #[serde(default)]
    pub urban: Vec<String>,
    #[serde(default)]
    pub rural: Vec<String>,
}

impl RoutingConfig {
    /// The table shipped with the crate.
    pub fn builtin() -> Self {
        builtin_routing()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: RoutingConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RoutingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        info!(
            path = %path.display(),
            categories = config.categories.len(),
            keyword_groups = config.keyword_groups.len(),
            "loaded routing configuration"
        );
        Ok(config)
    }

    /// Reject tables that would make lookups ambiguous or match everything.
    ///
    /// `build.rs` applies the same checks to `config/routing.toml`; keep the
    /// two in step.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for rule in &self.categories {
            for key in &rule.keys {
                let normalized = normalize_category(key);
                if normalized.is_empty() {
                    return Err(RoutingError::EmptyCategoryKey);
                }
                if !seen.insert(normalized.clone()) {
                    return Err(RoutingError::DuplicateCategory { key: normalized });
                }
            }
        }

        for (index, group) in self.keyword_groups.iter().enumerate() {
            if group.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(RoutingError::EmptyKeywordGroup { index });
            }
        }

        // An empty marker is a substring of every category.
        for rule in &self.geographic_rules {
            if rule.markers.is_empty() || rule.markers.iter().any(|m| m.trim().is_empty()) {
                return Err(RoutingError::EmptyMarker {
                    rule: rule.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
