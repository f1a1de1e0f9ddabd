//! Engine configuration for uimeta.
//!
//! Every section defaults, so an empty TOML document is a valid configuration
//! and `Config::default()` matches the built-in datasource and process constants.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

/// Datasource id used by custom-query selectors.
pub const DEFAULT_CUSTOM_QUERY_DATASOURCE: &str = "F8DD408F2F3A414188668836F84C21AF";

/// Datasource id used by tree selectors.
pub const DEFAULT_TREE_DATASOURCE: &str = "90034CAE96E847D78FBEF6D38CB1930D";

/// Datasource id used by plain table / table-directory / search lookups.
pub const DEFAULT_COMBO_TABLE_DATASOURCE: &str = "ComboTableDatasourceService";

/// Filter class attached to custom selectors.
pub const DEFAULT_SELECTOR_FILTER_CLASS: &str = "SelectorDataSourceFilter";

/// Field ids that are always treated as legacy process buttons.
pub const DEFAULT_LEGACY_PROCESS_IDS: [&str; 4] = ["3663", "4242", "3670", "4248"];

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// Config
/// Root engine configuration.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub datasource: DatasourceConfig,
    pub access: AccessDefaults,
    pub process: ProcessConfig,
    pub tab: TabConfig,
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    #[must_use]
    pub fn is_legacy_process(&self, field_id: &str) -> bool {
        self.process
            .legacy_process_ids
            .iter()
            .any(|id| id == field_id)
    }
}

///
/// DatasourceConfig
/// Fixed datasource ids emitted by the selector resolver.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasourceConfig {
    pub custom_query: String,
    pub tree: String,
    pub combo_table: String,
    pub selector_filter_class: String,
}

impl Default for DatasourceConfig {
    fn default() -> Self {
        Self {
            custom_query: DEFAULT_CUSTOM_QUERY_DATASOURCE.to_string(),
            tree: DEFAULT_TREE_DATASOURCE.to_string(),
            combo_table: DEFAULT_COMBO_TABLE_DATASOURCE.to_string(),
            selector_filter_class: DEFAULT_SELECTOR_FILTER_CLASS.to_string(),
        }
    }
}

///
/// AccessDefaults
/// Field flags used when a role has no explicit field-access row.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessDefaults {
    pub editable_field: bool,
    pub check_on_save: bool,
}

impl Default for AccessDefaults {
    fn default() -> Self {
        Self {
            editable_field: true,
            check_on_save: true,
        }
    }
}

///
/// ProcessConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessConfig {
    pub legacy_process_ids: Vec<String>,
    pub button_icon: String,
    pub button_action: String,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            legacy_process_ids: DEFAULT_LEGACY_PROCESS_IDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            button_icon: "process".to_string(),
            button_action: "PROCESS".to_string(),
        }
    }
}

///
/// TabConfig
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TabConfig {
    /// Synthesize audit fields (creation / update stamps) missing from a tab.
    pub audit_fields: bool,
    pub audit_grid_position: u32,
}

impl Default for TabConfig {
    fn default() -> Self {
        Self {
            audit_fields: true,
            audit_grid_position: 9000,
        }
    }
}

///
/// TESTS
///
