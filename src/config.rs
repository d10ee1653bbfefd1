//! Builder configuration.
//!
//! Process-wide, read-only state initialized once at startup and shared by
//! every statement via `Arc`. The only environment-derived input the engine
//! consumes is the physical table prefix substituted for the logical
//! [`TABLE_SENTINEL`] at the start of table references.
//!
//! Supports loading from a TOML fragment:
//! ```toml
//! table_prefix = "sym_"
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Logical prefix token recognized at the start of table names.
pub const TABLE_SENTINEL: &str = "tbl_";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Physical prefix substituted for the `tbl_` sentinel.
    pub table_prefix: String,
}

impl Config {
    /// Configuration with an explicit physical table prefix.
    pub fn new(table_prefix: impl Into<String>) -> Self {
        Self {
            table_prefix: table_prefix.into(),
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }
}
