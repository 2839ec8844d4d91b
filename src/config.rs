//! Configuration file support for ferro-protchange.
//!
//! This module provides loading of `.ferro-protchange.toml` configuration
//! files which set parser behavior and the default output format.
//!
//! # Example Configuration
//!
//! ```toml
//! [parser]
//! marker-matching = "edit-site"
//!
//! [output]
//! format = "json"
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-protchange.toml` in current directory
//! 2. `~/.config/ferro/protchange.toml`
//!
//! CLI flags take precedence over config file settings.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::cli::OutputFormat;
use crate::error::ProtChangeError;
use crate::notation::parser::{MarkerMatching, ParseConfig};

/// File name searched for in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".ferro-protchange.toml";

/// Parsed configuration from a .ferro-protchange.toml file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProtChangeConfig {
    /// Parser section.
    pub parser: ParseConfig,
    /// Output section.
    pub output: OutputConfig,
}

/// Output section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format for `classify`.
    pub format: Option<OutputFormat>,
}

impl ProtChangeConfig {
    /// Load configuration from the default locations.
    ///
    /// A file that exists but cannot be parsed is reported and skipped.
    pub fn load() -> Option<Self> {
        let candidates = std::iter::once(PathBuf::from(LOCAL_CONFIG_FILE)).chain(
            home_dir().map(|home| home.join(".config").join("ferro").join("protchange.toml")),
        );

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded configuration");
                    return Some(config);
                }
                Err(e) => warn!("ignoring {}: {}", path.display(), e),
            }
        }

        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ProtChangeError> {
        let content = fs::read_to_string(path)?;
        Self::parse_named(&content, &path.display().to_string())
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self, ProtChangeError> {
        Self::parse_named(content, "<string>")
    }

    fn parse_named(content: &str, source_name: &str) -> Result<Self, ProtChangeError> {
        toml::from_str(content).map_err(|e| ProtChangeError::config(source_name, e.to_string()))
    }

    /// Merge this config with CLI arguments.
    /// CLI arguments take precedence.
    pub fn merge_with_cli(
        &self,
        cli_matching: Option<MarkerMatching>,
        cli_format: Option<OutputFormat>,
    ) -> (ParseConfig, OutputFormat) {
        let parse_config = match cli_matching {
            Some(matching) => self.parser.with_marker_matching(matching),
            None => self.parser,
        };
        let format = cli_format.or(self.output.format).unwrap_or_default();
        (parse_config, format)
    }

    /// Render this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ProtChangeError> {
        toml::to_string_pretty(self).map_err(|e| ProtChangeError::config("<output>", e.to_string()))
    }
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
