// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec configuration.
//!
//! Supports both programmatic and file-based configuration:
//!
//! ```toml
//! # abi.toml
//! max_bytes = 1048576
//! max_depth = 16
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default maximum object size: 32 MiB.
pub const DEFAULT_MAX_BYTES: usize = 32 * 1024 * 1024;

/// Default maximum nesting of lists and records.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Highest accepted `max_depth`.
///
/// Each list or record level adds two JSON array/object levels, and a leaf
/// payload up to two more, which must stay under serde_json's recursion
/// limit of 128.
pub const MAX_DEPTH_LIMIT: usize = 60;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AbiConfig {
    /// Maximum size of one top-level encoded object, in bytes. Bounds the
    /// decode budget, byte-string lengths and JSON document size.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Maximum number of nested lists and records in one value. Applies to
    /// both decoders and to encoding hand-built values.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_bytes() -> usize {
    DEFAULT_MAX_BYTES
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for AbiConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AbiConfig {
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid("max_bytes must be non-zero".into()));
        }
        // Every length prefix on the wire is a u32.
        if u32::try_from(self.max_bytes).is_err() {
            return Err(ConfigError::Invalid(format!(
                "max_bytes {} exceeds the u32 length prefix range",
                self.max_bytes
            )));
        }
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_depth {} must be in 1..={}",
                self.max_depth, MAX_DEPTH_LIMIT
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AbiConfig::default();
        assert_eq!(config.max_bytes, 32 * 1024 * 1024);
        assert_eq!(config.max_depth, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_str() {
        let config = AbiConfig::from_toml_str("max_bytes = 4096").expect("parse");
        assert_eq!(config.max_bytes, 4096);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);

        let config = AbiConfig::from_toml_str("max_depth = 8").expect("parse");
        assert_eq!(config, AbiConfig::default().with_max_depth(8));

        let config = AbiConfig::from_toml_str("").expect("empty uses defaults");
        assert_eq!(config, AbiConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            AbiConfig::from_toml_str("max_bytes = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AbiConfig::from_toml_str("max_bytes = 8589934592"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AbiConfig::from_toml_str("max_depth = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AbiConfig::from_toml_str("max_depth = 61"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(AbiConfig::from_toml_str("max_depth = 60").is_ok());
        assert!(matches!(
            AbiConfig::from_toml_str("max_bytes = \"big\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            AbiConfig::from_toml_str("max_byte = 1"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "max_bytes = 65536").expect("write");
        let config = AbiConfig::from_file(file.path()).expect("load");
        assert_eq!(config.max_bytes, 65536);

        assert!(matches!(
            AbiConfig::from_file("/nonexistent/abi.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
