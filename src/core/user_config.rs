// Runtime Configuration File
// Optional YAML overrides loaded with --config, using the same keys as config.yaml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::operations::DigestAlgorithm;

/// Settings read from a runtime config file
/// Every field is optional; absent values keep the compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub sync: SyncOverrides,

    #[serde(default)]
    pub logging: LoggingOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOverrides {
    /// Digest algorithm: md5, sha256 or blake3
    pub digest: Option<DigestAlgorithm>,

    /// Bytes read per chunk while hashing
    pub chunk_size: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingOverrides {
    pub timestamp_format: Option<String>,

    /// Mirror log lines to standard output
    pub console: Option<bool>,
}

impl ConfigFile {
    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse config YAML; an empty document yields no overrides
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ConfigFile = serde_yaml::from_str(content)
            .context("Invalid config YAML")?;

        Ok(config)
    }
}
