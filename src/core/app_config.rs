// Application Configuration
// Defaults compiled from config.yaml at build time
// Modify config.yaml and rebuild to change these values

use anyhow::{bail, Result};
use chrono::format::{Item, StrftimeItems};

use super::user_config::ConfigFile;
use crate::operations::{DigestAlgorithm, Hasher, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};

// Include the auto-generated config from build.rs
pub mod compiled {
    include!(concat!(env!("OUT_DIR"), "/compiled_config.rs"));
}

/// Application-level configuration for replica-sync
/// Values are compiled in from config.yaml at build time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Change detection settings
    pub sync: SyncSettings,

    /// Log output settings
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Digest used to compare source and replica files
    pub digest: DigestAlgorithm,

    /// Bytes read per chunk while hashing
    pub chunk_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// strftime-style format for the timestamp column
    pub timestamp_format: String,

    /// Mirror log lines to standard output
    pub console: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            digest: compiled::DIGEST.parse().unwrap_or_default(),
            chunk_size: if compiled::CHUNK_SIZE == 0 {
                DEFAULT_CHUNK_SIZE
            } else {
                compiled::CHUNK_SIZE
            },
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            timestamp_format: compiled::TIMESTAMP_FORMAT.to_string(),
            console: compiled::CONSOLE,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sync: SyncSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl AppConfig {
    /// Overlay the values present in a runtime config file
    pub fn apply(&mut self, file: &ConfigFile) {
        if let Some(digest) = file.sync.digest {
            self.sync.digest = digest;
        }
        if let Some(chunk_size) = file.sync.chunk_size {
            self.sync.chunk_size = chunk_size;
        }
        if let Some(format) = &file.logging.timestamp_format {
            self.logging.timestamp_format = format.clone();
        }
        if let Some(console) = file.logging.console {
            self.logging.console = console;
        }
    }

    /// Reject settings that would only fail once the loop is running
    pub fn validate(&self) -> Result<()> {
        if self.sync.chunk_size == 0 {
            bail!("sync.chunk_size must be greater than zero");
        }
        if self.sync.chunk_size > MAX_CHUNK_SIZE {
            bail!(
                "sync.chunk_size must be at most {MAX_CHUNK_SIZE} bytes, got {}",
                self.sync.chunk_size
            );
        }

        let format = &self.logging.timestamp_format;
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            bail!("logging.timestamp_format is not a valid strftime format: {format}");
        }

        Ok(())
    }

    /// Hasher configured by these settings
    pub fn hasher(&self) -> Hasher {
        Hasher::new(self.sync.digest, self.sync.chunk_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::user_config::{LoggingOverrides, SyncOverrides};

    #[test]
    fn test_compiled_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.sync.digest, DigestAlgorithm::Md5);
        assert_eq!(config.sync.chunk_size, 4096);
        assert_eq!(config.logging.timestamp_format, "%d/%m/%Y %I:%M:%S");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_only_overrides_present_values() {
        let mut config = AppConfig::default();
        config.apply(&ConfigFile {
            sync: SyncOverrides {
                digest: Some(DigestAlgorithm::Blake3),
                chunk_size: None,
            },
            logging: LoggingOverrides {
                timestamp_format: None,
                console: Some(false),
            },
        });

        assert_eq!(config.sync.digest, DigestAlgorithm::Blake3);
        assert_eq!(config.sync.chunk_size, 4096);
        assert_eq!(config.logging.timestamp_format, "%d/%m/%Y %I:%M:%S");
        assert!(!config.logging.console);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.sync.chunk_size = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sync.chunk_size = MAX_CHUNK_SIZE + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at most"));

        let mut config = AppConfig::default();
        config.sync.chunk_size = MAX_CHUNK_SIZE;
        assert!(config.validate().is_ok());

        let mut config = AppConfig::default();
        config.logging.timestamp_format = "%Q %d".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hasher_follows_settings() {
        let mut config = AppConfig::default();
        config.sync.digest = DigestAlgorithm::Sha256;
        config.sync.chunk_size = 1024;

        let hasher = config.hasher();
        assert_eq!(hasher.algorithm(), DigestAlgorithm::Sha256);
        assert_eq!(hasher.chunk_size(), 1024);
    }
}
