//! regtool configuration
//!
//! Read from `regtool.{toml,yaml}`, `config/regtool.{toml,yaml,json}` and
//! `REGTOOL_*` environment variables, or from a single `--config` file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use voltage_regcodec::ValueFormat;

pub const SERVICE_NAME: &str = "regtool";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegtoolConfig {
    /// Format used when a command has no `--format`
    pub default_format: ValueFormat,
    /// Address of the first register in `table` output
    pub start_address: u16,
    pub log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for RegtoolConfig {
    fn default() -> Self {
        Self {
            default_format: ValueFormat::Unsigned16,
            start_address: 0,
            log_level: "warn".to_string(),
            log_dir: None,
        }
    }
}

impl RegtoolConfig {
    /// Load from `path` if given, otherwise from the working directory layers
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => common::load_config_from_file(path)
                .with_context(|| format!("Failed to read config {}", path.display())),
            None => common::load_config(SERVICE_NAME).context("Failed to read regtool config"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let config: RegtoolConfig = common::load_config_in(dir.path(), "regtool_defaults").unwrap();
        assert_eq!(config, RegtoolConfig::default());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("regtool.yaml");
        fs::write(
            &path,
            "default_format: float-be-swap\nstart_address: 40001\nlog_dir: /tmp/regtool-logs\n",
        )
        .unwrap();

        let config = RegtoolConfig::load(Some(&path)).unwrap();
        assert_eq!(config.default_format, ValueFormat::Float32BeSwap);
        assert_eq!(config.start_address, 40001);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/regtool-logs")));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_unknown_format_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("regtool.toml");
        fs::write(&path, "default_format = \"float-middle\"\n").unwrap();

        assert!(RegtoolConfig::load(Some(&path)).is_err());
    }
}
