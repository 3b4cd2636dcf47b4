//! Common configuration utilities for VoltageEMS tools

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Load configuration for `service_name` from the working directory
///
/// See [`load_config_in`] for the sources and their priority.
pub fn load_config<T>(service_name: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Serialize + Default,
{
    load_config_in(Path::new("."), service_name)
}

/// Load configuration from multiple sources under `base_dir`
///
/// Priority (highest to lowest):
/// 1. Environment variables prefixed with `<SERVICE>_`
/// 2. `config/<service>.{toml,yaml,json}`
/// 3. `<service>.{toml,yaml}`
/// 4. `T::default()`
///
/// Missing files are skipped.
pub fn load_config_in<T>(base_dir: &Path, service_name: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Serialize + Default,
{
    let config_dir = base_dir.join("config");

    let figment = Figment::from(Serialized::defaults(T::default()))
        .merge(Toml::file(base_dir.join(format!("{}.toml", service_name))))
        .merge(Yaml::file(base_dir.join(format!("{}.yaml", service_name))))
        .merge(Toml::file(config_dir.join(format!("{}.toml", service_name))))
        .merge(Yaml::file(config_dir.join(format!("{}.yaml", service_name))))
        .merge(Json::file(config_dir.join(format!("{}.json", service_name))))
        .merge(Env::prefixed(&format!("{}_", service_name.to_uppercase())));

    debug!("Loading {} configuration from {}", service_name, base_dir.display());
    figment
        .extract()
        .map_err(|e| Error::Config(format!("Failed to load configuration: {}", e)))
}

/// Load configuration from a specific file, on top of `T::default()`
pub fn load_config_from_file<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Serialize + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::Config("Config file must have an extension".to_string()))?;

    let figment = Figment::from(Serialized::defaults(T::default()));
    let figment = match extension {
        "toml" => figment.merge(Toml::file(path)),
        "yaml" | "yml" => figment.merge(Yaml::file(path)),
        "json" => figment.merge(Json::file(path)),
        _ => {
            return Err(Error::Config(format!(
                "Unsupported config file format: {}",
                extension
            )))
        },
    };

    figment
        .extract()
        .map_err(|e| Error::Config(format!("Failed to load configuration from file: {}", e)))
}
