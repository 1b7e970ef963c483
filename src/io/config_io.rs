use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Config file looked up in the task root
pub const CONFIG_FILE: &str = ".stask.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse .stask.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Read `.stask.toml` from the task root. A missing file gives the defaults.
pub fn read_config(root: &Path) -> Result<Config, ConfigError> {
    let path = config_path(root);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    let config: Config = toml::from_str(&text)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}
