//! CLI configuration
//!
//! Settings come from, lowest priority first: built-in defaults, the TOML
//! file, then command line flags / environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use contented_client::ClientConfig;
use serde::Deserialize;

/// Contents of `config.toml`.
///
/// ```toml
/// [client]
/// base_url = "http://media.lan:3000"
/// page_size = 1000
///
/// [view]
/// visible = 6
/// before = 2
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub client: ClientConfig,
    pub view: ViewConfig,
}

/// Window shown by `load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub visible: usize,
    pub before: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            visible: contented_core::types::DEFAULT_VISIBLE,
            before: 1,
        }
    }
}

/// Values given on the command line, already merged with the environment by clap.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub page_size: Option<usize>,
}

/// `<config dir>/contented/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("contented").join("config.toml"))
}

/// Load the config file and apply overrides.
///
/// An explicitly named file must exist; the default file is optional.
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<FileConfig> {
    let mut config = match path {
        Some(path) => read_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => read_file(&path)?,
            _ => FileConfig::default(),
        },
    };
    apply_overrides(&mut config, overrides);
    Ok(config)
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = parse(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn parse(content: &str) -> Result<FileConfig> {
    Ok(toml::from_str(content)?)
}

fn apply_overrides(config: &mut FileConfig, overrides: &Overrides) {
    if let Some(base_url) = overrides.base_url.as_ref().filter(|s| !s.is_empty()) {
        config.client.base_url.clone_from(base_url);
    }
    if let Some(page_size) = overrides.page_size {
        config.client.page_size = page_size;
    }
}
