//! icsdrop configuration (~/.config/icsdrop/config.toml).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use icsdrop_core::IcsOptions;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// uid_domain, prod_id and line_ending
    #[serde(flatten)]
    pub ics: IcsOptions,

    /// Where `export` writes when --out-dir is not given
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Get the default config file path (~/.config/icsdrop/config.toml)
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("icsdrop");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from `path`, or from the default location.
    ///
    /// A missing default file means defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(p) => {
                if !p.exists() {
                    anyhow::bail!("Config file not found at {}", p.display());
                }
                p.to_path_buf()
            }
            None => {
                let p = Self::default_path()?;
                if !p.exists() {
                    debug!(path = %p.display(), "no config file, using defaults");
                    return Ok(Config::default());
                }
                p
            }
        };

        Self::from_file(&path)
    }

    fn from_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Command line flags win over the config file.
    pub fn apply_overrides(&mut self, uid_domain: Option<String>, prod_id: Option<String>) {
        if let Some(uid_domain) = uid_domain {
            self.ics.uid_domain = uid_domain;
        }
        if let Some(prod_id) = prod_id {
            self.ics.prod_id = prod_id;
        }
    }
}
