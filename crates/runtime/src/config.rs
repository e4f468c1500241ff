//! Runtime config file: a `scene` section fixed for the run and a `params`
//! section that may be reloaded while running. Missing sections and fields
//! take their defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use softbody::{SceneConfig, SimParams};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub scene: SceneConfig,
    pub params: SimParams,
}

impl ConfigFile {
    /// Parse and validate a config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or out-of-range values.
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("malformed config")?;
        config.scene.validate().context("invalid scene")?;
        config.params.validate().context("invalid params")?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in config {}", path.display()))
    }
}
