//! Arcade configuration stored in `arcade.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "arcade.toml";

/// Arcade configuration (TOML).
///
/// Missing fields default to the classic game setup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Directory holding checkpoint `*.json` files. Created on first write.
    pub checkpoint_dir: PathBuf,

    /// Offer to resume the newest checkpoint at startup.
    pub offer_resume: bool,

    pub number_game: NumberGameConfig,

    pub word_game: WordGameConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NumberGameConfig {
    /// Smallest number the player may think of.
    pub low: u32,
    /// Largest number the player may think of.
    pub high: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WordGameConfig {
    /// Fixed seed for the final guess; random when unset.
    pub seed: Option<u64>,
}

impl Default for NumberGameConfig {
    fn default() -> Self {
        Self { low: 1, high: 100 }
    }
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            checkpoint_dir: PathBuf::from("checkpoints"),
            offer_resume: true,
            number_game: NumberGameConfig::default(),
            word_game: WordGameConfig::default(),
        }
    }
}

impl ArcadeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.checkpoint_dir.as_os_str().is_empty() {
            return Err(anyhow!("checkpoint_dir must not be empty"));
        }
        if self.number_game.low > self.number_game.high {
            return Err(anyhow!(
                "number_game.low ({}) must be <= number_game.high ({})",
                self.number_game.low,
                self.number_game.high
            ));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ArcadeConfig::default()`.
pub fn load_config(path: &Path) -> Result<ArcadeConfig> {
    if !path.exists() {
        let cfg = ArcadeConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ArcadeConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &ArcadeConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    let tmp_path = path.with_extension("toml.tmp");
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(&tmp_path, buf).with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
