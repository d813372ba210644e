//! User configuration.
//!
//! Loaded from a TOML file; every section and key is optional. Precedence
//! for the file location is `--config`, then `ITEM_TETRIS_CONFIG`, then the
//! platform config directory. Values given on the command line are applied
//! on top afterwards by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::GameOptions;
use crate::error::{ConfigError, ConfigResult};
use crate::types::{
    GameMode, Randomizer, DEFAULT_ARR_MS, DEFAULT_DAS_MS, DEFAULT_KEY_RELEASE_TIMEOUT_MS,
    ITEM_INTERVAL_DEFAULT, MAX_START_LEVEL,
};

/// Environment variable that points at a config file.
pub const CONFIG_ENV: &str = "ITEM_TETRIS_CONFIG";

/// Directory name under the platform config and data directories.
pub const APP_DIR: &str = "item-tetris";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub game: GameSection,
    pub items: ItemsSection,
    pub input: InputSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSection {
    pub start_level: u32,
    pub randomizer: Randomizer,
    /// Fixed seed; a fresh random seed is used per run when unset.
    pub seed: Option<u64>,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            start_level: 0,
            randomizer: Randomizer::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ItemsSection {
    /// Cleared lines between bomb pieces.
    pub interval: u32,
}

impl Default for ItemsSection {
    fn default() -> Self {
        Self {
            interval: ITEM_INTERVAL_DEFAULT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSection {
    pub das_ms: u32,
    pub arr_ms: u32,
    pub key_release_timeout_ms: u32,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Parse and validate config text.
    pub fn from_toml_str(text: &str, path: &Path) -> ConfigResult<Self> {
        let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                debug!(path = %path.display(), "loading config");
                Self::from_toml_str(&text, path)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.game.start_level > MAX_START_LEVEL {
            return Err(ConfigError::invalid(
                "game.start_level",
                format!("{} is above {MAX_START_LEVEL}", self.game.start_level),
            ));
        }
        if self.items.interval == 0 {
            return Err(ConfigError::invalid(
                "items.interval",
                "must be at least 1",
            ));
        }
        if self.input.arr_ms == 0 {
            return Err(ConfigError::invalid("input.arr_ms", "must be at least 1"));
        }
        Ok(())
    }

    /// Options for a new game in `mode`.
    pub fn game_options(&self, mode: GameMode, seed: u64) -> GameOptions {
        GameOptions {
            mode,
            seed,
            randomizer: self.game.randomizer,
            item_interval: self.items.interval,
            start_level: self.game.start_level,
        }
    }
}

/// Pick the config file location.
pub fn resolve_path(cli: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Directory for the score and log files.
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}
