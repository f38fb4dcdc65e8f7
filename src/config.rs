use keep_dice::Expression;
use serde::Deserialize;
use std::{collections::HashMap, path::Path};

/// How bare expressions are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Total,
    Verbose,
    Full,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed seed for reproducible rolls; a fresh entropy seed is used otherwise.
    pub seed: Option<u64>,
    pub mode: Mode,
    pub aliases: HashMap<String, Expression>,
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(source)
    }

    /// Reads the config file, falling back to defaults when it is missing or invalid.
    pub fn load(path: &Path) -> Config {
        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Unable to read config file {:?}: {}", path, e);
                return Config::default();
            }
        };
        match Config::from_toml(&source) {
            Ok(config) => {
                log::info!(
                    "loaded config from {:?} with {} aliases",
                    path,
                    config.aliases.len()
                );
                config
            }
            Err(e) => {
                log::warn!("Unable to parse config: {}. Using default values", e);
                Config::default()
            }
        }
    }
}
