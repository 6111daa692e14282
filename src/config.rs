use std::{
    fs::{create_dir_all, File},
    io::{BufReader, Write},
    path::PathBuf,
};

use home::home_dir;
use serde::{Deserialize, Serialize};

use rocktab::RockTabError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    default_track: usize,
    pretty_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_track: 0,
            pretty_output: true,
        }
    }
}

impl Config {
    // folder placed in $HOME directory
    const FOLDER: &'static str = ".rocktab";

    pub const fn default_track(&self) -> usize {
        self.default_track
    }

    pub const fn pretty_output(&self) -> bool {
        self.pretty_output
    }

    fn get_base_path() -> Result<PathBuf, RockTabError> {
        let home = home_dir()
            .ok_or_else(|| RockTabError::IoError("Could not find home directory".to_string()))?;
        Ok(home.join(Self::FOLDER))
    }

    fn get_path() -> Result<PathBuf, RockTabError> {
        let base = Self::get_base_path()?;
        Ok(base.join("config.json"))
    }

    /// Creates config if it does not exist
    pub fn read_config() -> Result<Self, RockTabError> {
        let base_path = Self::get_base_path()?;
        if !base_path.exists() {
            create_dir_all(base_path)?;
        }
        let config_path = Self::get_path()?;
        if !config_path.exists() {
            // create default config
            Config::default().save_config()?;
        }
        let file = File::open(config_path)?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader).map_err(|err| {
            RockTabError::ParsingError(format!("Could not read local configuration {err:}"))
        })?;
        Ok(config)
    }

    /// Assumes the config folder exists
    pub fn save_config(&self) -> Result<(), RockTabError> {
        let config_path = Self::get_path()?;
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            RockTabError::ParsingError(format!("Could not save local configuration {err:}"))
        })?;
        let mut file = File::create(config_path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "default_track": 2 }"#).unwrap();
        assert_eq!(config.default_track(), 2);
        assert!(config.pretty_output());
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config {
            default_track: 1,
            pretty_output: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        let read: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(read.default_track(), 1);
        assert!(!read.pretty_output());
    }
}
