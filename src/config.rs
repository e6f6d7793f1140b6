//! Library configuration
//!
//! The configuration file is optional. It is looked up as `espident.toml` in
//! the platform's configuration directory, and currently only tells where the
//! flash stub descriptions live:
//!
//! ```toml
//! [stubs]
//! dir = "/opt/esp/stubs"
//! ```

use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::Error;

const CONFIG_FILE_NAME: &str = "espident.toml";

/// Where to find the flash stubs
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct StubConfig {
    /// Directory holding one `<chip>.toml` file per chip
    pub dir: Option<PathBuf>,
}

/// Configuration for the library
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub stubs: StubConfig,
}

impl Config {
    /// Load the config from the platform configuration directory, falling
    /// back to the default when there is none
    pub fn load() -> Result<Self, Error> {
        match project_dirs() {
            Some(dirs) => Self::load_from(&dirs.config_dir().join(CONFIG_FILE_NAME)),
            None => Ok(Self::default()),
        }
    }

    /// Load the config from `path`; a missing file yields the default
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let data = read_to_string(path)
            .map_err(|e| Error::FileOpenError(path.display().to_string(), e))?;

        debug!("Loaded config from {}", path.display());

        Self::from_toml(&data)
    }

    /// Parse a config from TOML text
    pub fn from_toml(data: &str) -> Result<Self, Error> {
        toml::from_str(data).map_err(Error::InvalidConfig)
    }

    /// Directory the flash stubs are read from
    pub fn stub_dir(&self) -> Option<PathBuf> {
        self.stubs
            .dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("stubs")))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("rs", "esp", "espident")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stub_dir() {
        let config = Config::from_toml("[stubs]\ndir = \"/opt/esp/stubs\"\n").unwrap();

        assert_eq!(config.stubs.dir, Some(PathBuf::from("/opt/esp/stubs")));
        assert_eq!(config.stub_dir(), Some(PathBuf::from("/opt/esp/stubs")));
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn missing_file_is_default() {
        let config = Config::load_from(Path::new("/nonexistent/espident.toml")).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn rejects_invalid_toml() {
        assert!(matches!(
            Config::from_toml("[stubs\n"),
            Err(Error::InvalidConfig(_))
        ));
    }
}
