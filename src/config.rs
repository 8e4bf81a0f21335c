// src/config.rs
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BrowseError, Result};
use crate::viewport::ViewportConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub viewport: ViewportConfig,
    /// Directory shown at startup; `$HOME` when unset.
    pub start_dir: Option<PathBuf>,
    /// Program used to open files; found on `PATH` when unset.
    pub opener: Option<PathBuf>,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dirview").join("config.json"))
}

impl Config {
    /// Reads `path`, or the default location when `None`. A missing file
    /// means defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => path,
            None => return Ok(Config::default()),
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(BrowseError::from_io(&path.to_string_lossy(), e)),
        };

        serde_json::from_str(&text).map_err(|source| BrowseError::Config { path, source })
    }

    pub fn start_dir(&self) -> PathBuf {
        self.start_dir
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"))
    }
}
