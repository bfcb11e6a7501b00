//! Configuration management for voicepeak-rs.
//!
//! Loads config from a YAML file in standard locations. Every field is
//! optional; a missing file means "use the platform default executable and
//! no synthesis defaults".

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Environment variable that overrides the configured executable path.
pub const EXECUTABLE_ENV: &str = "VOICEPEAK_PATH";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SayDefaults {
    pub narrator: Option<String>,
    pub speed: Option<i32>,
    pub pitch: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub executable: Option<PathBuf>,
    pub defaults: SayDefaults,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// An explicit `path` must exist and parse. Otherwise the first existing
    /// file among these is used, falling back to defaults on any problem:
    /// 1. ./voicepeak.yaml
    /// 2. ~/.config/voicepeak-rs/config.yaml
    /// 3. /etc/voicepeak-rs/config.yaml
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let config = Self::read(path)?;
            info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        let candidates = [
            std::env::current_dir().ok().map(|d| d.join("voicepeak.yaml")),
            dirs::home_dir().map(|h| h.join(".config/voicepeak-rs/config.yaml")),
            Some(PathBuf::from("/etc/voicepeak-rs/config.yaml")),
        ];
        let Some(config_path) = candidates.into_iter().flatten().find(|p| p.exists()) else {
            info!("No config file found, using defaults");
            return Ok(Self::default());
        };

        match Self::read(&config_path) {
            Ok(config) => {
                info!("Loaded config from {}", config_path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("{e}, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: format!("failed to read: {e}"),
        })?;
        Self::parse(&contents).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn parse(contents: &str) -> std::result::Result<Self, String> {
        // An empty file deserializes to null rather than an empty mapping.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(contents).map_err(|e| format!("failed to parse: {e}"))
    }
}

/// Pick the executable: environment, then config file, then platform default.
pub(crate) fn resolve_executable(
    env_override: Option<PathBuf>,
    config: &Config,
    os: &str,
) -> Result<PathBuf> {
    if let Some(path) = env_override.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }
    if let Some(path) = &config.executable {
        return Ok(path.clone());
    }
    default_executable(os)
}

/// Install location of the engine for `os` (a `std::env::consts::OS` value).
pub(crate) fn default_executable(os: &str) -> Result<PathBuf> {
    match os {
        "macos" => Ok(PathBuf::from(
            "/Applications/voicepeak.app/Contents/MacOS/voicepeak",
        )),
        "windows" => Ok(PathBuf::from(r"C:\Program Files\VOICEPEAK\voicepeak.exe")),
        other => Err(Error::UnsupportedPlatform(other.to_string())),
    }
}
