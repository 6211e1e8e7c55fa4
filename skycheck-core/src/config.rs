use directories::ProjectDirs;
use ini::Ini;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::error::WeatherError;

/// INI secrets file looked up in the working directory.
pub const INI_SECRETS_FILE_NAME: &str = "secrets.ini";

/// TOML secrets file looked up in the working directory and the platform config directory.
pub const SECRETS_FILE_NAME: &str = "secrets.toml";

const SECTION: &str = "openweather";
const API_KEY: &str = "api_key";

/// Example TOML:
/// [openweather]
/// api_key = "..."
#[derive(Debug, Deserialize)]
struct SecretsFile {
    openweather: Option<OpenWeatherSection>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherSection {
    api_key: Option<String>,
}

/// Credentials needed to talk to OpenWeather.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
}

// Keep the key out of debug logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config").field("api_key", &"<redacted>").finish()
    }
}

impl Config {
    /// Load credentials from `explicit` if given, otherwise from the first
    /// secrets file found in the working directory or the platform config directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self, WeatherError> {
        let path = Self::locate(explicit)?;
        Self::load_from(&path)
    }

    /// Load credentials from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, WeatherError> {
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                WeatherError::ConfigNotFound { searched: vec![path.to_path_buf()] }
            } else {
                WeatherError::ConfigRead { path: path.to_path_buf(), source }
            }
        })?;

        let is_ini = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("ini"));
        let cfg = if is_ini {
            Self::from_ini_str(&contents, path)?
        } else {
            Self::from_toml_str(&contents, path)?
        };
        debug!(path = %path.display(), "loaded secrets file");
        Ok(cfg)
    }

    /// Parse credentials from TOML text; `origin` is only used in error messages.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, WeatherError> {
        let file: SecretsFile = toml::from_str(contents)
            .map_err(|source| WeatherError::ConfigParse { path: origin.to_path_buf(), source })?;

        let section = file
            .openweather
            .ok_or_else(|| WeatherError::MissingSection { path: origin.to_path_buf() })?;

        Self::from_api_key(section.api_key.as_deref(), origin)
    }

    /// Parse credentials from INI text, where values need no quotes:
    /// `[openweather]` then `api_key = abc123`.
    pub fn from_ini_str(contents: &str, origin: &Path) -> Result<Self, WeatherError> {
        let ini = Ini::load_from_str(contents)
            .map_err(|source| WeatherError::IniParse { path: origin.to_path_buf(), source })?;

        let section = ini
            .section(Some(SECTION))
            .ok_or_else(|| WeatherError::MissingSection { path: origin.to_path_buf() })?;

        Self::from_api_key(section.get(API_KEY), origin)
    }

    fn from_api_key(api_key: Option<&str>, origin: &Path) -> Result<Self, WeatherError> {
        match api_key.map(str::trim) {
            Some(key) if !key.is_empty() => Ok(Self { api_key: key.to_string() }),
            _ => Err(WeatherError::MissingApiKey { path: origin.to_path_buf() }),
        }
    }

    /// Resolve which secrets file to read.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf, WeatherError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let candidates = Self::default_candidates();
        let found = candidates.iter().find(|p| p.is_file()).cloned();
        found.ok_or(WeatherError::ConfigNotFound { searched: candidates })
    }

    /// Default lookup order: `secrets.ini` then `secrets.toml` in the working directory,
    /// then `secrets.toml` in the platform config directory.
    pub fn default_candidates() -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from(INI_SECRETS_FILE_NAME), PathBuf::from(SECRETS_FILE_NAME)];
        if let Some(dir) = Self::platform_config_dir() {
            candidates.push(dir.join(SECRETS_FILE_NAME));
        }
        candidates
    }

    fn platform_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "skycheck", "skycheck").map(|dirs| dirs.config_dir().to_path_buf())
    }
}
