use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{fmt, fs, io::Read, path::Path, path::PathBuf};

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Configuration stored on disk. The API key is the only setting.
///
/// Example TOML:
/// api_key = "..."
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
}

impl Config {
    /// Layers, lowest first: config file, `.env` file, process environment.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let cfg = Self::load_from(&path)?;

        let cfg = match dotenvy::dotenv_iter() {
            Ok(entries) => cfg.with_dotenv(entries)?,
            Err(err) if err.not_found() => cfg,
            Err(err) => return Err(err).context("Failed to read .env file"),
        };

        Ok(cfg.with_env_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Read config from `path`, or return an empty default if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(cfg)
    }

    /// Pick the API key out of `.env` entries. The process environment is
    /// left untouched.
    pub fn with_dotenv<R: Read>(mut self, entries: dotenvy::Iter<R>) -> Result<Self> {
        for entry in entries {
            let (key, value) = entry.context("Failed to parse .env file")?;
            if key == API_KEY_ENV && !value.trim().is_empty() {
                tracing::debug!("API key taken from .env");
                self.api_key = Some(value);
            }
        }
        Ok(self)
    }

    /// A non-empty environment value replaces whatever the file said.
    pub fn with_env_override(mut self, value: Option<String>) -> Self {
        if let Some(key) = value.filter(|v| !v.trim().is_empty()) {
            tracing::debug!("API key taken from {API_KEY_ENV}");
            self.api_key = Some(key);
        }
        self
    }

    /// The credential used for every request. A missing key becomes an empty
    /// one; the provider rejects it with 401 on first use.
    pub fn credential(&self) -> Credential {
        Credential::new(self.api_key.clone().unwrap_or_default())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Provider API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("weather-lookup-{}-{name}", std::process::id()))
    }

    #[test]
    fn missing_file_yields_empty_config() {
        let cfg = Config::load_from(&temp_path("does-not-exist.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(cfg.credential().is_empty());
    }

    #[test]
    fn file_value_is_read() {
        let path = temp_path("file-value.toml");
        fs::write(&path, "api_key = \"FILE_KEY\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(cfg.credential().as_str(), "FILE_KEY");
    }

    #[test]
    fn malformed_file_reports_path() {
        let path = temp_path("malformed.toml");
        fs::write(&path, "api_key = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn dotenv_file_supplies_the_key() {
        let path = temp_path("dotenv");
        fs::write(&path, "# local secrets\nOTHER=1\nOPENWEATHER_API_KEY=DOTENV_KEY\n").unwrap();

        let entries = dotenvy::from_path_iter(&path).unwrap();
        let cfg = Config::default().with_dotenv(entries).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(cfg.credential().as_str(), "DOTENV_KEY");
    }

    #[test]
    fn dotenv_overrides_file_and_env_overrides_dotenv() {
        let entries = dotenvy::from_read_iter("OPENWEATHER_API_KEY=\"DOTENV_KEY\"\n".as_bytes());
        let cfg = Config { api_key: Some("FILE_KEY".into()) }.with_dotenv(entries).unwrap();
        assert_eq!(cfg.credential().as_str(), "DOTENV_KEY");

        let cfg = cfg.with_env_override(Some("ENV_KEY".into()));
        assert_eq!(cfg.credential().as_str(), "ENV_KEY");
    }

    #[test]
    fn dotenv_without_the_key_changes_nothing() {
        let entries = dotenvy::from_read_iter("OPENWEATHER_API_KEY=\nUNRELATED=x\n".as_bytes());
        let cfg = Config { api_key: Some("FILE_KEY".into()) }.with_dotenv(entries).unwrap();
        assert_eq!(cfg.credential().as_str(), "FILE_KEY");
    }

    #[test]
    fn env_overrides_file() {
        let cfg = Config { api_key: Some("FILE_KEY".into()) }
            .with_env_override(Some("ENV_KEY".into()));
        assert_eq!(cfg.credential().as_str(), "ENV_KEY");
    }

    #[test]
    fn blank_env_does_not_override() {
        let cfg = Config { api_key: Some("FILE_KEY".into()) }
            .with_env_override(Some("   ".into()));
        assert_eq!(cfg.credential().as_str(), "FILE_KEY");

        let cfg = Config::default().with_env_override(None);
        assert!(cfg.credential().is_empty());
    }

    #[test]
    fn credential_debug_is_redacted() {
        let shown = format!("{:?}", Credential::new("SECRET"));
        assert!(!shown.contains("SECRET"));
        assert_eq!(format!("{:?}", Credential::new("")), "Credential(<empty>)");
    }
}
