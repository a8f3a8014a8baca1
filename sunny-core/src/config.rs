use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://api.caiyunapp.com/";
pub const DEFAULT_LANG: &str = "zh_CN";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable that overrides the stored API token.
pub const TOKEN_ENV: &str = "SUNNY_WEATHER_TOKEN";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// token = "..."
/// base_url = "https://api.caiyunapp.com/"
/// lang = "zh_CN"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// API token for the weather service.
    pub token: Option<String>,
    pub base_url: Option<String>,
    /// Language for place names and advisory text.
    pub lang: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Where the saved place lives; defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Token from the environment, falling back to the stored one.
    pub fn token(&self) -> Result<String> {
        self.token_with_override(std::env::var(TOKEN_ENV).ok())
    }

    pub(crate) fn token_with_override(&self, env_token: Option<String>) -> Result<String> {
        env_token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.token.clone())
            .ok_or_else(|| {
                anyhow!(
                    "No API token configured.\n\
                     Hint: run `sunny configure` or set {TOKEN_ENV}."
                )
            })
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn lang(&self) -> &str {
        self.lang.as_deref().unwrap_or(DEFAULT_LANG)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "sunnyweather", "sunny")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory holding the preferences file.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::project_dirs()?.data_dir().to_path_buf()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.token_with_override(None).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API token configured"));
        assert!(msg.contains("Hint: run `sunny configure`"));
    }

    #[test]
    fn stored_token_is_used() {
        let mut cfg = Config::default();
        cfg.set_token("STORED".into());

        assert_eq!(cfg.token_with_override(None).unwrap(), "STORED");
    }

    #[test]
    fn env_token_overrides_stored_one() {
        let mut cfg = Config::default();
        cfg.set_token("STORED".into());

        let token = cfg.token_with_override(Some("FROM_ENV".into())).unwrap();
        assert_eq!(token, "FROM_ENV");

        let blank = cfg.token_with_override(Some("  ".into())).unwrap();
        assert_eq!(blank, "STORED");
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.lang(), DEFAULT_LANG);
        assert_eq!(cfg.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn explicit_data_dir_wins() {
        let cfg = Config {
            data_dir: Some(PathBuf::from("/tmp/sunny-test")),
            ..Config::default()
        };
        assert_eq!(cfg.data_dir().unwrap(), PathBuf::from("/tmp/sunny-test"));
    }

    #[test]
    fn toml_roundtrip_keeps_fields() {
        let cfg = Config {
            token: Some("abc".into()),
            lang: Some("en_US".into()),
            timeout_secs: Some(3),
            ..Config::default()
        };

        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.token.as_deref(), Some("abc"));
        assert_eq!(parsed.lang(), "en_US");
        assert_eq!(parsed.timeout(), Duration::from_secs(3));
        assert_eq!(parsed.base_url(), DEFAULT_BASE_URL);
    }
}
