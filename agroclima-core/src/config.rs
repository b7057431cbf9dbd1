use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// Overrides `backend_url` from the config file when set.
pub const BACKEND_URL_ENV: &str = "AGROCLIMA_BACKEND_URL";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FORECAST_DAYS: usize = 7;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// backend_url = "http://localhost:8000"
/// timeout_secs = 10
/// forecast_days = 7
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the forecast backend, without the `/api/...` path.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many forecast cards to show.
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_forecast_days() -> usize {
    DEFAULT_FORECAST_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    /// `AGROCLIMA_BACKEND_URL` wins over the file either way.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        cfg.with_backend_override(std::env::var(BACKEND_URL_ENV).ok().as_deref())
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
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

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "agroclima", "agroclima")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace the backend URL after checking it parses as http(s).
    pub fn set_backend_url(&mut self, url: &str) -> Result<()> {
        self.backend_url = parse_backend_url(url)?;
        Ok(())
    }

    pub fn with_backend_override(mut self, override_url: Option<&str>) -> Result<Self> {
        if let Some(url) = override_url.filter(|u| !u.trim().is_empty()) {
            self.set_backend_url(url)
                .with_context(|| format!("Invalid {BACKEND_URL_ENV}"))?;
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        parse_backend_url(&self.backend_url)?;
        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}

/// Trailing slashes are dropped so paths can be appended verbatim.
fn parse_backend_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).with_context(|| format!("Invalid backend URL '{raw}'"))?;

    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(anyhow!(
            "Unsupported backend URL scheme '{other}'. Use http:// or https://."
        )),
    }
}
