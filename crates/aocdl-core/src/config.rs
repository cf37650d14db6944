use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Where the session credential comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSourceKind {
    /// Plain-text session file in the working directory.
    #[default]
    File,
    /// The `session` cookie from a Firefox profile's cookie store.
    Firefox,
}

/// Global configuration loaded from `~/.config/aocdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AocdlConfig {
    /// Scheme and host of the puzzle site; the input path is appended to it.
    pub base_url: String,
    /// Puzzle year used when `--year` is not given.
    pub year: u16,
    /// Destination directory used when `--dir` is not given.
    pub input_dir: PathBuf,
    /// Credential provider used when `--source` is not given.
    #[serde(default)]
    pub credential_source: CredentialSourceKind,
    /// Session file for the `file` source, relative to the working directory.
    pub session_file: PathBuf,
    /// Firefox profile directory for the `firefox` source. If missing, the most
    /// recently used profile under `~/.mozilla/firefox` is picked.
    #[serde(default)]
    pub firefox_profile: Option<PathBuf>,
    /// `User-Agent` sent with the request.
    pub user_agent: String,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Overall request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AocdlConfig {
    fn default() -> Self {
        Self {
            base_url: "https://adventofcode.com".to_string(),
            year: 2024,
            input_dir: PathBuf::from("input"),
            credential_source: CredentialSourceKind::File,
            session_file: PathBuf::from(".session"),
            firefox_profile: None,
            user_agent: format!("aocdl/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

impl AocdlConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("aocdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AocdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AocdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: AocdlConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
