//! The single HTTP GET for a day's input.
//!
//! Uses the curl crate (libcurl). The transfer blocks the calling thread; call
//! from `spawn_blocking` if used from async code.

use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

use crate::config::AocdlConfig;
use crate::credential::Credential;
use crate::day::Day;
use crate::error::AocError;

/// Settings for the GET, usually taken from config.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: format!("aocdl/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        }
    }
}

impl FetchOptions {
    pub fn from_config(cfg: &AocdlConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.timeout(),
        }
    }
}

/// `<base>/<year>/day/<day>/input`.
pub fn input_url(base_url: &str, year: u16, day: Day) -> Result<Url> {
    let mut base = Url::parse(base_url).with_context(|| format!("invalid base URL {:?}", base_url))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("{}/day/{}/input", year, day))
        .with_context(|| format!("build input URL from {}", base_url))
}

/// Maps a response status to the run's outcome. Only 2xx is a success.
pub(crate) fn check_status(code: u32, year: u16, day: Day) -> Result<(), AocError> {
    match code {
        200..=299 => Ok(()),
        400 => Err(AocError::InvalidSession),
        404 => Err(AocError::NotAvailable {
            year,
            day: day.get(),
        }),
        code => Err(AocError::Http(code)),
    }
}

/// Performs one GET with the session cookie attached and returns the body bytes unchanged.
pub fn fetch_input(
    url: &Url,
    credential: &Credential,
    year: u16,
    day: Day,
    opts: &FetchOptions,
) -> Result<Vec<u8>> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url.as_str()).context("invalid URL")?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    if let Some(cookie) = credential.cookie() {
        easy.cookie(&cookie)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().context("GET request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    tracing::debug!(status = code, bytes = body.len(), "GET {}", url);
    check_status(code, year, day)?;

    Ok(body)
}
