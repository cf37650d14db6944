//! Fetch-and-save for one day: resolve credential, GET, write.
//!
//! Nothing touches the network until a credential is in hand, and nothing is
//! written unless the GET succeeded.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::AocdlConfig;
use crate::credential::CredentialProvider;
use crate::day::Day;
use crate::error::AocError;
use crate::fetch::{self, FetchOptions};
use crate::storage;

/// What to download and where to put it.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub base_url: String,
    pub year: u16,
    pub day: Day,
    pub dir: PathBuf,
}

impl DownloadRequest {
    /// Request for `day` using config values for anything not overridden.
    pub fn from_config(
        cfg: &AocdlConfig,
        day: Day,
        year: Option<u16>,
        dir: Option<PathBuf>,
    ) -> Self {
        Self {
            base_url: cfg.base_url.clone(),
            year: year.unwrap_or(cfg.year),
            day,
            dir: dir.unwrap_or_else(|| cfg.input_dir.clone()),
        }
    }
}

/// Downloads the input for `req.day` and returns the path it was written to.
pub async fn download<P: CredentialProvider>(
    provider: &P,
    req: &DownloadRequest,
    opts: &FetchOptions,
) -> Result<PathBuf> {
    let origin = provider.describe();
    tracing::debug!("resolving session from {}", origin);
    let credential = provider.resolve().await?;
    if !credential.is_present() {
        return Err(AocError::MissingCredential { origin }.into());
    }

    let url = fetch::input_url(&req.base_url, req.year, req.day)?;
    tracing::info!(year = req.year, day = %req.day, "downloading {}", url);

    let (year, day, opts) = (req.year, req.day, opts.clone());
    let body = tokio::task::spawn_blocking(move || {
        fetch::fetch_input(&url, &credential, year, day, &opts)
    })
    .await
    .context("fetch task panicked")??;

    let path = storage::write_artifact(&req.dir, req.day, &body).await?;
    tracing::info!(bytes = body.len(), "wrote {}", path.display());
    Ok(path)
}
