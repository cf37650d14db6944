//! `aocdl download` – fetch one day's input into the input directory.

use anyhow::Result;
use aocdl_core::config::{AocdlConfig, CredentialSourceKind};
use aocdl_core::credential::CredentialSource;
use aocdl_core::day::Day;
use aocdl_core::download::{download, DownloadRequest};
use aocdl_core::fetch::FetchOptions;
use std::path::PathBuf;

pub async fn run_download(
    cfg: &AocdlConfig,
    day: Day,
    dir: Option<PathBuf>,
    year: Option<u16>,
    source: Option<CredentialSourceKind>,
) -> Result<()> {
    let provider = CredentialSource::from_config(cfg, source.unwrap_or(cfg.credential_source))?;
    let req = DownloadRequest::from_config(cfg, day, year, dir);

    let path = download(&provider, &req, &FetchOptions::from_config(cfg)).await?;
    println!("Saved {} day {} input to {}", req.year, day, path.display());
    Ok(())
}
