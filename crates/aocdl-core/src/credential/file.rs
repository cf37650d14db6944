//! File-backed provider: the token is the first line of a plain-text file.

use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};

use super::{Credential, CredentialProvider};
use crate::error::AocError;

#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialProvider for SessionFile {
    fn describe(&self) -> String {
        format!("session file {}", self.path.display())
    }

    async fn resolve(&self) -> Result<Credential> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(AocError::MissingSessionFile {
                    path: self.path.clone(),
                }
                .into());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("read {}", self.path.display()));
            }
        };
        let first_line = data.lines().next().unwrap_or("");
        Ok(Credential::new(first_line))
    }
}
