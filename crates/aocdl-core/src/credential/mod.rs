//! Session credential and the providers that produce it.
//!
//! The download step only depends on [`CredentialProvider`]; it does not know
//! whether the token came from a file or from a browser cookie store.

mod file;
mod firefox;

use anyhow::{Context, Result};
use std::fmt;

use crate::config::{AocdlConfig, CredentialSourceKind};

pub use file::SessionFile;
pub use firefox::FirefoxCookieStore;

/// Name of the cookie the puzzle site authenticates with.
pub const SESSION_COOKIE: &str = "session";

/// The session token, or nothing. Trailing whitespace is dropped; empty and
/// whitespace-only tokens count as nothing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(Option<String>);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim_end();
        if token.is_empty() {
            Credential(None)
        } else {
            Credential(Some(token.to_string()))
        }
    }

    pub fn none() -> Self {
        Credential(None)
    }

    pub fn session(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// Value for curl's cookie option: `session=<token>`.
    pub fn cookie(&self) -> Option<String> {
        self.session()
            .map(|token| format!("{}={}", SESSION_COOKIE, token))
    }
}

// Never print the token.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Credential(<redacted>)"),
            None => f.write_str("Credential(None)"),
        }
    }
}

/// Something that can produce a session credential.
#[allow(async_fn_in_trait)]
pub trait CredentialProvider {
    /// Human-readable origin, used in logs and diagnostics.
    fn describe(&self) -> String;

    async fn resolve(&self) -> Result<Credential>;
}

/// Provider selected from config (or `--source`).
#[derive(Debug, Clone)]
pub enum CredentialSource {
    File(SessionFile),
    Firefox(FirefoxCookieStore),
}

impl CredentialSource {
    pub fn from_config(cfg: &AocdlConfig, kind: CredentialSourceKind) -> Result<Self> {
        Ok(match kind {
            CredentialSourceKind::File => {
                CredentialSource::File(SessionFile::new(cfg.session_file.clone()))
            }
            CredentialSourceKind::Firefox => {
                let url = url::Url::parse(&cfg.base_url)
                    .with_context(|| format!("invalid base_url {:?}", cfg.base_url))?;
                let domain = url
                    .host_str()
                    .with_context(|| format!("base_url {:?} has no host", cfg.base_url))?;
                CredentialSource::Firefox(FirefoxCookieStore::new(
                    cfg.firefox_profile.clone(),
                    domain,
                ))
            }
        })
    }
}

impl CredentialProvider for CredentialSource {
    fn describe(&self) -> String {
        match self {
            CredentialSource::File(p) => p.describe(),
            CredentialSource::Firefox(p) => p.describe(),
        }
    }

    async fn resolve(&self) -> Result<Credential> {
        match self {
            CredentialSource::File(p) => p.resolve().await,
            CredentialSource::Firefox(p) => p.resolve().await,
        }
    }
}
