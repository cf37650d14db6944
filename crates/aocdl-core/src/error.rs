//! Classified failures of a download run.
//!
//! Everything else (I/O, transport) travels as `anyhow::Error` with context;
//! these variants exist so the CLI and tests can tell the cases apart via
//! `downcast_ref::<AocError>()`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AocError {
    /// The session file for the file-backed provider does not exist.
    #[error(
        "session file {} not found: log in to Advent of Code in a browser, copy the value of \
         the `session` cookie and save it as the first line of {}",
        .path.display(),
        .path.display()
    )]
    MissingSessionFile { path: PathBuf },

    /// A provider ran but produced no token.
    #[error("no session cookie found in {origin}")]
    MissingCredential { origin: String },

    /// Server rejected the session (HTTP 400).
    #[error("invalid session: the server rejected the session cookie (expired or wrong value)")]
    InvalidSession,

    /// HTTP 404: the puzzle is not unlocked yet, or the year/day do not exist.
    #[error("input for {year} day {day} is not available yet")]
    NotAvailable { year: u16, day: u8 },

    /// Any other non-2xx status.
    #[error("server returned HTTP {0}")]
    Http(u32),

    /// The requested (or defaulted) day is not a puzzle day.
    #[error("day {0} is outside 1..=25; pass --day explicitly")]
    DayOutOfRange(u32),
}
