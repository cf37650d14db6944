//! Writes the downloaded input to `<dir>/day_<n>.txt`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::day::Day;

/// Path the input for `day` is written to inside `dir`.
pub fn artifact_path(dir: &Path, day: Day) -> PathBuf {
    dir.join(day.file_name())
}

/// Creates `dir` (recursively; fine if it exists) and writes `body` verbatim,
/// replacing any previous file for the same day. Not atomic.
pub async fn write_artifact(dir: &Path, day: Day, body: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("create directory {}", dir.display()))?;
    let path = artifact_path(dir, day);
    tokio::fs::write(&path, body)
        .await
        .with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
