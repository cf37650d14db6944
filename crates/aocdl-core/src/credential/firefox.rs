//! Browser-backed provider: reads the `session` cookie from a Firefox profile.
//!
//! Firefox keeps `cookies.sqlite` locked while running, so the database (and its
//! `-wal` journal, if any) is copied into a temp dir and queried there.

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

use super::{Credential, CredentialProvider, SESSION_COOKIE};

const COOKIES_DB: &str = "cookies.sqlite";

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

#[derive(Debug, Clone)]
pub struct FirefoxCookieStore {
    profile: Option<PathBuf>,
    domain: String,
}

impl FirefoxCookieStore {
    /// `profile` is a Firefox profile directory; `None` picks the most recently
    /// used profile under `~/.mozilla/firefox`.
    pub fn new(profile: Option<PathBuf>, domain: impl Into<String>) -> Self {
        Self {
            profile,
            domain: domain.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    async fn cookies_db(&self) -> Result<PathBuf> {
        let profile = match &self.profile {
            Some(p) => p.clone(),
            None => {
                let home = std::env::var_os("HOME").context("HOME is not set")?;
                newest_profile(&Path::new(&home).join(".mozilla").join("firefox")).await?
            }
        };
        let db = profile.join(COOKIES_DB);
        if !is_file(&db).await {
            anyhow::bail!("no {} in Firefox profile {}", COOKIES_DB, profile.display());
        }
        Ok(db)
    }
}

impl CredentialProvider for FirefoxCookieStore {
    fn describe(&self) -> String {
        match &self.profile {
            Some(p) => format!("Firefox profile {}", p.display()),
            None => "default Firefox profile".to_string(),
        }
    }

    async fn resolve(&self) -> Result<Credential> {
        let db = self.cookies_db().await?;
        tracing::debug!(db = %db.display(), domain = %self.domain, "reading Firefox cookies");
        let token = query_session_cookie(&db, &self.domain).await?;
        Ok(token.map(Credential::new).unwrap_or_default())
    }
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}

/// Profile directory under `root` whose `cookies.sqlite` was modified last.
pub(crate) async fn newest_profile(root: &Path) -> Result<PathBuf> {
    let mut entries = fs::read_dir(root)
        .await
        .with_context(|| format!("read Firefox profiles in {}", root.display()))?;

    let mut best: Option<(SystemTime, PathBuf)> = None;
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("read Firefox profiles in {}", root.display()))?
    {
        let dir = entry.path();
        let modified = match fs::metadata(dir.join(COOKIES_DB)).await.and_then(|m| m.modified()) {
            Ok(t) => t,
            Err(_) => continue,
        };
        if best.as_ref().map_or(true, |(t, _)| modified > *t) {
            best = Some((modified, dir));
        }
    }

    best.map(|(_, dir)| dir)
        .with_context(|| format!("no Firefox profile with cookies found in {}", root.display()))
}

/// Looks up the `session` cookie for `domain` (bare or dotted host) in a copy of `db`.
pub(crate) async fn query_session_cookie(db: &Path, domain: &str) -> Result<Option<String>> {
    let snapshot = tempfile::tempdir().context("create temp dir for cookie snapshot")?;
    let copy = snapshot.path().join(COOKIES_DB);
    fs::copy(db, &copy)
        .await
        .with_context(|| format!("copy {}", db.display()))?;

    let wal = db.with_file_name(format!("{}-wal", COOKIES_DB));
    if is_file(&wal).await {
        fs::copy(&wal, snapshot.path().join(format!("{}-wal", COOKIES_DB)))
            .await
            .with_context(|| format!("copy {}", wal.display()))?;
    }

    let uri = path_to_sqlite_uri(&copy) + "?mode=rw";
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&uri)
        .await
        .with_context(|| format!("open cookie database {}", db.display()))?;

    let dotted = format!(".{}", domain);
    let row = sqlx::query(
        r#"
        SELECT value
        FROM moz_cookies
        WHERE name = ?1 AND (host = ?2 OR host = ?3)
        ORDER BY expiry DESC
        LIMIT 1
        "#,
    )
    .bind(SESSION_COOKIE)
    .bind(domain)
    .bind(&dotted)
    .fetch_optional(&pool)
    .await
    .context("query moz_cookies")?;

    pool.close().await;

    let value = match row {
        Some(r) => r
            .try_get::<Option<String>, _>("value")
            .context("read moz_cookies.value")?,
        None => None,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn write_cookies(db: &Path, rows: &[(&str, &str, &str, i64)]) {
        let uri = path_to_sqlite_uri(db) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&uri)
            .await
            .unwrap();
        sqlx::query(
            r#"
            CREATE TABLE moz_cookies (
                id INTEGER PRIMARY KEY,
                name TEXT,
                value TEXT,
                host TEXT,
                path TEXT,
                expiry INTEGER
            );
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        for (name, value, host, expiry) in rows {
            sqlx::query(
                "INSERT INTO moz_cookies (name, value, host, path, expiry) VALUES (?1, ?2, ?3, '/', ?4)",
            )
            .bind(*name)
            .bind(*value)
            .bind(*host)
            .bind(*expiry)
            .execute(&pool)
            .await
            .unwrap();
        }
        pool.close().await;
    }

    #[tokio::test]
    async fn finds_session_cookie_for_dotted_host() {
        let profile = tempdir().unwrap();
        write_cookies(
            &profile.path().join(COOKIES_DB),
            &[
                ("session", "other-site", ".example.com", 10),
                ("_ga", "GA1.2", ".adventofcode.com", 10),
                ("session", "53616c7465645f5f", ".adventofcode.com", 10),
            ],
        )
        .await;

        let store = FirefoxCookieStore::new(Some(profile.path().to_path_buf()), "adventofcode.com");
        let cred = store.resolve().await.unwrap();
        assert_eq!(cred.session(), Some("53616c7465645f5f"));
    }

    #[tokio::test]
    async fn prefers_latest_expiry() {
        let profile = tempdir().unwrap();
        write_cookies(
            &profile.path().join(COOKIES_DB),
            &[
                ("session", "old", "adventofcode.com", 100),
                ("session", "new", ".adventofcode.com", 200),
            ],
        )
        .await;

        let store = FirefoxCookieStore::new(Some(profile.path().to_path_buf()), "adventofcode.com");
        assert_eq!(store.resolve().await.unwrap().session(), Some("new"));
    }

    #[tokio::test]
    async fn no_cookie_gives_no_credential() {
        let profile = tempdir().unwrap();
        write_cookies(
            &profile.path().join(COOKIES_DB),
            &[("session", "x", ".example.com", 10)],
        )
        .await;

        let store = FirefoxCookieStore::new(Some(profile.path().to_path_buf()), "adventofcode.com");
        assert!(!store.resolve().await.unwrap().is_present());
    }

    #[tokio::test]
    async fn profile_without_database_is_an_error() {
        let profile = tempdir().unwrap();
        let store = FirefoxCookieStore::new(Some(profile.path().to_path_buf()), "adventofcode.com");
        assert!(store.resolve().await.is_err());
    }

    #[tokio::test]
    async fn null_cookie_value_gives_no_credential() {
        let profile = tempdir().unwrap();
        let db = profile.path().join(COOKIES_DB);
        write_cookies(&db, &[]).await;
        let uri = path_to_sqlite_uri(&db) + "?mode=rw";
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&uri)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO moz_cookies (name, value, host, path, expiry) VALUES ('session', NULL, '.adventofcode.com', '/', 10)",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool.close().await;

        let store = FirefoxCookieStore::new(Some(profile.path().to_path_buf()), "adventofcode.com");
        assert!(!store.resolve().await.unwrap().is_present());
    }

    #[tokio::test]
    async fn newest_profile_picks_dir_with_cookies() {
        let root = tempdir().unwrap();
        std::fs::create_dir(root.path().join("empty.default")).unwrap();
        let with_cookies = root.path().join("abcd.default-release");
        std::fs::create_dir(&with_cookies).unwrap();
        std::fs::write(with_cookies.join(COOKIES_DB), b"").unwrap();

        assert_eq!(newest_profile(root.path()).await.unwrap(), with_cookies);
    }

    #[tokio::test]
    async fn newest_profile_none_found() {
        let root = tempdir().unwrap();
        assert!(newest_profile(root.path()).await.is_err());
    }

    #[test]
    fn sqlite_uri_escapes_spaces() {
        let uri = path_to_sqlite_uri(Path::new("/tmp/my profile/cookies.sqlite"));
        assert_eq!(uri, "sqlite:///tmp/my%20profile/cookies.sqlite");
    }
}
