pub mod recipes;

pub use recipes::RecipeRepository;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Result;

/// Database handle type (the pool is cheap to clone across handlers)
pub type Db = SqlitePool;

/// Migrations embedded at compile time from `./migrations`
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Open or create the SQLite database at the given URL
///
/// Foreign keys are enforced on every connection so that deleting a recipe
/// cascades to its ingredients. Pending migrations are applied before the
/// pool is returned.
pub async fn open_database(database_url: &str, max_connections: u32) -> Result<Db> {
    tracing::info!("Opening database at: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // Create parent directory if it doesn't exist
    if let Some(parent) = database_path(database_url).and_then(Path::parent) {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                sqlx::Error::Io(e)
            })?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Database initialized successfully");

    Ok(pool)
}

/// Filesystem path named by a `sqlite:` URL, if it names one
fn database_path(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(Path::new(path))
}

/// Open a database stored in a file at `path`
pub async fn open_database_file(path: impl AsRef<Path>, max_connections: u32) -> Result<Db> {
    let url = format!("sqlite://{}", path.as_ref().display());
    open_database(&url, max_connections).await
}
