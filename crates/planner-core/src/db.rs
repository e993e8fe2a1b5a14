use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::debug;

use crate::error::CoreError;

pub type DbPool = SqlitePool;

/// Opens (creating if needed) the SQLite database at `database_path` and
/// brings its schema up to date.
///
/// `":memory:"` gives a private in-memory database, handy for tests.
pub async fn establish_connection(database_path: &str) -> Result<DbPool, CoreError> {
    let url = if database_path == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite://{}", database_path)
    };

    let options = SqliteConnectOptions::from_str(&url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // A single connection keeps an in-memory database alive and shared.
    let pool = if database_path == ":memory:" {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    }
    .connect_with(options)
    .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    debug!(database_path, "database ready");

    Ok(pool)
}
