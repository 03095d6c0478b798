//! Connection handling and the per-request transaction.

use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use anyhow::{Context as _, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

use crate::config::Config;

/// Opens the pool and brings the schema up to date.
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("Invalid database URL {}", config.database_url))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        // in-memory databases vanish with their last connection
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    migrate(&pool).await?;

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!()
        .run(pool)
        .await
        .context("Failed to run migrations")
}

/// A transaction held for the length of one write.
///
/// Dropping it without calling [`DbConn::close`] rolls everything back, so an
/// early return never leaves a partial write behind.
#[derive(Debug)]
pub struct DbConn(Transaction<'static, Sqlite>);

impl DbConn {
    pub async fn begin(pool: &SqlitePool) -> sqlx::Result<Self> {
        Ok(Self(pool.begin().await?))
    }

    /// Commits if `outcome` succeeded and rolls back otherwise, passing the
    /// outcome through. A failed commit turns success into failure.
    pub async fn close<T>(self, outcome: sqlx::Result<T>) -> sqlx::Result<T> {
        match outcome {
            Ok(value) => {
                self.0.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = self.0.rollback().await {
                    tracing::warn!(%rollback_error, "failed to roll back transaction");
                }
                Err(error)
            }
        }
    }
}

impl Deref for DbConn {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
