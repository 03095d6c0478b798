//! The server for the Fyyur listings site.

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use fyyur::config::Config;
use fyyur::{db, router};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let pool = db::connect(&config).await?;

    tracing::info!(address = %config.address, "serving fyyur");
    axum::Server::bind(&config.address)
        .serve(router(pool).into_make_service())
        .await
        .context("Server stopped unexpectedly")
}
