//! Connectivity check command

use anyhow::{Context, Result};

use userbook_server::{create_pool, Config};

/// Validate configuration and ping the database.
pub async fn run_check() -> Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;
    let db = &config.database;

    let pool = create_pool(db).await.context("Database check failed")?;
    pool.close().await;

    println!(
        "Database reachable: {}@{}:{}/{}",
        db.user, db.host, db.port, db.database
    );
    Ok(())
}
