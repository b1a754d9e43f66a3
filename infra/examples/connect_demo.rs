//! Connect to MySQL using layered configuration and print pool statistics
//!
//! Reads `config.<environment>.toml` (optional), `CP__*` overrides and `.env`.
//! Run with: cargo run -p cp_infra --example connect_demo

use anyhow::Context;

use cp_infra::database::MySqlConnectionProvider;
use cp_infra::ConnectionProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // Load .env file if present

    let config = cp_shared::config::load(None).context("loading configuration")?;
    cp_shared::init_tracing(&config.logging).context("initializing logging")?;

    tracing::info!(
        environment = %config.environment,
        endpoint = %config.database.endpoint(),
        database = %config.database.database,
        "Starting connect demo"
    );

    let provider = MySqlConnectionProvider::new();
    let key = provider.provider_key(&config.database);
    tracing::info!(key = %key.redacted(), "Resolved provider key");

    let outcome = provider.connect(&config.database).await;
    if let Some(error) = outcome.error() {
        tracing::error!("Could not connect: {}", error);
    }
    let pool = outcome.into_result().context("connecting to MySQL")?;

    println!("Healthy: {}", pool.health_check().await?);
    println!("{}", pool.get_statistics()?);

    pool.close().await;
    Ok(())
}
