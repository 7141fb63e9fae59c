use tracing_subscriber::EnvFilter;

use freight_quotes::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("freight_quotes=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().inspect_err(|e| tracing::error!("{}", e))?;
    freight_quotes::serve(config).await?;
    Ok(())
}
