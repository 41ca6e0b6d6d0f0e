//! Onix Mapper - command line front end
//!
//! Maps one product from a catalog snapshot and prints every normalized
//! value as JSON.
//!
//! Usage: `onix-mapper <snapshot.json> <product-number>`

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use onix_mapper::{
    config::AppConfig,
    services::{
        backend::KeywordSearch,
        finna::FinnaClient,
        oauth::OAuthClient,
        product,
        snapshot::SnapshotBackend,
        token::{self, StaticTokenProvider, TokenProvider},
        Services,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("onix_mapper={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting Onix Mapper v{}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let (Some(snapshot_path), Some(number)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: onix-mapper <snapshot.json> <product-number>");
    };

    let snapshot = Arc::new(SnapshotBackend::from_file(&snapshot_path).await?);

    let keywords: Arc<dyn KeywordSearch> = if config.keyword_search.enabled {
        Arc::new(FinnaClient::new(config.keyword_search.clone())?)
    } else {
        snapshot.clone()
    };

    let token_provider: Arc<dyn TokenProvider> = if config.oauth.client_secret.is_empty() {
        Arc::new(StaticTokenProvider("snapshot".to_string()))
    } else {
        Arc::new(OAuthClient::new(config.oauth.clone())?)
    };
    let tokens = token::cache_from_config(&config.token_cache).await?;

    let services = Services::new(
        &config,
        snapshot.clone(),
        snapshot,
        keywords,
        Arc::from(tokens),
        token_provider,
    );

    let product = services.open_product(&number).await.map_err(|e| {
        tracing::error!(number = %number, code = e.code() as u32, "{}", e);
        e
    })?;

    let today = chrono::Local::now().date_naive();
    let report = product::report(product.as_ref(), today).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
