mod cli;

use crate::cli::{LogFormatArg, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use stubby_core::MappingStore;
use stubby_gateway::{App, AppState};
use stubby_generator::RandomGenerator;
use stubby_shortener::ShortenerService;
use stubby_storage::{CachedStore, InMemoryStore, MySqlStore};
use tracing::info;
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    init_tracing(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        public_base_url = %config.public_base_url,
        storage_backend = %config.storage,
        "starting stubby gateway"
    );

    match config.storage {
        StorageBackendArg::InMemory => run_server(&config, InMemoryStore::new()).await,
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let store = MySqlStore::connect(mysql_dsn).await?;
            store.ensure_schema().await?;

            if config.cache_capacity == 0 {
                run_server(&config, store).await
            } else {
                run_server(&config, CachedStore::with_capacity(store, config.cache_capacity)).await
            }
        }
    }
}

fn init_tracing(format: LogFormatArg) -> anyhow::Result<()> {
    LogTracer::init()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormatArg::Text => tracing::subscriber::set_global_default(registry.with(fmt::layer()))?,
        LogFormatArg::Json => {
            tracing::subscriber::set_global_default(registry.with(fmt::layer().json()))?
        }
    }

    Ok(())
}

async fn run_server<S: MappingStore>(config: &CLI, store: S) -> anyhow::Result<()> {
    let service = ShortenerService::with_policy(store, RandomGenerator::new(), config.retry_policy())?;
    let state = AppState::new(Arc::new(service), config.public_base_url.clone());

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
