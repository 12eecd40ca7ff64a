//! CLI entrypoint for genpool
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then runs the HTTP API and the demand scheduler
//! until Ctrl-C.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use genpool_application::{
    ActivityLogger, DemandSchedulerUseCase, GenerationStore, ListGenerationsUseCase,
    NoActivityLogger, PromptCatalogSource, SnapshotStorage, SubmitRatingUseCase,
};
use genpool_infrastructure::{
    ConfigLoader, FileConfig, FilePromptCatalogSource, HttpTextGenerator, InMemorySnapshotStorage,
    JsonFileSnapshotStorage, JsonlActivityLogger,
};
use genpool_presentation::{ApiOptions, AppState, Cli, create_router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let (writer, _log_guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer)
        .init();

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&cli, &mut config);

    if cli.show_config {
        for line in ConfigLoader::config_sources() {
            println!("{}", line);
        }
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    check_config(&config)?;

    info!("Starting genpool");

    // === Dependency Injection ===
    let storage: Arc<dyn SnapshotStorage> = if config.storage.ephemeral {
        info!("Ephemeral mode: generations are kept in memory only");
        Arc::new(InMemorySnapshotStorage::new())
    } else {
        Arc::new(JsonFileSnapshotStorage::new(&config.storage.path))
    };
    let store = Arc::new(
        GenerationStore::open(storage)
            .await
            .context("Failed to load stored generations")?,
    );

    let activity: Arc<dyn ActivityLogger> = match &config.logging.verdict_log {
        Some(path) => match JsonlActivityLogger::open(path) {
            Some(logger) => {
                info!("Activity log: {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoActivityLogger),
        },
        None => Arc::new(NoActivityLogger),
    };

    // Records loaded past the current threshold must not stay evaluating
    let ratings = SubmitRatingUseCase::new(store.clone(), config.promotion.to_rule())
        .with_activity_logger(activity.clone());
    ratings
        .reconcile()
        .await
        .context("Failed to settle stored generations")?;

    let cancel = CancellationToken::new();
    let scheduler = spawn_scheduler(&config, store.clone(), activity, cancel.clone()).await?;

    let state = AppState::new(ratings, ListGenerationsUseCase::new(store.clone()));
    let router = create_router(
        state,
        ApiOptions {
            rate_limit_per_minute: config.server.rate_limit_per_minute,
        },
    );

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    println!("genpool listening on http://{}", listener.local_addr()?);
    println!("  POST /generation/            submit a rating");
    println!("  GET  /generation/evaluating  generations awaiting raters");
    println!("  GET  /generation/finalized   accepted generations");
    println!("  GET  /health");
    println!("Press Ctrl-C to stop.");

    let served = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(cancel.clone()))
    .await;

    cancel.cancel();
    if let Some(handle) = scheduler
        && let Err(e) = handle.await
    {
        warn!("Scheduler task ended abnormally: {}", e);
    }

    if let Err(e) = store.persist().await {
        warn!("Final persist failed: {}", e);
    }

    served.context("HTTP server failed")?;
    info!("genpool stopped");
    Ok(())
}

/// Command-line flags take precedence over every config source
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(ip) = &cli.ip {
        config.server.ip = ip.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.no_scheduler {
        config.scheduler.enabled = false;
    }
    if cli.ephemeral {
        config.storage.ephemeral = true;
    }
}

/// Log warnings; refuse to start on errors
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("Config: {}", issue);
    }

    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(ToString::to_string)
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }
    Ok(())
}

/// Start the demand scheduler when enabled; a catalog that cannot be loaded is fatal
async fn spawn_scheduler(
    config: &FileConfig,
    store: Arc<GenerationStore>,
    activity: Arc<dyn ActivityLogger>,
    cancel: CancellationToken,
) -> Result<Option<JoinHandle<()>>> {
    if !config.scheduler.enabled {
        info!("Demand scheduler disabled");
        return Ok(None);
    }

    let catalog = FilePromptCatalogSource::new(&config.catalog.path)
        .load_catalog()
        .await
        .context("Failed to load prompt catalog")?;
    if catalog.is_empty() {
        warn!("Prompt catalog is empty; the scheduler will never request generations");
    }

    let generator = Arc::new(
        HttpTextGenerator::new(&config.generator.endpoint, config.generator.max_length)
            .with_api_key(config.generator.api_key()),
    );
    let scheduler =
        DemandSchedulerUseCase::new(store, generator, catalog, config.scheduler.to_params())
            .with_activity_logger(activity);

    Ok(Some(tokio::spawn(async move {
        scheduler.run(cancel).await;
    })))
}

/// Resolves on Ctrl-C, or when something else cancelled the token
async fn shutdown_signal(cancel: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Shutdown requested"),
            Err(e) => {
                warn!("Could not listen for Ctrl-C: {}", e);
                cancel.cancelled().await;
            }
        },
        _ = cancel.cancelled() => {}
    }
    cancel.cancel();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["genpool", "-i", "0.0.0.0", "-p", "9001", "--no-scheduler"]);
        let mut config = FileConfig::default();

        apply_cli_overrides(&cli, &mut config);

        assert_eq!(config.server.bind_address(), "0.0.0.0:9001");
        assert!(!config.scheduler.enabled);
        assert!(!config.storage.ephemeral);
    }

    #[test]
    fn test_check_config_rejects_errors() {
        let mut config = FileConfig::default();
        assert!(check_config(&config).is_ok());

        config.promotion.threshold = 0;
        let err = check_config(&config).unwrap_err().to_string();
        assert!(err.contains("promotion.threshold"));
    }
}
