pub mod api;
pub mod config;
pub mod pipeline;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::ServerError;
use crate::config::{AnalyzerConfig, ConfigError};
use crate::pipeline::classify::ClassifierModels;
use crate::pipeline::extraction::{DocumentExtractor, PdfTextExtractor};
use crate::pipeline::ingest::{cleanup_orphaned_staging, IngestionGate, UploadRateLimiter};
use crate::pipeline::processor::AnalysisPipeline;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(#[source] std::io::Error),
}

/// Assemble the pipeline from the environment and serve until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AnalyzerConfig::from_env()?;
    tracing::info!(
        strategy = %config.segmentation.strategy(),
        group_size = config.segmentation.group_size(),
        rate_limit = config.rate_limit,
        rate_window_secs = config.rate_window.as_secs(),
        max_upload_bytes = config.max_upload_bytes,
        "Configuration loaded"
    );

    // Staged uploads left behind by a crashed process.
    cleanup_orphaned_staging(&std::env::temp_dir());

    let models = ClassifierModels::load();
    let gate = IngestionGate::new(
        Arc::new(UploadRateLimiter::new(config.rate_limit, config.rate_window)),
        config.max_upload_bytes,
    );
    let pipeline = AnalysisPipeline::new(
        gate,
        Arc::new(DocumentExtractor::new(Box::new(PdfTextExtractor))),
        &models,
        config.classifier_timeout,
    )
    .with_segmentation(config.segmentation)
    .with_limits(config.run_limits());

    let mut server = api::start_api_server(Arc::new(pipeline), config.bind).await?;

    tokio::signal::ctrl_c().await.map_err(StartupError::Signal)?;
    tracing::info!("Shutdown requested");
    server.shutdown();
    server.stopped().await;

    Ok(())
}
