//! Server initialization and startup logic for probewatch.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use probewatch_api::ApiServer;
use probewatch_config::{Config, ConfigLoader, LoggingConfig};
use probewatch_core::{JobStore, MemoryJobStore};
use probewatch_worker::HttpFetcher;

/// Initialize tracing with console output and, when `logging.dir` is set,
/// a daily rotating log file.
///
/// `RUST_LOG` takes precedence over `logging.level`.
pub(crate) fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match &config.dir {
        Some(dir) => {
            let log_dir = PathBuf::from(ConfigLoader::expand_path(&dir.to_string_lossy()));
            std::fs::create_dir_all(&log_dir)?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("probewatch")
                .filename_suffix("log")
                .max_log_files(30)
                .build(&log_dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The guard flushes buffered lines on drop; keep it for the whole run.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .init();

    Ok(())
}

/// Run the server in foreground until Ctrl-C.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting probewatch v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn JobStore> = Arc::new(MemoryJobStore::new());
    let fetcher = Arc::new(HttpFetcher::from_config(store.clone(), &config.probe)?);
    info!(
        "Probe timeout {:?}, user agent '{}'",
        config.probe.timeout(),
        config.probe.user_agent
    );

    let server = ApiServer::new(config.server, store, fetcher);
    info!("Listening on http://{}", server.addr());

    server.run(shutdown_signal()).await?;

    info!("probewatch stopped");
    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolves when `signal` fires. Never resolves if the signal handler could
/// not be installed, so the server keeps running.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => {
            error!("Failed to listen for Ctrl-C, graceful shutdown disabled: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
