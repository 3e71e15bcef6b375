use std::sync::Arc;

use cp_live::audit::AuditSink;
use cp_live::config::AppConfig;
use cp_live::database::{self, SqliteAuditLog, SqliteSettingsStore};
use cp_live::logging;
use cp_live::notification::ServiceEventBroadcaster;
use cp_live::registry::ServiceRegistry;
use cp_live::scheduler::Scheduler;
use cp_live::service::ServiceCore;
use cp_live::services::youtube::{self, YouTubeService};
use cp_live::utils::http_client::{ReqwestFetcher, build_client};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let _log_guard = logging::init_logging(config.log_dir.as_deref())?;

    let pool = database::init_pool(&config.database_url).await?;
    database::run_migrations(&pool).await?;

    let store = Arc::new(SqliteSettingsStore::new(pool.clone()));
    let audit: Arc<dyn AuditSink> = Arc::new(SqliteAuditLog::new(pool.clone()));
    let events = ServiceEventBroadcaster::new();
    let fetcher = Arc::new(ReqwestFetcher::new(build_client(config.http_timeout)?));

    let core = ServiceCore::new(youtube::SERVICE_ID, store, events.clone())
        .with_live_duration(config.live_duration);

    let mut registry = ServiceRegistry::new();
    registry.register(Arc::new(YouTubeService::new(core, fetcher, audit)))?;

    let mut event_rx = events.subscribe();
    tokio::spawn(async move {
        loop {
            match event_rx.recv().await {
                Ok(event) => info!(event = event.name(), "{}", event.description()),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Service event listener lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown requested");
                shutdown.cancel();
            }
            Err(error) => warn!(error = %error, "Failed to listen for shutdown signal"),
        }
    });

    info!(database_url = %config.database_url, "cp-live initialized successfully");
    Scheduler::new(Arc::new(registry), config.check_interval)
        .run(cancel)
        .await;

    pool.close().await;
    Ok(())
}
