//! Orders service entry-point: loads configuration, prepares storage, starts
//! the notification relay and serves the REST API until SIGINT or SIGTERM.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use orders::domain::{NotificationRelay, ShutdownCoordinator};
use orders::inbound::http::health::HealthState;
use orders::outbound::notification::TracingOrderNotifier;
use orders::outbound::persistence::{DbPool, run_pending_migrations};
use orders::settings::OrdersSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = OrdersSettings::load_from_iter(std::env::args_os())
        .map_err(|e| eyre!("failed to load settings: {e}"))?;

    if settings.run_migrations() {
        let applied = run_pending_migrations(settings.database_url())
            .await
            .wrap_err("database migrations failed")?;
        info!(applied, "database schema up to date");
    }

    let pool = DbPool::new(settings.pool_config())
        .await
        .wrap_err("failed to build database pool")?;
    pool.ping().await.wrap_err("database is unreachable")?;

    let coordinator = ShutdownCoordinator::new();
    let (relay, relay_handle) =
        NotificationRelay::new(settings.relay_config(), Arc::new(TracingOrderNotifier));
    let relay_task = relay.spawn(coordinator.signal());

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(settings.bind_addr(), relay_handle)
        .with_db_pool(pool)
        .with_shutdown_timeout(settings.shutdown_timeout());
    let server = create_server(health_state.clone(), config)?;
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);
    info!(addr = %settings.bind_addr(), "orders service listening");

    wait_for_signal().await?;
    info!("shutdown signal received");

    health_state.mark_unhealthy();
    server_handle.stop(true).await;
    coordinator.trigger();

    match relay_task.await {
        Ok(state) => info!(?state, "notification relay finished"),
        Err(e) => warn!(error = %e, "notification relay task failed"),
    }
    server_task
        .await
        .wrap_err("server task panicked")?
        .wrap_err("server stopped with an error")?;
    info!("orders service stopped");
    Ok(())
}

/// Resolve once SIGINT or, on Unix, SIGTERM arrives.
async fn wait_for_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = sigterm.recv() => Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}
