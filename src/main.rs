//! Travel Desk server binary.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use travel_desk::adapters::{
    api_router, spawn_expiry_sweeper, ChatAppState, InMemorySessionStore, PostgresSessionStore,
    RedisSessionStore,
};
use travel_desk::config::{AppConfig, ServerConfig, SessionBackend};
use travel_desk::ports::SessionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ttl = config.session.ttl();

    let (store, needs_sweeper): (Arc<dyn SessionStore>, bool) = match config.session.backend {
        SessionBackend::Memory => (Arc::new(InMemorySessionStore::with_ttl(ttl)), true),
        SessionBackend::Redis => {
            let redis = config
                .redis
                .as_ref()
                .ok_or("redis backend selected without redis configuration")?;
            let store = tokio::time::timeout(
                redis.timeout(),
                RedisSessionStore::connect(&redis.url, ttl.as_secs()),
            )
            .await
            .map_err(|_| "timed out connecting to redis")??;
            (Arc::new(store), false)
        }
        SessionBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or("postgres backend selected without database configuration")?;
            let pool = database.connect().await?;
            let store = PostgresSessionStore::new(pool, ttl.as_secs());
            if database.run_migrations {
                store.migrate().await?;
            }
            (Arc::new(store), true)
        }
    };

    tracing::info!(
        backend = ?config.session.backend,
        ttl_secs = ttl.as_secs(),
        "Session store ready"
    );

    let sweeper = needs_sweeper.then(|| {
        spawn_expiry_sweeper(store.clone(), config.session.sweep_interval(), shutdown_rx)
    });

    let state = ChatAppState::new(store, config.conversation.rules());
    let app = api_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Travel Desk listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if shutdown_tx.send(true).is_err() {
        tracing::debug!("No session sweeper running");
    }
    if let Some(handle) = sweeper {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Session sweeper task failed");
        }
    }
    tracing::info!("Travel Desk stopped");

    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if server.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
