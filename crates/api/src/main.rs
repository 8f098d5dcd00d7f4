use std::net::SocketAddr;
use std::sync::Arc;

use ambiental_db::memory::MemoryTableStore;
use ambiental_db::pg::PgTableStore;
use ambiental_db::repositories::ProfileRepo;
use ambiental_db::rest::RestTableStore;
use ambiental_db::store::TableStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ambiental_api::auth::provider::build_provider;
use ambiental_api::config::{ServerConfig, StoreBackend};
use ambiental_api::router::build_app_router;
use ambiental_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ambiental_api=debug,ambiental_db=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = config.store.name(),
        auth_provider = ?config.auth_provider,
        "Loaded server configuration"
    );

    // --- Store ---
    let store = connect_store(&config.store).await;

    // --- Auth provider ---
    let auth = build_provider(
        config.auth_provider,
        &config.static_users,
        ProfileRepo::new(Arc::clone(&store)),
    )
    .unwrap_or_else(|e| panic!("Invalid auth configuration: {e}"));
    tracing::info!(provider = auth.name(), "Auth provider ready");

    // --- Router ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let app = build_app_router(AppState::new(config, store, auth));

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Build the configured [`TableStore`], failing fast when it is unusable.
async fn connect_store(backend: &StoreBackend) -> Arc<dyn TableStore> {
    match backend {
        StoreBackend::Rest { url, api_key } => {
            let store = RestTableStore::new(url.as_str(), api_key.as_str());
            if let Err(e) = store.health_check().await {
                tracing::warn!(error = %e, %url, "Data backend not reachable at startup");
            }
            tracing::info!(%url, "Using REST table store");
            Arc::new(store)
        }
        StoreBackend::Postgres { database_url } => {
            let pool = ambiental_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            ambiental_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            ambiental_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgTableStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory table store; data is lost on restart");
            Arc::new(MemoryTableStore::new())
        }
    }
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
