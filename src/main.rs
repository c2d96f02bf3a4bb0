use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use userstore::config::Settings;
use userstore::store::{PgUserStore, UserStore};
use userstore::{create_app, db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up RUST_LOG from .env as well
    dotenv::dotenv().ok();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("userstore=info,tower_http=debug")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("🚀 Starting userstore");

    // Load configuration
    let settings = Settings::load().context("Failed to load application settings")?;

    info!(
        "🔗 Connecting to database {} on {}:{}",
        settings.database.database_name, settings.database.host, settings.database.port
    );

    let pool = db::create_pool(&settings.database).await?;
    db::run_migrations(&pool).await?;

    let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));

    let app_state = AppState {
        store,
        config: settings.clone(),
    };

    let app = create_app(app_state).await;

    let listener = tokio::net::TcpListener::bind(settings.server.address())
        .await
        .context("Failed to bind to server address")?;

    info!(
        "🌐 Server listening on {} (API prefix {})",
        settings.server.address(),
        settings.server.api_prefix
    );

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("👋 Shutdown completed");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("🛑 Received terminate signal, starting graceful shutdown");
        },
    }
}
