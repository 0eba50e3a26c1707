use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lectern_worker::backup::{BackupConfig, BackupRunner};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lectern_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = lectern_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    lectern_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database connection established");

    let config = BackupConfig::from_env();
    let runner = BackupRunner::new(pool, config);

    let cancel = tokio_util::sync::CancellationToken::new();
    let runner_cancel = cancel.clone();
    let handle = tokio::spawn(async move {
        runner.run(runner_cancel).await;
    });

    shutdown_signal().await;

    cancel.cancel();
    let _ = tokio::time::timeout(std::time::Duration::from_secs(10), handle).await;
    tracing::info!("Backup worker shut down");
}

/// Wait for SIGINT or SIGTERM.
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
            tracing::info!("Received SIGINT (Ctrl-C), shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
