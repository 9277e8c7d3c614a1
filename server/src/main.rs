//! Student registry server: reads settings, prepares the store, serves the JSON API.
//!
//! Run from repo root: `cargo run -p student-registry-server`
//! Without PostgreSQL: `STORE_BACKEND=memory SEED_FIXTURES=true cargo run -p student-registry-server`

use std::sync::Arc;
use student_registry::{
    app, ensure_database_exists, ensure_students_table, seed_fixtures, AppState, MemoryStudentStore,
    PgStudentStore, Settings, StoreBackend, StudentService, StudentStore,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("student_registry=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store = build_store(&settings).await?;
    if settings.seed_fixtures {
        seed_fixtures(store.as_ref()).await?;
    }

    let state = AppState::new(StudentService::new(store));
    let router = app(state, &settings);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(backend = ?settings.backend, "listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn build_store(settings: &Settings) -> Result<Arc<dyn StudentStore>, Box<dyn std::error::Error>> {
    match settings.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStudentStore::new())),
        StoreBackend::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.database_url)
                .await?;
            let store = PgStudentStore::new(pool, &settings.schema);
            ensure_students_table(store.pool(), store.table()).await?;
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down");
}
