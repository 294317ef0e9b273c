//! hr-server: HR employee-master service
//!
//! Serves registration with HR approval, JWT login, and role-gated CRUD
//! for departments, designations, companies and employees.

use std::net::SocketAddr;

use hr_server::{AppState, Config, Stores, approval, build_app, seed};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hr_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting hr-server (env: {})", config.environment);

    let stores = match &config.database_url {
        Some(url) => {
            let stores = Stores::postgres(url).await?;
            tracing::info!("PostgreSQL store ready");
            stores
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store (data is lost on exit)");
            Stores::memory()
        }
    };

    if config.seed_reference_data {
        seed::seed_reference_data(&stores)
            .await
            .map_err(|e| format!("seeding failed: {}", shared::error::AppError::from(e)))?;
    }

    if let Some((email, password)) = &config.bootstrap_admin {
        let created = approval::bootstrap_admin(stores.accounts.as_ref(), email, password)
            .await
            .map_err(|e| format!("bootstrap admin failed: {}", shared::error::AppError::from(e)))?;
        if !created {
            tracing::info!("Bootstrap admin already registered");
        }
    }

    let http_port = config.http_port;
    let state = AppState::new(stores, config);

    // Periodic rate limiter cleanup (every 5 minutes)
    let rate_limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            rate_limiter.cleanup().await;
        }
    });

    let app = build_app(state);

    let http_addr = format!("0.0.0.0:{http_port}");
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("hr-server HTTP listening on {http_addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("hr-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
