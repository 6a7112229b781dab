//! Account Service
//!
//! Registers accounts, authenticates them by email and password, and
//! serves the caller's profile to holders of a valid bearer token.
//!
//! ## Architecture
//!
//! - Routes: HTTP request handling, body extraction, auth middleware
//! - Services: registration and login orchestration
//! - Repositories: PostgreSQL or in-memory account store
//! - Auth: Argon2id hashing and HMAC-signed JWTs

use account_service::{
    config::{self, StoreKind},
    db,
    repositories::{AccountRepository, InMemoryAccountRepository, PgAccountRepository},
    routes,
    state::AppState,
};
use anyhow::Result;
use secrecy::ExposeSecret;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Minimum accepted JWT secret length in production
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        store = ?config.database.store,
        "Starting Account Service"
    );

    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    let accounts = connect_store(&config.database).await?;

    let state = AppState::new(accounts, config.clone())?;
    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Build the configured account store
async fn connect_store(config: &config::DatabaseConfig) -> Result<Arc<dyn AccountRepository>> {
    let store: Arc<dyn AccountRepository> = match config.store {
        StoreKind::Postgres => {
            info!("Connecting to database...");
            let pool = db::create_pool(config).await?;

            if config.run_migrations {
                db::run_migrations(&pool).await?;
            }

            Arc::new(PgAccountRepository::new(pool))
        }
        StoreKind::Memory => {
            warn!("Using in-memory account store; accounts are lost on restart");
            Arc::new(InMemoryAccountRepository::new())
        }
    };

    Ok(store)
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "account_service=info,tower_http=info".into()
        } else {
            "account_service=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    let secret = config.jwt.secret.expose_secret();
    if secret == config::DEVELOPMENT_JWT_SECRET || secret.len() < MIN_PRODUCTION_SECRET_LEN {
        errors.push("JWT secret must be at least 32 characters and not the development default");
    }

    if config.database.store == StoreKind::Memory {
        errors.push("The in-memory account store cannot be used in production");
    }

    if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
        warn!("Database URL contains localhost - ensure this is intentional for production");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
