//! Application startup and lifecycle management.

use crate::config::PersonConfig;
use crate::handlers;
use crate::services::PersonDb;
use axum::{routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::tracing::with_request_tracing;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;

#[derive(Clone)]
pub struct AppState {
    pub db: PersonDb,
}

/// Builds the HTTP router over an already connected state.
pub fn build_router(state: AppState) -> Router {
    let router: Router<AppState> = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route(
            "/person",
            get(handlers::list_persons).post(handlers::create_person),
        )
        // `/person/` lists too, like `/person`
        .route(
            "/person/",
            get(handlers::list_persons).post(handlers::create_person),
        )
        .route(
            "/person/:id",
            get(handlers::get_person)
                .put(handlers::update_person)
                .delete(handlers::delete_person),
        );

    with_request_tracing(router).with_state(state)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    db: PersonDb,
}

impl Application {
    pub async fn build(config: PersonConfig) -> Result<Self, AppError> {
        let db = PersonDb::connect(&config.mongodb).await?;

        // Fail fast when the primary is unreachable
        db.health_check().await.map_err(|e| {
            tracing::error!("MongoDB is not reachable at {}: {}", config.mongodb.uri, e);
            e
        })?;

        let state = AppState { db: db.clone() };
        let router = build_router(state);

        // Port 0 picks a random port, used by tests
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router,
            db,
        })
    }

    pub fn db(&self) -> &PersonDb {
        &self.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serves until Ctrl+C or SIGTERM, drains in-flight requests, then closes
    /// the database pool.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("Person service listening on port {}", self.port);

        let result = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        if let Err(e) = &result {
            tracing::error!("HTTP server error: {}", e);
        }

        self.db.shutdown().await;
        result
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
