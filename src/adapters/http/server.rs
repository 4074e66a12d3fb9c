//! Router assembly and the serving loop.

use axum::routing::{get, post, put};
use axum::Router;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::state::AppState;
use super::{cats, missions};
use crate::domain::models::ServerConfig;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address {0}")]
    InvalidAddress(String),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the full agency router.
pub fn build_router(state: AppState, enable_cors: bool) -> Router {
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/cats", post(cats::create_cat).get(cats::list_cats))
        .route(
            "/cats/{id}",
            get(cats::get_cat).put(cats::update_cat).delete(cats::delete_cat),
        )
        .route("/missions", post(missions::create_mission).get(missions::list_missions))
        .route(
            "/missions/{id}",
            get(missions::get_mission).delete(missions::delete_mission),
        )
        .route(
            "/missions/{id}/assign/{cat_id}",
            put(missions::assign_mission).post(missions::assign_mission),
        )
        .route("/missions/{id}/complete", post(missions::complete_mission))
        .route("/missions/{id}/targets", post(missions::add_target))
        .route(
            "/missions/{id}/targets/{target_id}",
            post(missions::update_target)
                .put(missions::update_target)
                .delete(missions::delete_target),
        )
        .route(
            "/missions/{id}/targets/{target_id}/complete",
            post(missions::complete_target).put(missions::complete_target),
        )
        .with_state(state);

    if enable_cors {
        app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .layer(TraceLayer::new_for_http())
    } else {
        app.layer(TraceLayer::new_for_http())
    }
}

async fn health_check() -> &'static str {
    "OK"
}

pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub fn addr(&self) -> Result<SocketAddr, ServerError> {
        let raw = format!("{}:{}", self.config.host, self.config.port);
        raw.parse().map_err(|_| ServerError::InvalidAddress(raw))
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.addr()?).await?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener.
    ///
    /// Once `shutdown` resolves the listener stops accepting, and in-flight
    /// requests get `shutdown_grace_secs` to finish before they are dropped.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let grace = Duration::from_secs(self.config.shutdown_grace_secs);
        let router = build_router(self.state, self.config.enable_cors);

        info!(addr = ?listener.local_addr()?, "Spy cat agency listening");

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let serving = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                let _ = stop_tx.send(true);
            })
            .into_future();
        tokio::pin!(serving);

        tokio::select! {
            biased;
            result = &mut serving => return result.map_err(ServerError::from),
            _ = stop_rx.changed() => {}
        }

        info!(grace_secs = grace.as_secs(), "Shutdown started, draining in-flight requests");
        match tokio::time::timeout(grace, serving).await {
            Ok(result) => {
                info!("Server stopped");
                result.map_err(ServerError::from)
            }
            Err(_) => {
                warn!("Grace period elapsed, dropping remaining connections");
                Ok(())
            }
        }
    }
}
