//! HTTP API Module
//!
//! Serves the visitor form front-end and a JSON API over the visitor service.
//!
//! | Method | Path | |
//! |--------|------|-|
//! | GET | `/new_visitor` | visitor form (`index.html`) |
//! | POST | `/submit-form` | record a visitor from the form |
//! | GET | `/health` | health probe |
//! | POST | `/api/table` | create the visitors table |
//! | GET, POST, DELETE | `/api/visitors` | list / add / delete all |
//! | GET | `/api/visitors/last` | most recent visitor id |
//! | GET, PATCH, DELETE | `/api/visitors/:id` | view / update one column / delete |

pub mod dto;
pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::HttpConfig;
use crate::service::VisitorService;

use self::handlers::{admin, form, visitors};

/// Shared state handed to every handler.
pub struct AppState {
    pub service: VisitorService,
    started: Instant,
}

impl AppState {
    pub fn new(service: VisitorService) -> Self {
        Self {
            service,
            started: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

/// Creates the Axum router
pub fn create_router(state: Arc<AppState>, config: &HttpConfig) -> Router {
    let static_dir = &config.static_dir;
    let index_file = format!("{static_dir}/index.html");

    let api = Router::new()
        .route("/table", post(visitors::create_table))
        .route(
            "/visitors",
            get(visitors::list_visitors)
                .post(visitors::add_visitor)
                .delete(visitors::delete_all_visitors),
        )
        .route("/visitors/last", get(visitors::view_last_visitor))
        .route(
            "/visitors/:id",
            get(visitors::view_visitor)
                .patch(visitors::update_visitor)
                .delete(visitors::delete_visitor),
        );

    Router::new()
        .route("/health", get(admin::health))
        .route_service("/new_visitor", ServeFile::new(index_file))
        .route("/submit-form", post(form::submit_form))
        .nest("/api", api)
        .fallback_service(ServeDir::new(static_dir))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

/// Starts the HTTP server with graceful shutdown support.
///
/// Listens for SIGINT (ctrl-c) and SIGTERM to trigger graceful shutdown.
pub async fn start_http_server(
    state: Arc<AppState>,
    config: &HttpConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state, config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, "http_listening");
    println!("app is live on port: http://{addr}/new_visitor");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("http_stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => { tracing::info!("received SIGINT, shutting down"); }
            _ = sigterm.recv() => { tracing::info!("received SIGTERM, shutting down"); }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.expect("failed to listen for ctrl-c");
        tracing::info!("received SIGINT, shutting down");
    }
}
