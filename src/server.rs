use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use log::info;
use thiserror::Error;
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::{is_origin_allowed, ServerConfig};
use crate::libarena::service::ServiceError;
use crate::routes::{check_handler, create_handler, list_handler, random_handler};
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("cannot open question bank: {0}")]
    Bank(#[from] ServiceError),
    #[error("cannot bind {address}: {source}")]
    Bind { address: String, source: io::Error },
    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allowed = allowed_origins.to_vec();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &axum::http::request::Parts| {
                origin
                    .to_str()
                    .map(|origin| is_origin_allowed(origin, &allowed))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/questions", get(list_handler).post(create_handler))
        .route("/questions/random", get(random_handler))
        .route("/questions/check", post(check_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("[Server] Initializing state...");
    let state = AppState::new(config)?;

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("[Server] Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    info!("[Server] Running on port {}", state.config.port);

    serve(listener, state, shutdown_signal()).await?;

    info!("[Server] Shut down");
    Ok(())
}

pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if ctrl_c().await.is_ok() {
            info!("[Server] Received Ctrl+C, shutting down");
        } else {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("[Server] Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
