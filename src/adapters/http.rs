//! Local HTTP host for the responder.
//!
//! There are no routes: a single fallback handler answers every method and
//! path with the responder's page.

use crate::core::responder::Responder;
use crate::domain::ports::RequestInfo;
use crate::utils::error::{Result, SketchError};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct AppState {
    responder: Arc<Responder>,
    // 只在建立 router 時複製一次，之後每個回應共用同一塊記憶體
    body: Bytes,
}

impl AppState {
    fn new(responder: Arc<Responder>) -> Self {
        let body = Bytes::from(responder.body().to_owned());
        Self { responder, body }
    }
}

/// Create the router. Every request reaches [`serve_sketch`].
pub fn create_router(responder: Arc<Responder>) -> Router {
    Router::new()
        .fallback(serve_sketch)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(responder))
}

async fn serve_sketch(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let sketch = state
        .responder
        .respond(RequestInfo::new(method.as_str(), uri.path()));
    let status = StatusCode::from_u16(sketch.status).unwrap_or(StatusCode::OK);

    (
        status,
        [(header::CONTENT_TYPE, sketch.content_type)],
        state.body.clone(),
    )
        .into_response()
}

/// Bind `host:port` and serve until Ctrl-C.
pub async fn serve(responder: Arc<Responder>, host: &str, port: u16) -> Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .map_err(|e| SketchError::ServerError {
            message: format!("failed to bind {}:{}: {}", host, port, e),
        })?;

    serve_on(listener, responder, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, responder: Arc<Responder>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(
        "🚀 Serving '{}' at http://{}",
        responder.variant_name(),
        addr
    );

    let app = create_router(responder);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| SketchError::ServerError {
            message: e.to_string(),
        })?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
