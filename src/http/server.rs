//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Install the composed redirect chain as the single entry point
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Stop gracefully on Ctrl+C or an internal shutdown broadcast

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::Service;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ShortenerConfig;
use crate::http::request::{request_id, UuidRequestId};
use crate::lifecycle::signals::shutdown_signal;

/// HTTP server for the redirect service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server that sends every request to `entry`.
    pub fn new<S>(config: ShortenerConfig, entry: S) -> Self
    where
        S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + Sync + 'static,
        S::Future: Send + 'static,
    {
        let router = Self::build_router(&config, entry);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router<S>(config: &ShortenerConfig, entry: S) -> Router
    where
        S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + Sync + 'static,
        S::Future: Send + 'static,
    {
        Router::new()
            .fallback_service(entry)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(request),
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The fully layered router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// Ctrl+C or a message on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
