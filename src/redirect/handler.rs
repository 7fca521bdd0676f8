//! Redirect handler composition.
//!
//! # Responsibilities
//! - Wrap a fallback service with a path table lookup
//! - Answer matched paths with `308 Permanent Redirect`
//! - Delegate everything else to the fallback untouched
//!
//! # Design Decisions
//! - The table lives behind an `Arc`, so clones share it without locking
//! - Construction cannot fail; only table building can
//! - Readiness is delegated to the fallback

use std::convert::Infallible;
use std::future::{ready, Ready};
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::Either;
use tower::{Layer, Service};

use super::table::PathTable;

/// Build a handler that redirects paths found in `table` and hands every
/// other request to `fallback`.
pub fn map_handler<S>(table: PathTable, fallback: S) -> RedirectService<S> {
    RedirectService::new(table, fallback)
}

/// Redirect-or-delegate decorator around a fallback service.
#[derive(Debug, Clone)]
pub struct RedirectService<S> {
    table: Arc<PathTable>,
    fallback: S,
}

impl<S> RedirectService<S> {
    pub fn new(table: PathTable, fallback: S) -> Self {
        Self {
            table: Arc::new(table),
            fallback,
        }
    }

    /// The table consulted before delegating.
    pub fn table(&self) -> &PathTable {
        &self.table
    }
}

impl<S> Service<Request> for RedirectService<S>
where
    S: Service<Request, Response = Response, Error = Infallible>,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Either<Ready<Result<Response, Infallible>>, S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.fallback.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let redirect = self
            .table
            .get(req.uri().path())
            .map(permanent_redirect);

        match redirect {
            Some(response) => Either::Left(ready(Ok(response))),
            None => Either::Right(self.fallback.call(req)),
        }
    }
}

fn permanent_redirect(url: &str) -> Response {
    match HeaderValue::from_str(url) {
        Ok(location) => (StatusCode::PERMANENT_REDIRECT, [(header::LOCATION, location)]).into_response(),
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Redirect target is not a valid Location header");
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect target").into_response()
        }
    }
}

/// [`RedirectService`] as a tower layer, for stacking with `ServiceBuilder`.
#[derive(Debug, Clone)]
pub struct RedirectLayer {
    table: Arc<PathTable>,
}

impl RedirectLayer {
    pub fn new(table: PathTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}

impl<S> Layer<S> for RedirectLayer {
    type Service = RedirectService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RedirectService {
            table: Arc::clone(&self.table),
            fallback: inner,
        }
    }
}
