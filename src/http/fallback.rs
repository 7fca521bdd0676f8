//! Default fallback handler.
//!
//! Answers every path and method with `works`, so anything the redirect
//! tables do not claim still gets a response.

use axum::Router;

/// Build the fallback router used when no redirect matches.
pub fn default_mux() -> Router {
    Router::new().fallback(works)
}

async fn works() -> &'static str {
    "works"
}
