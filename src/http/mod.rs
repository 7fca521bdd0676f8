//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign request ID)
//!     → [redirect chain decides: 308 or fallback]
//!     → fallback.rs (default responses)
//!     → Send to client
//! ```

pub mod fallback;
pub mod request;
pub mod server;

pub use fallback::default_mux;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
