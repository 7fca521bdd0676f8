//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup and request handling
//!     → logging.rs (structured log events via `tracing`)
//!     → tower-http TraceLayer (one span per request, carrying x-request-id)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID flows into every request span
//! - No per-redirect counters or analytics

pub mod logging;

pub use logging::init_logging;
