//! Redirect subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     raw definition (YAML/JSON) or literal map
//!     → table.rs (parse, flatten to PathTable, last write wins)
//!     → handler.rs (capture table + fallback in RedirectService)
//!
//! Per request:
//!     path ∈ table → 308 Permanent Redirect, Location: table[path]
//!     path ∉ table → fallback(request), untouched
//! ```
//!
//! # Design Decisions
//! - Tables are immutable once built and shared via `Arc`
//! - Exact path equality only (no prefix, case folding or slash trimming)
//! - Handlers compose as plain tower decorators, so chains nest freely

pub mod handler;
pub mod table;

pub use handler::{map_handler, RedirectLayer, RedirectService};
pub use table::{
    load_table, parse_json, parse_redirects, parse_yaml, DefinitionFormat, ParseError,
    PathTable, RedirectEntry,
};
