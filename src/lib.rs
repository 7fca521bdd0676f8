//! Path-based permanent redirect service.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod redirect;

pub use config::schema::ShortenerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use redirect::{map_handler, parse_yaml, PathTable, RedirectService};
