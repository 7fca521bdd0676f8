//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ShortenerConfig (validated, immutable)
//!     → lifecycle::startup builds the redirect chain from it
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload path
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::ShortenerConfig;
pub use schema::ListenerConfig;
pub use schema::RedirectsConfig;
pub use schema::ObservabilityConfig;
pub use schema::TimeoutConfig;
