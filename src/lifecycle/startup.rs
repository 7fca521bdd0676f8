//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the inline and file-backed path tables
//! - Compose the redirect chain around the fallback handler
//!
//! # Design Decisions
//! - Fail fast: any parse error is fatal and no handler is returned
//! - The definition file is consulted before inline entries

use axum::Router;
use thiserror::Error;

use crate::config::RedirectsConfig;
use crate::http::default_mux;
use crate::redirect::{load_table, map_handler, ParseError, PathTable, RedirectService};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The redirect definition file could not be read or parsed.
    #[error("invalid redirect definition: {0}")]
    Redirects(#[from] ParseError),
}

/// File table → inline table → fallback.
pub type EntryHandler<S = Router> = RedirectService<RedirectService<S>>;

/// Compose the entry handler over the default fallback mux.
pub fn build_entry_handler(config: &RedirectsConfig) -> Result<EntryHandler, StartupError> {
    build_entry_handler_with_fallback(config, default_mux())
}

/// Compose the entry handler over a caller-supplied fallback.
pub fn build_entry_handler_with_fallback<S>(
    config: &RedirectsConfig,
    fallback: S,
) -> Result<EntryHandler<S>, StartupError> {
    let inline = PathTable::from_entries(config.paths.iter().cloned());

    let file = match &config.file {
        Some(path) => {
            let table = load_table(path, config.format)?;
            tracing::info!(path = %path.display(), entries = table.len(), "Loaded redirect definition");
            table
        }
        None => PathTable::new(),
    };

    for (source, table) in [("file", &file), ("inline", &inline)] {
        for (path, url) in table.iter() {
            tracing::debug!(source, path, url, "Redirect registered");
        }
    }

    tracing::info!(
        inline_entries = inline.len(),
        file_entries = file.len(),
        "Redirect tables built"
    );

    Ok(map_handler(file, map_handler(inline, fallback)))
}
