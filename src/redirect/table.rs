//! Path table construction.
//!
//! # Responsibilities
//! - Parse structured redirect definitions (YAML or JSON record lists)
//! - Flatten records into an exact-match `path → url` table
//! - Build tables directly from in-memory maps
//!
//! # Design Decisions
//! - Parsing is all-or-nothing: any malformed record fails the whole document
//! - Duplicate paths resolve last-write-wins (logged, not rejected)
//! - Empty or `null` documents yield an empty table

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One `{path, url}` record from a redirect definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RedirectEntry {
    /// Request path to match exactly (e.g. `/urlshort`).
    pub path: String,

    /// Destination sent in the `Location` header.
    pub url: String,
}

/// Errors raised while building a table from a redirect definition.
#[derive(Debug, Error)]
pub enum ParseError {
    /// YAML syntax error, missing field or type mismatch.
    #[error("invalid YAML redirect definition: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON syntax error, missing field or type mismatch.
    #[error("invalid JSON redirect definition: {0}")]
    Json(#[from] serde_json::Error),

    /// The definition file could not be read.
    #[error("failed to read redirect definition {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Text format of a redirect definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionFormat {
    #[default]
    Yaml,
    Json,
}

impl DefinitionFormat {
    /// Infer the format from a file extension. Anything that is not `.json`
    /// is treated as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DefinitionFormat::Json,
            _ => DefinitionFormat::Yaml,
        }
    }
}

/// Immutable mapping from request path to destination URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTable {
    entries: HashMap<String, String>,
}

impl PathTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten records in document order. A later record for the same path
    /// replaces the earlier one.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = RedirectEntry>,
    {
        let mut table = HashMap::new();
        for RedirectEntry { path, url } in entries {
            if let Some(previous) = table.insert(path.clone(), url) {
                tracing::warn!(
                    path = %path,
                    discarded = %previous,
                    kept = %table[&path],
                    "Duplicate redirect path, last definition wins"
                );
            }
        }
        Self { entries: table }
    }

    /// Destination for an exact path, if any.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(path, url)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }
}

impl From<HashMap<String, String>> for PathTable {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<K, V> FromIterator<(K, V)> for PathTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl FromIterator<RedirectEntry> for PathTable {
    fn from_iter<I: IntoIterator<Item = RedirectEntry>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

fn is_blank(raw: &[u8]) -> bool {
    raw.iter().all(u8::is_ascii_whitespace)
}

/// Parse a YAML record list into a table.
///
/// ```text
/// - path: /urlshort
///   url: https://github.com/gophercises/urlshort
/// ```
pub fn parse_yaml(raw: &[u8]) -> Result<PathTable, ParseError> {
    if is_blank(raw) {
        return Ok(PathTable::new());
    }
    let entries: Option<Vec<RedirectEntry>> = serde_yaml::from_slice(raw)?;
    Ok(PathTable::from_entries(entries.unwrap_or_default()))
}

/// Parse a JSON array of `{"path", "url"}` objects into a table.
pub fn parse_json(raw: &[u8]) -> Result<PathTable, ParseError> {
    if is_blank(raw) {
        return Ok(PathTable::new());
    }
    let entries: Option<Vec<RedirectEntry>> = serde_json::from_slice(raw)?;
    Ok(PathTable::from_entries(entries.unwrap_or_default()))
}

/// Parse a definition in the given format.
pub fn parse_redirects(raw: &[u8], format: DefinitionFormat) -> Result<PathTable, ParseError> {
    match format {
        DefinitionFormat::Yaml => parse_yaml(raw),
        DefinitionFormat::Json => parse_json(raw),
    }
}

/// Read and parse a definition file. Without an explicit format it is
/// inferred from the file extension.
pub fn load_table(path: &Path, format: Option<DefinitionFormat>) -> Result<PathTable, ParseError> {
    let raw = fs::read(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let format = format.unwrap_or_else(|| DefinitionFormat::from_path(path));
    parse_redirects(&raw, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ENTRIES: &str = "\
- path: /urlshort
  url: https://github.com/gophercises/urlshort
- path: /urlshort-final
  url: https://github.com/gophercises/urlshort/tree/solution
";

    #[test]
    fn test_parse_yaml_entries() {
        let table = parse_yaml(TWO_ENTRIES.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("/urlshort"),
            Some("https://github.com/gophercises/urlshort")
        );
        assert_eq!(
            table.get("/urlshort-final"),
            Some("https://github.com/gophercises/urlshort/tree/solution")
        );
    }

    #[test]
    fn test_duplicate_path_last_wins() {
        let raw = "\
- path: /dup
  url: https://first.example.com
- path: /other
  url: https://other.example.com
- path: /dup
  url: https://second.example.com
";
        let table = parse_yaml(raw.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("/dup"), Some("https://second.example.com"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_yaml(b"").unwrap().is_empty());
        assert!(parse_yaml(b"  \n\t\n").unwrap().is_empty());
        assert!(parse_yaml(b"[]").unwrap().is_empty());
        assert!(parse_yaml(b"~").unwrap().is_empty());
    }

    #[test]
    fn test_formatting_variance() {
        let flow = "[{path: /urlshort, url: 'https://github.com/gophercises/urlshort'}]";
        let spaced = "\n\n-   path:    /urlshort\n    url:     https://github.com/gophercises/urlshort\n\n";
        let block = "- path: /urlshort\n  url: https://github.com/gophercises/urlshort\n";

        let expected = parse_yaml(block.as_bytes()).unwrap();
        assert_eq!(parse_yaml(flow.as_bytes()).unwrap(), expected);
        assert_eq!(parse_yaml(spaced.as_bytes()).unwrap(), expected);
    }

    #[test]
    fn test_broken_indentation_rejected() {
        let raw = "- path: /urlshort\n url: https://github.com/gophercises/urlshort\n";
        let err = parse_yaml(raw.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));
    }

    #[test]
    fn test_missing_field_rejected() {
        let raw = "- path: /urlshort\n";
        let err = parse_yaml(raw.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("url"), "unexpected error: {}", err);
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let raw = "- path: [/a, /b]\n  url: https://example.com\n";
        assert!(parse_yaml(raw.as_bytes()).is_err());

        let not_a_list = "path: /a\nurl: https://example.com\n";
        assert!(parse_yaml(not_a_list.as_bytes()).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let raw = "- path: /a\n  url: https://example.com\n  note: extra\n";
        assert!(parse_yaml(raw.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_json() {
        let raw = r#"[
            {"path": "/a", "url": "https://a.example.com"},
            {"path": "/b", "url": "https://b.example.com"},
            {"path": "/a", "url": "https://a2.example.com"}
        ]"#;
        let table = parse_json(raw.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("/a"), Some("https://a2.example.com"));

        assert!(parse_json(b"").unwrap().is_empty());
        assert!(parse_json(b"null").unwrap().is_empty());
        assert!(matches!(
            parse_json(br#"[{"path": "/a"}]"#),
            Err(ParseError::Json(_))
        ));
        assert!(parse_json(br#"[{"path": "/a", "url": 7}]"#).is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DefinitionFormat::from_path(Path::new("r.json")), DefinitionFormat::Json);
        assert_eq!(DefinitionFormat::from_path(Path::new("r.JSON")), DefinitionFormat::Json);
        assert_eq!(DefinitionFormat::from_path(Path::new("r.yml")), DefinitionFormat::Yaml);
        assert_eq!(DefinitionFormat::from_path(Path::new("redirects")), DefinitionFormat::Yaml);
    }

    #[test]
    fn test_table_from_map() {
        let table: PathTable = [("/redirect", "https://mytotallycoolwebsite.com")]
            .into_iter()
            .collect();
        assert!(table.contains("/redirect"));
        assert!(!table.contains("/redirect/"));
        assert_eq!(table.get("/Redirect"), None);
    }

    #[test]
    fn test_iter_yields_flattened_pairs() {
        let table = parse_yaml(TWO_ENTRIES.as_bytes()).unwrap();
        let mut pairs: Vec<(&str, &str)> = table.iter().collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("/urlshort", "https://github.com/gophercises/urlshort"),
                ("/urlshort-final", "https://github.com/gophercises/urlshort/tree/solution"),
            ]
        );
    }

    #[test]
    fn test_load_table_missing_file() {
        let err = load_table(Path::new("/nonexistent/redirects.yaml"), None).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }

    #[test]
    fn test_load_table_json_by_extension() {
        let path = std::env::temp_dir().join(format!("urlshort-table-{}.json", std::process::id()));
        fs::write(&path, r#"[{"path": "/j", "url": "https://json.example.com"}]"#).unwrap();

        let table = load_table(&path, None).unwrap();
        assert_eq!(table.get("/j"), Some("https://json.example.com"));

        // An explicit format overrides the extension.
        assert!(load_table(&path, Some(DefinitionFormat::Yaml)).is_ok());
        let _ = fs::remove_file(&path);
    }
}
