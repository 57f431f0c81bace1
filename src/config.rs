//! Configuration for the stub server
//!
//! The server is configured once at startup: a log file path (required),
//! a port (0 asks the OS for a free port) and an optional list of opaque
//! JSON entries served verbatim by `GET /files`.

use crate::{Result, StubError};
use serde_json::Value;
use std::path::PathBuf;

/// Runtime configuration for a stub server instance
#[derive(Debug, Clone)]
pub struct StubConfig {
    /// File overwritten with the body of each `POST /open` request
    pub log_file: PathBuf,
    /// Port to bind on 127.0.0.1; 0 means auto-assign
    pub port: u16,
    /// Entries served by `GET /files`; `None` serves an empty list
    pub files: Option<Vec<Value>>,
}

impl StubConfig {
    /// Create a configuration with auto-assigned port and no file listing
    pub fn new(log_file: impl Into<PathBuf>) -> Self {
        Self {
            log_file: log_file.into(),
            port: 0,
            files: None,
        }
    }

    /// Request a specific port (0 keeps auto-assignment)
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the file entries served by `GET /files`
    #[must_use]
    pub fn with_files(mut self, files: Vec<Value>) -> Self {
        self.files = Some(files);
        self
    }
}

/// Parse the optional `files_json` CLI argument into file entries
///
/// The argument must be a JSON-encoded array; its elements are opaque and
/// are served back verbatim.
///
/// # Errors
///
/// Returns [`StubError::SerializationError`] if the argument is not valid
/// JSON, or [`StubError::ConfigurationError`] if it is valid JSON but not
/// an array.
pub fn parse_files_json(raw: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(raw)?;
    match value {
        Value::Array(entries) => Ok(entries),
        other => Err(StubError::ConfigurationError(format!(
            "files argument must be a JSON array, got: {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_empty_array() {
        let files = parse_files_json("[]").expect("empty array should parse");
        assert!(files.is_empty());
    }

    #[test]
    fn test_parse_entries_verbatim() {
        let files = parse_files_json(r#"[{"name":"a.txt"},{"name":"b.txt","size":12}]"#)
            .expect("array should parse");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], json!({"name": "a.txt"}));
        assert_eq!(files[1], json!({"name": "b.txt", "size": 12}));
    }

    #[test]
    fn test_reject_non_array() {
        let err = parse_files_json(r#"{"name":"a.txt"}"#).unwrap_err();
        match err {
            StubError::ConfigurationError(msg) => {
                assert!(msg.contains("object"), "unexpected message: {msg}");
            }
            other => panic!("Expected ConfigurationError, got {other:?}"),
        }
    }

    #[test]
    fn test_reject_invalid_json() {
        let err = parse_files_json("not json").unwrap_err();
        assert!(matches!(err, StubError::SerializationError(_)));
    }

    #[test]
    fn test_config_builders() {
        let config = StubConfig::new("/tmp/requests.log")
            .with_port(8099)
            .with_files(vec![json!({"name": "a.txt"})]);
        assert_eq!(config.log_file, PathBuf::from("/tmp/requests.log"));
        assert_eq!(config.port, 8099);
        assert_eq!(config.files.as_ref().map(Vec::len), Some(1));
    }
}
