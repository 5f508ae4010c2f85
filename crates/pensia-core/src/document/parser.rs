//! Document loading from JSON/YAML renderings of the decoded tree.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::CheckError;

use super::node::{Mapping, Node};
use super::path::Record;
use super::schema;

/// Errors that can occur when loading a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read document file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Document root must be a mapping, found a {0}")]
    NotAMapping(&'static str),

    #[error("Document does not match the filing schema:\n{}", .0.join("\n"))]
    SchemaViolation(Vec<String>),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Number at {pointer} decodes to {text}, losing digits; quote it as a string")]
    InexactNumber { pointer: String, text: String },
}

/// Significant decimal digits an `f64` always carries without loss.
const EXACT_FLOAT_DIGITS: usize = 15;

/// A decoded pension filing.
///
/// Immutable once loaded; every accessor borrows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Mapping,
}

impl Document {
    /// Build a document from an already decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DocumentError> {
        match Node::from(value) {
            Node::Mapping(root) => Ok(Self { root }),
            other => Err(DocumentError::NotAMapping(other.kind())),
        }
    }

    /// Build a document from a JSON value after checking it against the
    /// embedded filing schema.
    pub fn from_value_checked(value: serde_json::Value) -> Result<Self, DocumentError> {
        schema::validate_document_schema(&value).map_err(DocumentError::SchemaViolation)?;
        Self::from_value(value)
    }

    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a document from a YAML string.
    ///
    /// Unquoted YAML numbers pass through `f64`; one that needs more
    /// significant digits than an `f64` keeps is rejected rather than
    /// silently rounded.
    pub fn from_yaml(yaml: &str) -> Result<Self, DocumentError> {
        Self::from_value(yaml_value(yaml)?)
    }

    /// Read a decoded JSON value from a `.json`, `.yaml` or `.yml` file.
    pub fn read_value(path: impl AsRef<Path>) -> Result<serde_json::Value, DocumentError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(&contents)?),
            Some("yaml") | Some("yml") => yaml_value(&contents),
            _ => Err(DocumentError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Load a document file, format chosen by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        Self::from_value(Self::read_value(path)?)
    }

    /// Whether a path has an extension [`Document::from_file`] understands.
    pub fn is_supported_file(path: impl AsRef<Path>) -> bool {
        matches!(
            path.as_ref().extension().and_then(|e| e.to_str()),
            Some("json") | Some("yaml") | Some("yml")
        )
    }

    /// The root mapping as a record.
    pub fn root(&self) -> Record<'_> {
        Record::root(&self.root)
    }

    /// Every mapping addressed by `path`, in document order.
    pub fn records(&self, path: &str) -> Result<Vec<Record<'_>>, CheckError> {
        self.root().records(path)
    }

    /// The single mapping addressed by `path`.
    pub fn record(&self, path: &str) -> Result<Record<'_>, CheckError> {
        self.root().record(path)
    }

    /// The single node addressed by `path`.
    pub fn value(&self, path: &str) -> Result<&Node, CheckError> {
        self.root().value(path)
    }
}

fn yaml_value(yaml: &str) -> Result<serde_json::Value, DocumentError> {
    let value: serde_json::Value = serde_yaml::from_str(yaml)?;
    ensure_exact_numbers(&value, "")?;
    Ok(value)
}

fn ensure_exact_numbers(value: &serde_json::Value, pointer: &str) -> Result<(), DocumentError> {
    use serde_json::Value;

    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(float) if significant_digits(float) > EXACT_FLOAT_DIGITS => {
                Err(DocumentError::InexactNumber {
                    pointer: if pointer.is_empty() { "/".to_string() } else { pointer.to_string() },
                    text: n.to_string(),
                })
            }
            _ => Ok(()),
        },
        Value::Array(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| ensure_exact_numbers(item, &format!("{}/{}", pointer, i))),
        Value::Object(map) => map.iter().try_for_each(|(key, item)| {
            ensure_exact_numbers(item, &format!("{}/{}", pointer, key))
        }),
        _ => Ok(()),
    }
}

/// Digits in the shortest representation that reads back as `value`.
fn significant_digits(value: f64) -> usize {
    let shortest = format!("{:e}", value);
    shortest
        .split('e')
        .next()
        .map_or(0, |mantissa| mantissa.chars().filter(char::is_ascii_digit).count())
}
