//! Record and raw value model for feed data
//!
//! A record is one structured data item to render (one blog post). Its fields
//! hold raw values of unknown shape; classifying and resolving those shapes is
//! the job of the value normalizer in [`crate::resolve`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::parser::ast::Node;
use crate::resolve::ResolveContext;

/// A zero-argument value producer, invoked with the template instance being
/// populated so it can build content that depends on structural context
pub type Producer = Arc<dyn Fn(&ResolveContext<'_>) -> Value + Send + Sync>;

/// A raw replacement value, dispatched by the value normalizer
#[derive(Clone)]
pub enum Value {
    /// Plain text - the terminal case
    Text(String),
    /// Ordered collection; each element becomes its own paragraph unit
    List(Vec<Value>),
    /// Pre-built content node, passed through unchanged
    Node(Node),
    /// Callable producing a value on demand
    Producer(Producer),
    /// Data of a shape the normalizer does not support; kept so the failure
    /// can be logged with the offending value
    Opaque(serde_json::Value),
}

impl Value {
    /// Short shape description for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Node(_) => "node",
            Value::Producer(_) => "producer",
            Value::Opaque(raw) => json_kind(raw),
        }
    }

    fn from_json(raw: &serde_json::Value) -> Value {
        match raw {
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            other => Value::Opaque(other.clone()),
        }
    }
}

pub(crate) fn json_kind(raw: &serde_json::Value) -> &'static str {
    match raw {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Value::Producer(_) => f.write_str("Producer(..)"),
            Value::Opaque(raw) => f.debug_tuple("Opaque").field(raw).finish(),
        }
    }
}

/// One record: a mapping from field name to raw value, immutable once built
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Field names in sorted order, for diagnostics
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|s| s.as_str())
    }
}

/// Errors from record ingestion
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to parse records JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("records document has no 'posts' array")]
    MissingPosts,
}

/// Parse a feed document: a top-level JSON object with a `posts` array.
///
/// Strings become [`Value::Text`], arrays become [`Value::List`] recursively,
/// and anything else is kept as [`Value::Opaque`] so the normalizer can report
/// it. A malformed or absent `posts` field is the record renderer's fail-fast
/// path.
pub fn records_from_json(input: &str) -> Result<Vec<Record>, RecordError> {
    let doc: serde_json::Value = serde_json::from_str(input)?;
    let posts = doc
        .get("posts")
        .and_then(|p| p.as_array())
        .ok_or(RecordError::MissingPosts)?;

    Ok(posts
        .iter()
        .map(|post| {
            let mut record = Record::new();
            if let Some(map) = post.as_object() {
                for (name, raw) in map {
                    record.insert(name.clone(), Value::from_json(raw));
                }
            }
            record
        })
        .collect())
}
