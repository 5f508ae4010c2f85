//! The decoded document tree.

use std::collections::BTreeMap;

use serde::Serialize;

/// Named children of a mapping node.
pub type Mapping = BTreeMap<String, Node>;

/// One node of a decoded filing.
///
/// Scalars keep their textual form; numeric interpretation happens at the
/// access site so amounts stay exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Null,
    Scalar(String),
    Mapping(Mapping),
    Sequence(Vec<Node>),
}

impl Node {
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// Whether this node is the decoder's explicit null.
    ///
    /// A literal null counts, as does a mapping with exactly one key ending
    /// in `nil` (the `{"@xsi:nil": "true"}` shape).
    pub fn is_nil(&self) -> bool {
        match self {
            Node::Null => true,
            Node::Mapping(map) if map.len() == 1 => {
                map.keys().next().is_some_and(|key| key.ends_with("nil"))
            }
            _ => false,
        }
    }

    /// Short name of the node's shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Scalar(_) => "scalar",
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Scalar(b.to_string()),
            Value::Number(n) => Node::Scalar(n.to_string()),
            Value::String(s) => Node::Scalar(s),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => {
                Node::Mapping(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Scalar(text.to_string())
    }
}
