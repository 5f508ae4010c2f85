//! Decoded pension filings and path-based access to them.
//!
//! A filing arrives already decoded by the structural schema (XML decoders
//! render it as nested mappings and sequences, usually dumped as JSON or
//! YAML). This module loads that tree and resolves slash-separated paths
//! against it. Nothing here mutates the tree.

mod node;
mod parser;
mod path;
pub mod schema;

pub use node::{Mapping, Node};
pub use parser::{Document, DocumentError};
pub use path::Record;
