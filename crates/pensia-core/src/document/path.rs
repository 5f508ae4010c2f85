//! Slash-separated path resolution over the decoded tree.
//!
//! A path such as `YeshutYatzran/Mutzarim/Mutzar` is walked one segment at a
//! time. Every current candidate mapping contributes its child of that name;
//! a child that is a sequence fans out into its elements, in order. The result
//! is therefore every match in document order, regardless of how many repeated
//! groups the path crosses.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::category::AllocationCategory;
use crate::values::{self, ValueError};
use crate::CheckError;

use super::node::{Mapping, Node};

/// One mapping on the way down to a record.
#[derive(Debug, Clone)]
struct Frame<'a> {
    name: &'a str,
    mapping: &'a Mapping,
    pointer: String,
}

/// A mapping reached through a path, with its concrete location and the
/// mappings enclosing it.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    frame: Frame<'a>,
    ancestors: Vec<Frame<'a>>,
}

/// A node matched by the final path segment.
struct Hit<'a> {
    name: &'a str,
    node: &'a Node,
    pointer: String,
    lineage: Vec<Frame<'a>>,
}

impl<'a> Hit<'a> {
    /// The matched node as a record; anything but a mapping is a shape error.
    fn into_record(self) -> Result<Record<'a>, CheckError> {
        match self.node.as_mapping() {
            Some(mapping) => Ok(Record {
                frame: Frame {
                    name: self.name,
                    mapping,
                    pointer: self.pointer,
                },
                ancestors: self.lineage,
            }),
            None => Err(CheckError::UnexpectedShape {
                pointer: self.pointer,
                expected: "mapping",
                found: self.node.kind(),
            }),
        }
    }
}

fn join_pointer(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{}/{}", parent, segment)
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

impl<'a> Record<'a> {
    /// Record for the document root.
    pub(crate) fn root(mapping: &'a Mapping) -> Self {
        Self {
            frame: Frame {
                name: "",
                mapping,
                pointer: String::new(),
            },
            ancestors: Vec::new(),
        }
    }

    /// Element name the record was reached through (empty for the root).
    pub fn name(&self) -> &'a str {
        self.frame.name
    }

    /// Concrete location, e.g. `YeshutYatzran[0]/Mutzarim/Mutzar[1]`.
    pub fn pointer(&self) -> &str {
        &self.frame.pointer
    }

    /// The record's own fields.
    pub fn fields(&self) -> &'a Mapping {
        self.frame.mapping
    }

    /// Nearest enclosing record reached through an element called `name`.
    pub fn ancestor(&self, name: &str) -> Option<Record<'a>> {
        let position = self.ancestors.iter().rposition(|frame| frame.name == name)?;
        Some(Record {
            frame: self.ancestors[position].clone(),
            ancestors: self.ancestors[..position].to_vec(),
        })
    }

    fn lineage(&self) -> Vec<Frame<'a>> {
        let mut lineage = self.ancestors.clone();
        lineage.push(self.frame.clone());
        lineage
    }

    fn select(&self, path: &str) -> Result<Vec<Hit<'a>>, CheckError> {
        let segments = segments(path);
        let Some((last, inner)) = segments.split_last() else {
            return Err(CheckError::PathNotFound {
                path: path.to_string(),
                segment: String::new(),
                at: self.describe(),
            });
        };

        let mut cursors = vec![self.clone()];
        for segment in inner {
            cursors = step(&cursors, segment, path)?
                .into_iter()
                .map(Hit::into_record)
                .collect::<Result<_, _>>()?;
        }

        step(&cursors, last, path)
    }

    /// Every mapping addressed by `path`, relative to this record.
    ///
    /// An empty result is valid when an enclosing repeated group is empty.
    pub fn records(&self, path: &str) -> Result<Vec<Record<'a>>, CheckError> {
        if segments(path).is_empty() {
            return Ok(vec![self.clone()]);
        }

        self.select(path)?.into_iter().map(Hit::into_record).collect()
    }

    /// The single mapping addressed by `path`.
    pub fn record(&self, path: &str) -> Result<Record<'a>, CheckError> {
        let mut found = self.records(path)?;
        match found.len() {
            1 => Ok(found.remove(0)),
            0 => Err(CheckError::PathNotFound {
                path: path.to_string(),
                segment: segments(path).last().unwrap_or(&"").to_string(),
                at: self.describe(),
            }),
            count => Err(CheckError::Ambiguous {
                path: path.to_string(),
                count,
            }),
        }
    }

    /// The single node addressed by `path`.
    pub fn value(&self, path: &str) -> Result<&'a Node, CheckError> {
        let mut hits = self.select(path)?;
        match hits.len() {
            1 => Ok(hits.remove(0).node),
            0 => Err(CheckError::PathNotFound {
                path: path.to_string(),
                segment: segments(path).last().unwrap_or(&"").to_string(),
                at: self.describe(),
            }),
            count => Err(CheckError::Ambiguous {
                path: path.to_string(),
                count,
            }),
        }
    }

    /// A direct child field.
    pub fn field(&self, name: &str) -> Result<&'a Node, CheckError> {
        self.frame
            .mapping
            .get(name)
            .ok_or_else(|| CheckError::MissingField {
                field: name.to_string(),
                pointer: self.describe(),
            })
    }

    /// A direct child field as scalar text.
    pub fn text(&self, name: &str) -> Result<&'a str, CheckError> {
        let node = self.field(name)?;
        node.as_scalar().ok_or_else(|| CheckError::UnexpectedShape {
            pointer: join_pointer(&self.frame.pointer, name),
            expected: "scalar",
            found: node.kind(),
        })
    }

    fn decode<T>(
        &self,
        name: &str,
        parse: impl FnOnce(&str) -> Result<T, ValueError>,
    ) -> Result<T, CheckError> {
        let text = self.text(name)?;
        parse(text).map_err(|source| CheckError::InvalidValue {
            field: name.to_string(),
            pointer: self.describe(),
            source,
        })
    }

    pub fn decimal(&self, name: &str) -> Result<Decimal, CheckError> {
        self.decode(name, values::parse_decimal)
    }

    /// A decimal field that the decoder may have marked nil.
    ///
    /// Returns `None` for the nil sentinel; a missing field is still an error.
    pub fn optional_decimal(&self, name: &str) -> Result<Option<Decimal>, CheckError> {
        if self.field(name)?.is_nil() {
            return Ok(None);
        }
        self.decimal(name).map(Some)
    }

    /// A nillable decimal field with the nil case resolved to `default`.
    pub fn decimal_or(&self, name: &str, default: Decimal) -> Result<Decimal, CheckError> {
        Ok(values::or_nil_default(self.optional_decimal(name)?, default))
    }

    pub fn integer(&self, name: &str) -> Result<i64, CheckError> {
        self.decode(name, values::parse_integer)
    }

    pub fn category(&self, name: &str) -> Result<AllocationCategory, CheckError> {
        let code = self.integer(name)?;
        AllocationCategory::from_code(code).ok_or_else(|| CheckError::UnknownCategory {
            code,
            pointer: self.describe(),
        })
    }

    pub fn date(&self, name: &str) -> Result<NaiveDate, CheckError> {
        self.decode(name, values::parse_date)
    }

    pub fn datetime(&self, name: &str) -> Result<NaiveDateTime, CheckError> {
        self.decode(name, values::parse_datetime)
    }

    fn describe(&self) -> String {
        if self.frame.pointer.is_empty() {
            "document root".to_string()
        } else {
            self.frame.pointer.clone()
        }
    }
}

/// Advance every cursor by one segment.
///
/// Every cursor must carry the segment. An empty sequence is an empty group
/// and contributes nothing.
fn step<'a>(
    cursors: &[Record<'a>],
    segment: &str,
    path: &str,
) -> Result<Vec<Hit<'a>>, CheckError> {
    let mut hits = Vec::new();

    for cursor in cursors {
        let Some((name, child)) = cursor.frame.mapping.get_key_value(segment) else {
            return Err(CheckError::PathNotFound {
                path: path.to_string(),
                segment: segment.to_string(),
                at: cursor.describe(),
            });
        };
        let name = name.as_str();

        let base = join_pointer(&cursor.frame.pointer, name);
        match child {
            Node::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    hits.push(Hit {
                        name,
                        node: item,
                        pointer: format!("{}[{}]", base, index),
                        lineage: cursor.lineage(),
                    });
                }
            }
            node => hits.push(Hit {
                name,
                node,
                pointer: base,
                lineage: cursor.lineage(),
            }),
        }
    }

    Ok(hits)
}
