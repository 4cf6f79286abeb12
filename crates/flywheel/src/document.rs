//! The parsed-document contract.
//!
//! This module defines the in-memory structure an external graph parser hands
//! to the model layer: a format version, a machine name, a tree of typed
//! nodes with geometry, and a flat list of edges referencing nodes by
//! identifier.
//!
//! The production on-disk parser/writer is an external collaborator plugged
//! in through the [`DocumentSource`] trait. [`JsonDocumentSource`] is the
//! bundled implementation reading the serde representation of a document from
//! a JSON file; it is the interchange format used by fixtures, tests, and the
//! inspector CLI.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use flywheel_core::geometry::{EdgeGeometry, NodeGeometry};

use crate::error::ModelError;

/// The category tag of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A regular (possibly composite) state.
    State,
    /// An initial-state marker.
    Initial,
    /// A free-text comment.
    Comment,
}

/// A document node: category, identity, text attributes, geometry, children.
///
/// Nodes form a tree in the document itself; the top level of that tree is a
/// grouping level the converter flattens away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub geometry: NodeGeometry,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// A document edge connecting two nodes by identifier.
///
/// `source` and `target` are node identifiers, not tree positions; they are
/// resolved against the identifier index during conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    #[serde(default)]
    pub action: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub geometry: EdgeGeometry,
}

/// A complete parsed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub format_version: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// The parser seam: anything able to produce a [`Document`] from a path.
///
/// The model layer never parses files itself; it asks a `DocumentSource` and
/// converts whatever comes back. Implementations surface read and parse
/// failures as [`ModelError`] values.
pub trait DocumentSource {
    /// Read and parse the document at `path`.
    fn read(&self, path: &Path) -> Result<Document, ModelError>;
}

/// Document source reading the serde JSON representation of a [`Document`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentSource;

impl DocumentSource for JsonDocumentSource {
    fn read(&self, path: &Path) -> Result<Document, ModelError> {
        let content = fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|err| ModelError::Parse(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_json() {
        let json = r#"{
            "format_version": "1.0",
            "name": "Light",
            "nodes": [
                {
                    "kind": "state",
                    "id": "group",
                    "children": [
                        { "kind": "state", "id": "s1", "title": "Off" },
                        { "kind": "initial", "id": "i1" }
                    ]
                }
            ],
            "edges": [
                { "id": "e1", "source": "i1", "target": "s1", "action": "power_on" }
            ]
        }"#;

        let document: Document = serde_json::from_str(json).expect("fixture should parse");
        assert_eq!(document.format_version, "1.0");
        assert_eq!(document.name, "Light");
        assert_eq!(document.nodes.len(), 1);
        assert_eq!(document.nodes[0].children.len(), 2);
        assert_eq!(document.nodes[0].children[1].kind, NodeKind::Initial);
        assert_eq!(document.edges[0].source, "i1");
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{ "nodes": [ { "kind": "comment", "action": "a note" } ] }"#;
        let document: Document = serde_json::from_str(json).expect("fixture should parse");
        let node = &document.nodes[0];
        assert!(node.id.is_empty());
        assert!(node.title.is_empty());
        assert_eq!(node.action, "a note");
        assert!(node.geometry.position().is_zero());
        assert!(document.edges.is_empty());
    }

    #[test]
    fn test_missing_edge_endpoint_field_is_a_parse_error() {
        let json = r#"{ "edges": [ { "id": "e1", "source": "s1" } ] }"#;
        assert!(serde_json::from_str::<Document>(json).is_err());
    }
}
