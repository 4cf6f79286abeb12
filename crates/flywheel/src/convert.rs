//! Graph-to-tree conversion.
//!
//! [`convert`] walks a parsed [`Document`] and produces one complete
//! hierarchy generation: the item tree plus the identifier index that makes
//! transition endpoints resolvable. The conversion is all-or-nothing: an
//! unresolvable edge endpoint aborts the whole pass and the partially
//! built tree is dropped on the floor, never observed by anyone.
//!
//! Two behaviors of the document format matter here:
//!
//! - The document's top level is a grouping level: top-level nodes are *not*
//!   converted to items, only their children are, hoisted directly under the
//!   states aggregation.
//! - Geometry is copied verbatim. The model layer stores it for the canvas
//!   and never interprets a coordinate.

use log::{debug, info, warn};

use flywheel_core::identifier::IdRegistry;

use crate::{
    document::{Document, Edge, Node, NodeKind},
    error::ModelError,
    item::{ItemData, UNTITLED_NODE_LABEL},
    tree::{Generation, ItemId, ItemTree},
};

/// The product of one successful conversion: a complete hierarchy generation.
#[derive(Debug)]
pub struct Conversion {
    pub tree: ItemTree,
    pub index: IdRegistry<ItemId>,
    pub format_version: String,
}

/// Converts a parsed document into an item tree and identifier index.
///
/// # Errors
///
/// Returns [`ModelError::UnresolvedEndpoint`] when an edge references a node
/// identifier the document never defined. Nothing of the aborted conversion
/// survives.
pub fn convert(document: &Document, generation: Generation) -> Result<Conversion, ModelError> {
    let mut tree = ItemTree::new(generation);
    let mut index = IdRegistry::new();

    if !document.name.is_empty() {
        rename_machine(&mut tree, &document.name);
    }

    // Top-level nodes are grouping containers in the document format: skip
    // them and hoist their children under the states aggregation.
    for top_level in &document.nodes {
        debug!(
            children = top_level.children.len();
            "Flattening top-level document node"
        );
        for child in &top_level.children {
            convert_node(child, tree.states_root(), &mut tree, &mut index);
        }
    }

    for edge in &document.edges {
        convert_edge(edge, &mut tree, &index)?;
    }

    info!(
        items = tree.len(),
        identifiers = index.len(),
        transitions = document.edges.len();
        "Converted document"
    );

    Ok(Conversion {
        tree,
        index,
        format_version: document.format_version.clone(),
    })
}

fn rename_machine(tree: &mut ItemTree, name: &str) {
    let machine_root = tree.machine_root();
    let item = tree
        .get_mut(machine_root)
        .expect("skeleton machine root is always live");
    if let ItemData::MachineRoot { name: current } = item.data_mut() {
        *current = name.to_string();
    }
}

/// Builds the item for one non-top-level node, registers its identifier, and
/// recurses into its children.
fn convert_node(node: &Node, parent: ItemId, tree: &mut ItemTree, index: &mut IdRegistry<ItemId>) {
    let data = match node.kind {
        NodeKind::Initial => ItemData::Initial {
            id: node.id.clone(),
            position: node.geometry.position(),
        },
        NodeKind::Comment => ItemData::Comment {
            id: node.id.clone(),
            body: node.action.clone(),
            geometry: node.geometry,
        },
        NodeKind::State => {
            let title = if node.title.is_empty() {
                UNTITLED_NODE_LABEL.to_string()
            } else {
                node.title.clone()
            };
            ItemData::State {
                id: node.id.clone(),
                title,
                geometry: node.geometry,
            }
        }
    };

    let item = tree.attach(parent, data);

    let requested = if node.id.is_empty() {
        index.generate()
    } else {
        node.id.clone()
    };
    let committed = index.insert(requested, item);
    commit_identifier(tree, item, committed);

    // A state's behavior text surfaces as a leading action child.
    if node.kind == NodeKind::State {
        let action = node.action.trim();
        if !action.is_empty() {
            tree.attach(
                item,
                ItemData::Action {
                    text: action.to_string(),
                },
            );
        }
    }

    for child in &node.children {
        convert_node(child, item, tree, index);
    }
}

/// Writes the committed identifier back into the item payload so the tree
/// and the index always agree on the id, collisions included.
fn commit_identifier(tree: &mut ItemTree, item: ItemId, committed: String) {
    let slot = tree.get_mut(item).expect("freshly attached item is live");
    match slot.data_mut() {
        ItemData::State { id, .. }
        | ItemData::Initial { id, .. }
        | ItemData::Comment { id, .. } => *id = committed,
        _ => {}
    }
}

fn convert_edge(
    edge: &Edge,
    tree: &mut ItemTree,
    index: &IdRegistry<ItemId>,
) -> Result<(), ModelError> {
    let source = index.get(&edge.source).copied();
    let target = index.get(&edge.target).copied();
    let (Some(source), Some(target)) = (source, target) else {
        warn!(
            edge = edge.id,
            source = edge.source,
            target = edge.target;
            "Transition endpoint is not a known node"
        );
        return Err(ModelError::UnresolvedEndpoint {
            edge: edge.id.clone(),
        });
    };

    tree.attach(
        tree.transitions_root(),
        ItemData::Transition {
            id: edge.id.clone(),
            action: edge.action.trim().to_string(),
            geometry: edge.geometry.clone(),
            source,
            target,
        },
    );
    Ok(())
}
