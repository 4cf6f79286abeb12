//! Flywheel - the in-memory model layer for a hierarchical state-machine
//! diagram editor.
//!
//! Flywheel bridges a parsed graph document (typed nodes and edges with
//! geometry) and a tree-based presentation layer. A document is converted
//! into an ownership tree of typed items: machine root, aggregation
//! containers, states with nested children, initial markers, comments, and
//! transitions cross-referencing states by identifier. The tree is exposed
//! through an address-based adapter with inline rename, drag-and-drop
//! reparenting, and synchronous change notifications.
//!
//! The on-disk parser/writer and the widget toolkit are external
//! collaborators: parsing plugs in through
//! [`document::DocumentSource`], and the display side consumes the
//! [`model::TreeModel`] contract plus [`observer::ModelObserver`]
//! notifications.

pub mod convert;
pub mod document;
pub mod item;
pub mod mime;
pub mod model;
pub mod observer;
pub mod tree;

mod error;

pub use flywheel_core::{geometry, identifier};

pub use error::ModelError;
pub use model::TreeModel;
