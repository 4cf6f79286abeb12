//! Error types for model-layer operations.
//!
//! This module provides the main error type [`ModelError`] covering document
//! loading, conversion, structural mutation, and drag-payload failures.
//!
//! Rename rejections are deliberately *not* an error variant: the rename
//! contract reports them as a boolean `false` from
//! [`TreeModel::set_data`](crate::model::TreeModel::set_data).

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for model-layer operations.
///
/// All failures are local to the operation that raised them and nothing is
/// retried automatically. Document loading is the only operation worth
/// retrying, after the source file has been fixed.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The document file could not be read from disk.
    #[error("failed to read document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document content could not be parsed.
    #[error("malformed document: {0}")]
    Parse(String),

    /// An edge references a node identifier missing from the document.
    ///
    /// The diagnostic names the offending edge; the whole conversion is
    /// aborted and the partially built hierarchy discarded.
    #[error("cannot resolve transition endpoints for edge {edge}")]
    UnresolvedEndpoint { edge: String },

    /// A structural move or drop was rejected. No structural change happened
    /// for the rejected item.
    #[error("invalid move: {0}")]
    InvalidMove(&'static str),

    /// A drag payload carried a media type other than the accepted one.
    #[error("unsupported drag payload media type {media_type}")]
    ForeignPayload { media_type: String },

    /// A drag payload body could not be decoded as an identifier list.
    #[error("malformed drag payload: {0}")]
    MalformedPayload(String),
}
