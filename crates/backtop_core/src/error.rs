//! Core error types

use thiserror::Error;

use crate::dom::NodeId;

/// Document-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The node does not exist (never created, or already removed)
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Inserting the child would make it an ancestor of itself
    #[error("Cannot insert {child:?} into its own subtree at {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}

/// Result type for document operations
pub type Result<T> = std::result::Result<T, CoreError>;
