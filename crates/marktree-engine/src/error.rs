use thiserror::Error;

use crate::tree::NodeId;

/// Errors from explicitly addressing a tree: cursor and selection setters
/// and document construction. Parsing and edit commands never fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("no node {0} in the tree")]
    UnknownNode(NodeId),

    #[error("path {0:?} does not address a node")]
    InvalidPath(Vec<usize>),

    #[error("offset {offset} is outside node {node} or not on a character boundary")]
    InvalidOffset { node: NodeId, offset: usize },

    #[error("node {node} has no {what}")]
    InvalidAddress { node: NodeId, what: &'static str },

    #[error("range endpoints {0} and {1} do not share a parent")]
    CrossLevelRange(NodeId, NodeId),
}
