//! Graph-specific error types.

use fm_core::{NodeId, PortIndex};

/// Graph construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node with this id was already added.
    DuplicateNode { node: NodeId },

    /// An operation refers to a node that was never added.
    UnknownNode { node: NodeId },

    /// A port index is not below the node's port count.
    PortOutOfRange {
        node: NodeId,
        port: PortIndex,
        port_count: usize,
    },

    /// A port already carries a connection.
    PortInUse { node: NodeId, port: PortIndex },

    /// A connection would join a node to itself.
    SelfConnection { node: NodeId },

    /// A twin group member is not a valve.
    NotAValve { node: NodeId },

    /// A twin group needs at least two valves.
    TwinGroupTooSmall { size: usize },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateNode { node } => {
                write!(f, "Node {} is already registered", node)
            }
            GraphError::UnknownNode { node } => {
                write!(f, "Node {} does not exist", node)
            }
            GraphError::PortOutOfRange {
                node,
                port,
                port_count,
            } => {
                write!(
                    f,
                    "Port {} is out of range for node {} ({} ports)",
                    port, node, port_count
                )
            }
            GraphError::PortInUse { node, port } => {
                write!(f, "Port {} of node {} is already connected", port, node)
            }
            GraphError::SelfConnection { node } => {
                write!(f, "Node {} cannot be connected to itself", node)
            }
            GraphError::NotAValve { node } => {
                write!(f, "Twin member {} is not a valve", node)
            }
            GraphError::TwinGroupTooSmall { size } => {
                write!(f, "Twin group has {} member(s), expected at least 2", size)
            }
        }
    }
}

impl std::error::Error for GraphError {}

pub type GraphResult<T> = Result<T, GraphError>;
