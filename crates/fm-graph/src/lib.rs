//! fm-graph: machine graph layer for the fluidic machine translator.
//!
//! Provides:
//! - Device node types (pumps, valves, open/closed containers)
//! - `MachineGraph`: node storage by id, pipe edges between pins, twin valves
//! - Validation of pins and twin groups
//!
//! # Example
//!
//! ```
//! use fm_core::{NodeId, units::ml};
//! use fm_graph::{ContainerKind, ContainerNode, MachineGraph, Node};
//!
//! let mut graph = MachineGraph::new();
//! let a = graph
//!     .add_node(Node::Container(ContainerNode::new(NodeId::from_index(0), 1, ContainerKind::Open, ml(0.0), ml(50.0))))
//!     .unwrap();
//! let b = graph
//!     .add_node(Node::Container(ContainerNode::new(NodeId::from_index(1), 1, ContainerKind::Closed, ml(0.0), ml(50.0))))
//!     .unwrap();
//! graph.connect_nodes(a, 0, b, 0).unwrap();
//!
//! assert!(graph.are_connected(b, a));
//! assert_eq!(graph.edges().len(), 1);
//! ```

pub mod error;
pub mod graph;
pub mod node;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, MachineGraph};
pub use node::{ContainerKind, ContainerNode, Node, PumpNode, ValveNode};
