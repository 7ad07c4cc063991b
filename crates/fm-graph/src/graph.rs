//! The machine graph: device nodes, pipes between their pins, and twin valves.

use std::collections::{BTreeSet, HashSet};

use fm_core::{NodeId, PortIndex};
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::node::Node;
use crate::validate;

/// A pipe joining one pin of `source` to one pin of `target`.
///
/// Stored once per physical link. For devices with a declared direction
/// the orientation is meaningful; otherwise it reflects resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: NodeId,
    pub source_port: PortIndex,
    pub target: NodeId,
    pub target_port: PortIndex,
}

impl Edge {
    /// True if the edge touches `node` on either end.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

/// Mutable graph of the fluidic machine.
///
/// Nodes are stored in slots indexed by their id, so ids handed out by a
/// reference registry can be registered in any order.
#[derive(Debug, Clone, Default)]
pub struct MachineGraph {
    pub(crate) nodes: Vec<Option<Node>>,
    pub(crate) edges: Vec<Edge>,
    /// Unordered node pairs already joined by an edge (lower id first).
    linked: BTreeSet<(NodeId, NodeId)>,
    /// Pins already carrying a pipe.
    used_ports: HashSet<(NodeId, PortIndex)>,
    pub(crate) twins: Vec<BTreeSet<NodeId>>,
}

fn pair(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl MachineGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node under its own id.
    pub fn add_node(&mut self, node: Node) -> GraphResult<NodeId> {
        let id = node.id();
        let idx = id.index() as usize;
        if idx >= self.nodes.len() {
            self.nodes.resize_with(idx + 1, || None);
        }
        if self.nodes[idx].is_some() {
            return Err(GraphError::DuplicateNode { node: id });
        }
        debug!(node = %id, kind = node.label(), ports = node.port_count(), "add node");
        self.nodes[idx] = Some(node);
        Ok(id)
    }

    /// Get a node by ID (returns None if it was never added).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index() as usize).and_then(Option::as_ref)
    }

    /// Iterate over all nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().flatten()
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Return all edges in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Connect `source`'s pin to `target`'s pin.
    pub fn connect_nodes(
        &mut self,
        source: NodeId,
        source_port: PortIndex,
        target: NodeId,
        target_port: PortIndex,
    ) -> GraphResult<()> {
        if source == target {
            return Err(GraphError::SelfConnection { node: source });
        }
        validate::validate_endpoint(self, source, source_port)?;
        validate::validate_endpoint(self, target, target_port)?;
        if self.are_connected(source, target) {
            return Ok(());
        }

        debug!(%source, source_port, %target, target_port, "connect");
        self.linked.insert(pair(source, target));
        self.used_ports.insert((source, source_port));
        self.used_ports.insert((target, target_port));
        self.edges.push(Edge {
            source,
            source_port,
            target,
            target_port,
        });
        Ok(())
    }

    /// True if an edge joins `a` and `b` in either direction.
    pub fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.linked.contains(&pair(a, b))
    }

    /// True if the pin already carries a pipe.
    pub fn is_port_used(&self, node: NodeId, port: PortIndex) -> bool {
        self.used_ports.contains(&(node, port))
    }

    /// Ids of every valve node.
    pub fn valve_ids(&self) -> BTreeSet<NodeId> {
        self.nodes()
            .filter(|n| n.is_valve())
            .map(Node::id)
            .collect()
    }

    /// Mark a set of valves as sharing one actuator.
    pub fn set_valves_as_twins(&mut self, group: &BTreeSet<NodeId>) -> GraphResult<()> {
        validate::validate_twin_group(self, group)?;
        debug!(valves = ?group, "twin group");
        self.twins.push(group.clone());
        Ok(())
    }

    /// All twin groups, in registration order.
    pub fn twin_groups(&self) -> &[BTreeSet<NodeId>] {
        &self.twins
    }

    /// The twin group a valve belongs to, if any.
    pub fn twins_of(&self, id: NodeId) -> Option<&BTreeSet<NodeId>> {
        self.twins.iter().find(|group| group.contains(&id))
    }
}
