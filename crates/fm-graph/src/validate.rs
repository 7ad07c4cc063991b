//! Graph validation logic.

use std::collections::BTreeSet;

use fm_core::{NodeId, PortIndex};

use crate::error::{GraphError, GraphResult};
use crate::graph::MachineGraph;

/// Check that a pin exists on a registered node and is still free.
pub(crate) fn validate_endpoint(
    graph: &MachineGraph,
    node: NodeId,
    port: PortIndex,
) -> GraphResult<()> {
    let found = graph.node(node).ok_or(GraphError::UnknownNode { node })?;

    let port_count = found.port_count();
    if port >= port_count {
        return Err(GraphError::PortOutOfRange {
            node,
            port,
            port_count,
        });
    }

    if graph.is_port_used(node, port) {
        return Err(GraphError::PortInUse { node, port });
    }

    Ok(())
}

/// Check that every member of a twin group is a registered valve.
pub(crate) fn validate_twin_group(
    graph: &MachineGraph,
    group: &BTreeSet<NodeId>,
) -> GraphResult<()> {
    if group.len() < 2 {
        return Err(GraphError::TwinGroupTooSmall { size: group.len() });
    }

    for &node in group {
        match graph.node(node) {
            None => return Err(GraphError::UnknownNode { node }),
            Some(found) if !found.is_valve() => return Err(GraphError::NotAValve { node }),
            Some(_) => {}
        }
    }

    Ok(())
}
