//! Pending pin-to-pin wiring and its resolution into graph edges.
//!
//! Every block records, for each of its ports, which node the port is wired
//! to. Both ends of a pipe therefore appear twice in the table, once per
//! block. Resolution turns each mirrored pair into a single graph edge,
//! choosing the orientation from declared port directions where available.

use std::collections::{BTreeMap, BTreeSet};

use fm_core::{NodeId, PortIndex};
use fm_graph::MachineGraph;
use tracing::{debug, warn};

use crate::error::{DirectionError, SchemaError, TranslationResult};
use crate::registry::ReferenceRegistry;

/// Destination of a port: the target node plus the number of copy wrappers
/// the reference went through.
///
/// The depth keeps two ports that reach the same node through different
/// copy chains apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetKey {
    pub node: NodeId,
    pub depth: u32,
}

impl TargetKey {
    pub fn direct(node: NodeId) -> Self {
        Self { node, depth: 0 }
    }

    /// The same key seen through one more copy wrapper.
    pub fn copied(self) -> Self {
        Self {
            node: self.node,
            depth: self.depth + 1,
        }
    }

    /// The key the other end of the link is stored under.
    pub fn mirror(self, source: NodeId) -> Self {
        Self {
            node: source,
            depth: self.depth,
        }
    }
}

/// Source node -> (target key -> source port).
#[derive(Debug, Clone, Default)]
pub struct PendingConnections {
    table: BTreeMap<NodeId, BTreeMap<TargetKey, PortIndex>>,
}

impl PendingConnections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `source`'s `port` is wired to `key`.
    ///
    /// Returns the port previously recorded for the same key, if any.
    pub fn insert(&mut self, source: NodeId, key: TargetKey, port: PortIndex) -> Option<PortIndex> {
        self.table.entry(source).or_default().insert(key, port)
    }

    pub fn port(&self, source: NodeId, key: TargetKey) -> Option<PortIndex> {
        self.table.get(&source).and_then(|entries| entries.get(&key)).copied()
    }

    /// Remove and return every entry of `source`.
    pub fn take(&mut self, source: NodeId) -> BTreeMap<TargetKey, PortIndex> {
        self.table.remove(&source).unwrap_or_default()
    }

    /// Source nodes that still have entries, ascending.
    pub fn sources(&self) -> Vec<NodeId> {
        self.table.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.table.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.table.values().all(BTreeMap::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, TargetKey, PortIndex)> + '_ {
        self.table
            .iter()
            .flat_map(|(&source, entries)| entries.iter().map(move |(&key, &port)| (source, key, port)))
    }
}

/// In and out ports of one node, 0-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortDirections {
    pub ins: BTreeSet<PortIndex>,
    pub outs: BTreeSet<PortIndex>,
}

impl PortDirections {
    pub fn is_in(&self, port: PortIndex) -> bool {
        self.ins.contains(&port)
    }

    pub fn is_out(&self, port: PortIndex) -> bool {
        self.outs.contains(&port)
    }
}

/// Nodes whose blocks declared port directions.
#[derive(Debug, Clone, Default)]
pub struct DirectionRegistry {
    nodes: BTreeMap<NodeId, PortDirections>,
}

impl DirectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register directions for `id`; a node may only declare them once.
    pub fn register(
        &mut self,
        id: NodeId,
        name: &str,
        directions: PortDirections,
    ) -> Result<(), DirectionError> {
        if self.nodes.contains_key(&id) {
            return Err(DirectionError::Duplicate {
                node: name.to_string(),
            });
        }
        self.nodes.insert(id, directions);
        Ok(())
    }

    pub fn get(&self, id: NodeId) -> Option<&PortDirections> {
        self.nodes.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Turns the pending table into graph edges.
///
/// Runs three phases, each visiting nodes in ascending id order: nodes with
/// declared directions, then valves, then everything else. Once a node has
/// been visited its links are final, so later nodes skip entries that point
/// back at it.
pub struct ConnectionResolver<'a> {
    graph: &'a mut MachineGraph,
    directions: &'a DirectionRegistry,
    registry: &'a ReferenceRegistry,
    pending: PendingConnections,
    processed: BTreeSet<NodeId>,
    created: usize,
}

impl<'a> ConnectionResolver<'a> {
    pub fn new(
        graph: &'a mut MachineGraph,
        directions: &'a DirectionRegistry,
        registry: &'a ReferenceRegistry,
        pending: PendingConnections,
    ) -> Self {
        Self {
            graph,
            directions,
            registry,
            pending,
            processed: BTreeSet::new(),
            created: 0,
        }
    }

    /// Resolve every pending connection. Returns the number of edges added.
    pub fn resolve_all(mut self) -> TranslationResult<usize> {
        self.check_symmetry()?;

        let directed: Vec<NodeId> = self.directions.ids().collect();
        for id in directed {
            self.resolve_directed(id)?;
        }

        let valves: Vec<NodeId> = self
            .graph
            .valve_ids()
            .into_iter()
            .filter(|id| !self.processed.contains(id))
            .collect();
        for id in valves {
            self.resolve_outgoing(id)?;
        }

        for id in self.pending.sources() {
            if !self.processed.contains(&id) {
                self.resolve_outgoing(id)?;
            }
        }

        Ok(self.created)
    }

    /// Every entry must point at a built node that points back.
    fn check_symmetry(&self) -> Result<(), SchemaError> {
        for (source, key, _) in self.pending.iter() {
            if key.node == source {
                return Err(SchemaError::SelfConnection {
                    block: self.registry.display(source),
                });
            }
            if self.graph.node(key.node).is_none() {
                return Err(SchemaError::UndefinedReference {
                    reference: self.registry.display(key.node),
                });
            }
            if self.pending.port(key.node, key.mirror(source)).is_none() {
                return Err(SchemaError::MissingMirror {
                    from: self.registry.display(source),
                    to: self.registry.display(key.node),
                });
            }
        }
        Ok(())
    }

    fn resolve_directed(&mut self, id: NodeId) -> TranslationResult<()> {
        let directions = self.directions;
        let entries = self.pending.take(id);
        let Some(own) = directions.get(id) else {
            self.processed.insert(id);
            return Ok(());
        };

        for (key, source_port) in entries {
            if self.processed.contains(&key.node) {
                continue;
            }
            let target_port = self.mirror_port(id, key)?;

            let incoming = if own.is_in(source_port) {
                true
            } else if own.is_out(source_port) {
                false
            } else {
                return Err(DirectionError::UndeclaredPort {
                    node: self.registry.display(id),
                    port: source_port,
                }
                .into());
            };

            if let Some(theirs) = directions.get(key.node) {
                let agrees = if incoming {
                    theirs.is_out(target_port)
                } else {
                    theirs.is_in(target_port)
                };
                if !agrees {
                    let (from, from_port, to, to_port) = if incoming {
                        (key.node, target_port, id, source_port)
                    } else {
                        (id, source_port, key.node, target_port)
                    };
                    return Err(DirectionError::Conflict {
                        from: self.registry.display(from),
                        from_port,
                        to: self.registry.display(to),
                        to_port,
                    }
                    .into());
                }
            }

            if incoming {
                self.materialize(key.node, target_port, id, source_port)?;
            } else {
                self.materialize(id, source_port, key.node, target_port)?;
            }
        }

        self.processed.insert(id);
        Ok(())
    }

    fn resolve_outgoing(&mut self, id: NodeId) -> TranslationResult<()> {
        let entries = self.pending.take(id);
        for (key, source_port) in entries {
            if self.processed.contains(&key.node) {
                continue;
            }
            let target_port = self.mirror_port(id, key)?;
            self.materialize(id, source_port, key.node, target_port)?;
        }
        self.processed.insert(id);
        Ok(())
    }

    fn mirror_port(&self, source: NodeId, key: TargetKey) -> Result<PortIndex, SchemaError> {
        self.pending
            .port(key.node, key.mirror(source))
            .ok_or_else(|| SchemaError::MissingMirror {
                from: self.registry.display(source),
                to: self.registry.display(key.node),
            })
    }

    fn materialize(
        &mut self,
        source: NodeId,
        source_port: PortIndex,
        target: NodeId,
        target_port: PortIndex,
    ) -> TranslationResult<()> {
        if self.graph.are_connected(source, target) {
            warn!(
                source = %self.registry.display(source),
                target = %self.registry.display(target),
                "nodes already connected, skipping link"
            );
            return Ok(());
        }
        debug!(
            source = %self.registry.display(source),
            source_port,
            target = %self.registry.display(target),
            target_port,
            "edge"
        );
        self.graph.connect_nodes(source, source_port, target, target_port)?;
        self.created += 1;
        Ok(())
    }
}
