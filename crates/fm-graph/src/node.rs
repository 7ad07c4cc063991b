//! Device nodes of the machine graph.

use fm_core::NodeId;
use fm_core::units::Volume;
use fm_functions::{Function, PumpDirection, PumpPluginFunction, TruthTable, ValvePluginRouteFunction};

/// Whether a container is open to the atmosphere or sealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Open,
    Closed,
}

/// A pump moving liquid between its pins.
#[derive(Debug, Clone, PartialEq)]
pub struct PumpNode {
    pub id: NodeId,
    pub port_count: usize,
    pub direction: PumpDirection,
    pub function: PumpPluginFunction,
}

/// A routing valve whose connected pins depend on its position.
#[derive(Debug, Clone, PartialEq)]
pub struct ValveNode {
    pub id: NodeId,
    pub port_count: usize,
    pub truth_table: TruthTable,
    pub function: ValvePluginRouteFunction,
}

/// A vessel holding liquid, possibly carrying instrument functions.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerNode {
    pub id: NodeId,
    pub port_count: usize,
    pub kind: ContainerKind,
    pub capacity: Volume,
    pub min_volume: Volume,
    pub functions: Vec<Function>,
}

impl ContainerNode {
    pub fn new(
        id: NodeId,
        port_count: usize,
        kind: ContainerKind,
        min_volume: Volume,
        capacity: Volume,
    ) -> Self {
        Self {
            id,
            port_count,
            kind,
            capacity,
            min_volume,
            functions: Vec::new(),
        }
    }

    /// Attach an instrument function.
    pub fn add_function(&mut self, function: Function) {
        self.functions.push(function);
    }
}

/// A device of the fluidic machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Pump(PumpNode),
    Valve(ValveNode),
    Container(ContainerNode),
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Pump(n) => n.id,
            Node::Valve(n) => n.id,
            Node::Container(n) => n.id,
        }
    }

    pub fn port_count(&self) -> usize {
        match self {
            Node::Pump(n) => n.port_count,
            Node::Valve(n) => n.port_count,
            Node::Container(n) => n.port_count,
        }
    }

    pub fn is_valve(&self) -> bool {
        matches!(self, Node::Valve(_))
    }

    /// Short human-readable device label.
    pub fn label(&self) -> &'static str {
        match self {
            Node::Pump(_) => "pump",
            Node::Valve(_) => "valve",
            Node::Container(c) => match c.kind {
                ContainerKind::Open => "open container",
                ContainerKind::Closed => "closed container",
            },
        }
    }
}
