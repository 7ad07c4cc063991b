//! The translated machine and the lookup tables derived from it.

use std::collections::{BTreeMap, BTreeSet};

use fm_core::NodeId;
use fm_core::units::VolumeRate;
use fm_functions::FunctionKind;
use fm_graph::{MachineGraph, Node};
use serde::{Serialize, Serializer};

use crate::registry::ReferenceRegistry;

/// Machine graph plus the machine-wide settings it was declared with.
#[derive(Debug, Clone)]
pub struct MachineModel {
    graph: MachineGraph,
    default_rate: VolumeRate,
    integer_precision: u32,
    decimal_precision: u32,
}

impl MachineModel {
    pub fn new(
        graph: MachineGraph,
        default_rate: VolumeRate,
        integer_precision: u32,
        decimal_precision: u32,
    ) -> Self {
        Self {
            graph,
            default_rate,
            integer_precision,
            decimal_precision,
        }
    }

    pub fn graph(&self) -> &MachineGraph {
        &self.graph
    }

    /// Flow rate used when an operation does not give one.
    pub fn default_rate(&self) -> VolumeRate {
        self.default_rate
    }

    /// Digits kept for the integer part of quantities.
    pub fn integer_precision(&self) -> u32 {
        self.integer_precision
    }

    /// Digits kept for the decimal part of quantities.
    pub fn decimal_precision(&self) -> u32 {
        self.decimal_precision
    }
}

/// Block references and device roles by node id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelMapping {
    references: BTreeMap<String, NodeId>,
    names: BTreeMap<NodeId, String>,
    containers: Vec<NodeId>,
    pumps: Vec<NodeId>,
    valves: Vec<NodeId>,
    twins: Vec<BTreeSet<NodeId>>,
    #[serde(serialize_with = "function_tags")]
    functions: BTreeMap<NodeId, Vec<FunctionKind>>,
}

fn function_tags<S: Serializer>(
    functions: &BTreeMap<NodeId, Vec<FunctionKind>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        functions
            .iter()
            .map(|(id, kinds)| (id, kinds.iter().map(|k| k.tag()).collect::<Vec<_>>())),
    )
}

impl ModelMapping {
    pub fn from_model(model: &MachineModel, registry: &ReferenceRegistry) -> Self {
        let mut mapping = ModelMapping::default();
        for (id, name) in registry.iter() {
            mapping.references.insert(name.to_string(), id);
            mapping.names.insert(id, name.to_string());
        }

        for node in model.graph().nodes() {
            match node {
                Node::Container(c) => {
                    mapping.containers.push(c.id);
                    if !c.functions.is_empty() {
                        let kinds = c.functions.iter().map(|f| f.kind()).collect();
                        mapping.functions.insert(c.id, kinds);
                    }
                }
                Node::Pump(p) => mapping.pumps.push(p.id),
                Node::Valve(v) => mapping.valves.push(v.id),
            }
        }
        mapping.twins = model.graph().twin_groups().to_vec();
        mapping
    }

    pub fn id_of(&self, reference: &str) -> Option<NodeId> {
        self.references.get(reference).copied()
    }

    pub fn reference_of(&self, id: NodeId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn references(&self) -> &BTreeMap<String, NodeId> {
        &self.references
    }

    pub fn containers(&self) -> &[NodeId] {
        &self.containers
    }

    pub fn pumps(&self) -> &[NodeId] {
        &self.pumps
    }

    pub fn valves(&self) -> &[NodeId] {
        &self.valves
    }

    pub fn twins(&self) -> &[BTreeSet<NodeId>] {
        &self.twins
    }

    /// Instrument functions attached to a container.
    pub fn functions_of(&self, id: NodeId) -> &[FunctionKind] {
        self.functions.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_core::units::{ml, ml_per_s};
    use fm_functions::Function;
    use fm_graph::{ContainerKind, ContainerNode};

    #[test]
    fn mapping_classifies_nodes() {
        let mut registry = ReferenceRegistry::new();
        let a = registry.resolve("flask");
        let mut container = ContainerNode::new(a, 1, ContainerKind::Open, ml(0.0), ml(10.0));
        container.add_function(Function::MeasureVolume);

        let mut graph = MachineGraph::new();
        graph.add_node(Node::Container(container)).unwrap();
        let model = MachineModel::new(graph, ml_per_s(1.0), 3, 2);
        let mapping = ModelMapping::from_model(&model, &registry);

        assert_eq!(mapping.id_of("flask"), Some(a));
        assert_eq!(mapping.reference_of(a), Some("flask"));
        assert_eq!(mapping.containers(), [a]);
        assert!(mapping.pumps().is_empty());
        assert_eq!(mapping.functions_of(a), [FunctionKind::VolumeSensor]);

        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(json["functions"]["0"][0], "Volume_sensor");
        assert_eq!(json["references"]["flask"], 0);
    }
}
