//! Integration tests for fm-graph.

use std::collections::BTreeSet;

use fm_core::NodeId;
use fm_core::units::{ml, ml_per_s};
use fm_functions::{
    PluginConfiguration, PumpDirection, PumpPluginFunction, PumpWorkingRange, TruthTable,
    ValvePluginRouteFunction,
};
use fm_graph::{ContainerKind, ContainerNode, GraphError, MachineGraph, Node, PumpNode, ValveNode};
use proptest::prelude::*;

fn id(index: u32) -> NodeId {
    NodeId::from_index(index)
}

fn container(index: u32, ports: usize, kind: ContainerKind) -> Node {
    Node::Container(ContainerNode::new(id(index), ports, kind, ml(0.0), ml(100.0)))
}

fn pump(index: u32) -> Node {
    let range = PumpWorkingRange::new(ml_per_s(0.0), ml_per_s(1.0), "pump").unwrap();
    Node::Pump(PumpNode {
        id: id(index),
        port_count: 2,
        direction: PumpDirection::Unidirectional,
        function: PumpPluginFunction::new(PluginConfiguration::new("pump", "Peristaltic"), range, false),
    })
}

fn valve(index: u32, ports: usize) -> Node {
    Node::Valve(ValveNode {
        id: id(index),
        port_count: ports,
        truth_table: TruthTable::new(),
        function: ValvePluginRouteFunction::new(PluginConfiguration::new("valve", "Rotary")),
    })
}

#[test]
fn pump_between_two_containers() {
    // Build: C0 -> [P1] -> C2
    let mut graph = MachineGraph::new();
    let c0 = graph.add_node(container(0, 1, ContainerKind::Open)).unwrap();
    let p1 = graph.add_node(pump(1)).unwrap();
    let c2 = graph.add_node(container(2, 1, ContainerKind::Closed)).unwrap();

    graph.connect_nodes(c0, 0, p1, 0).unwrap();
    graph.connect_nodes(p1, 1, c2, 0).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edges().len(), 2);
    assert!(graph.are_connected(c0, p1));
    assert!(graph.are_connected(c2, p1));
    assert!(!graph.are_connected(c0, c2));

    let first = graph.edges()[0];
    assert_eq!((first.source, first.source_port), (c0, 0));
    assert_eq!((first.target, first.target_port), (p1, 0));
    assert_eq!(graph.edges().iter().filter(|e| e.touches(p1)).count(), 2);
}

#[test]
fn pins_are_single_use() {
    let mut graph = MachineGraph::new();
    let a = graph.add_node(container(0, 1, ContainerKind::Open)).unwrap();
    let b = graph.add_node(container(1, 1, ContainerKind::Open)).unwrap();
    let c = graph.add_node(container(2, 1, ContainerKind::Open)).unwrap();

    graph.connect_nodes(a, 0, b, 0).unwrap();
    let err = graph.connect_nodes(c, 0, a, 0).unwrap_err();
    assert_eq!(err, GraphError::PortInUse { node: a, port: 0 });
}

#[test]
fn connection_errors() {
    let mut graph = MachineGraph::new();
    let a = graph.add_node(container(0, 2, ContainerKind::Open)).unwrap();

    assert_eq!(
        graph.connect_nodes(a, 0, a, 1),
        Err(GraphError::SelfConnection { node: a })
    );
    assert_eq!(
        graph.connect_nodes(a, 0, id(9), 0),
        Err(GraphError::UnknownNode { node: id(9) })
    );

    let b = graph.add_node(container(1, 1, ContainerKind::Open)).unwrap();
    let err = graph.connect_nodes(a, 0, b, 1).unwrap_err();
    assert!(err.to_string().contains("out of range"));
    assert!(graph.edges().is_empty());
}

#[test]
fn twin_valves() {
    let mut graph = MachineGraph::new();
    graph.add_node(valve(0, 4)).unwrap();
    graph.add_node(valve(1, 4)).unwrap();
    graph.add_node(valve(2, 3)).unwrap();
    graph.add_node(container(3, 1, ContainerKind::Open)).unwrap();

    assert_eq!(
        graph.valve_ids(),
        [id(0), id(1), id(2)].into_iter().collect::<BTreeSet<_>>()
    );

    let group: BTreeSet<_> = [id(0), id(1)].into_iter().collect();
    graph.set_valves_as_twins(&group).unwrap();

    assert_eq!(graph.twin_groups().len(), 1);
    assert_eq!(graph.twins_of(id(1)), Some(&group));
    assert!(graph.twins_of(id(2)).is_none());

    let bad: BTreeSet<_> = [id(2), id(3)].into_iter().collect();
    assert_eq!(
        graph.set_valves_as_twins(&bad),
        Err(GraphError::NotAValve { node: id(3) })
    );
    assert_eq!(graph.twin_groups().len(), 1);
}

proptest! {
    /// However links are requested, a pair of nodes never gets two edges
    /// and no pin is used twice.
    #[test]
    fn at_most_one_edge_per_pair(links in prop::collection::vec((0u32..6, 0usize..4, 0u32..6, 0usize..4), 0..40)) {
        let mut graph = MachineGraph::new();
        for i in 0..6 {
            graph.add_node(container(i, 4, ContainerKind::Open)).unwrap();
        }
        for (a, pa, b, pb) in links {
            let _ = graph.connect_nodes(id(a), pa, id(b), pb);
        }

        let mut pairs = BTreeSet::new();
        let mut pins = BTreeSet::new();
        for e in graph.edges() {
            let key = if e.source < e.target { (e.source, e.target) } else { (e.target, e.source) };
            prop_assert!(pairs.insert(key));
            prop_assert!(pins.insert((e.source, e.source_port)));
            prop_assert!(pins.insert((e.target, e.target_port)));
        }
    }
}
