//! End-to-end translation scenarios over the fixture documents.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use fm_blockly::{
    DirectionError, MachineDocument, SchemaError, TranslationErrorKind, translate, translate_file,
};
use fm_functions::{FunctionKind, PumpDirection};
use fm_graph::{ContainerKind, Node};
use serde_json::{Value, json};

fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn document(blocks: Value) -> MachineDocument {
    serde_json::from_value(json!({
        "default_rate": "1",
        "default_rate_volume_units": "ml",
        "default_rate_time_units": "s",
        "integer_precission": "3",
        "decimal_precission": "2",
        "connections": blocks
    }))
    .unwrap()
}

fn container(reference: &str, ports: &[Value]) -> Value {
    let mut block = json!({
        "reference": reference,
        "type": "OPEN_CONTAINER",
        "number_pins": ports.len(),
        "functions": {
            "minVolume": "0", "minVolumeUnits": "ml",
            "maxVolume": "10", "maxVolumeUnits": "ml"
        },
        "extra_functions": null
    });
    for (i, port) in ports.iter().enumerate() {
        block[format!("port{}", i + 1)] = port.clone();
    }
    block
}

fn to(reference: &str) -> Value {
    json!({ "reference": reference })
}

#[test]
fn pump_edges_follow_declared_directions() {
    let (model, mapping) = translate_file(&data("pump_between_containers.json")).unwrap();
    let graph = model.graph();

    let a = mapping.id_of("A").unwrap();
    let p = mapping.id_of("P").unwrap();
    let b = mapping.id_of("B").unwrap();

    assert_eq!(graph.edges().len(), 2);
    let into_pump = graph.edges().iter().find(|e| e.target == p).unwrap();
    assert_eq!((into_pump.source, into_pump.target_port), (a, 0));
    let out_of_pump = graph.edges().iter().find(|e| e.source == p).unwrap();
    assert_eq!((out_of_pump.target, out_of_pump.source_port), (b, 1));

    match graph.node(p) {
        Some(Node::Pump(pump)) => assert_eq!(pump.direction, PumpDirection::Unidirectional),
        other => panic!("expected a pump, got {other:?}"),
    }
    match graph.node(b) {
        Some(Node::Container(c)) => assert_eq!(c.kind, ContainerKind::Closed),
        other => panic!("expected a container, got {other:?}"),
    }
    assert_eq!(
        mapping.functions_of(b),
        [FunctionKind::Heater, FunctionKind::TemperatureSensor]
    );
    assert_eq!(mapping.pumps(), [p]);
    assert_eq!(model.integer_precision(), 3);
}

#[test]
fn mutual_twins_form_one_group() {
    let (model, mapping) = translate_file(&data("twin_valves.json")).unwrap();
    let v1 = mapping.id_of("V1").unwrap();
    let v2 = mapping.id_of("V2").unwrap();

    let expected: BTreeSet<_> = [v1, v2].into_iter().collect();
    assert_eq!(model.graph().twin_groups(), [expected.clone()]);
    assert_eq!(mapping.twins(), [expected]);

    // Valves are wired before the containers that point back at them.
    assert_eq!(model.graph().edges().len(), 4);
    assert!(model.graph().edges().iter().all(|e| e.source == v1 || e.source == v2));
    for node in model.graph().nodes() {
        assert!(node.port_count() == 2);
    }
}

#[test]
fn missing_port_is_reported() {
    let err = translate_file(&data("missing_port.json")).unwrap_err();
    assert_eq!(
        err.as_schema(),
        Some(&SchemaError::MissingPort {
            block: "C".into(),
            port: "port2".into()
        })
    );
    assert!(err.to_string().contains("missing port: port2"));
    assert_eq!(err.frames(), ["translate", "block 'C'"]);
}

#[test]
fn unknown_node_type_is_reported() {
    let err = translate_file(&data("unknown_type.json")).unwrap_err();
    assert!(err.to_string().contains("unknown node type: FILTER"));
    assert!(matches!(
        err.as_schema(),
        Some(SchemaError::UnknownNodeType { tag, .. }) if tag == "FILTER"
    ));
}

#[test]
fn out_port_points_edge_away() {
    let mut doc = document(json!([
        container("N", &[to("T"), to("T2")]),
        container("T", &[to("N")]),
        container("T2", &[to("N")])
    ]));
    let blocks = doc.connections.as_mut().unwrap();
    blocks[0].in_ports = Some(vec![1.0.into()]);
    blocks[0].out_ports = Some(vec![2.0.into()]);

    let (model, mapping) = translate(&doc).unwrap();
    let n = mapping.id_of("N").unwrap();
    let t2 = mapping.id_of("T2").unwrap();
    let edge = model
        .graph()
        .edges()
        .iter()
        .find(|e| e.touches(t2))
        .copied()
        .unwrap();
    assert_eq!((edge.source, edge.source_port), (n, 1));
    assert_eq!(edge.target, t2);
}

#[test]
fn undeclared_port_on_directed_node() {
    let mut doc = document(json!([
        container("N", &[to("T"), to("T2")]),
        container("T", &[to("N")]),
        container("T2", &[to("N")])
    ]));
    let blocks = doc.connections.as_mut().unwrap();
    blocks[0].in_ports = Some(vec![1.0.into()]);
    blocks[0].out_ports = Some(Vec::new());

    let err = translate(&doc).unwrap_err();
    assert_eq!(err.frames(), ["translate", "resolve connections"]);
    assert!(matches!(
        err.kind(),
        TranslationErrorKind::Direction(DirectionError::UndeclaredPort { port: 1, .. })
    ));
}

#[test]
fn one_sided_wiring_is_rejected() {
    let doc = document(json!([
        container("A", &[to("B")]),
        container("B", &[to("C")]),
        container("C", &[to("B")])
    ]));
    let err = translate(&doc).unwrap_err();
    assert_eq!(
        err.as_schema(),
        Some(&SchemaError::MissingMirror {
            from: "A".into(),
            to: "B".into()
        })
    );
}

#[test]
fn reference_without_block_is_undefined() {
    let doc = document(json!([container("A", &[to("ghost")])]));
    let err = translate(&doc).unwrap_err();
    assert_eq!(
        err.as_schema(),
        Some(&SchemaError::UndefinedReference {
            reference: "ghost".into()
        })
    );
}

#[test]
fn twin_must_be_a_valve() {
    let valve = json!({
        "reference": "V",
        "type": "VALVE",
        "number_pins": 1,
        "functions": {
            "block_type": "v", "type": "Pinch", "paramsNumber": 0, "truthTable": []
        },
        "number_twins": 1,
        "twin1": { "reference": "A" },
        "port1": { "reference": "A" }
    });
    let doc = document(json!([valve, container("A", &[to("V")])]));
    let err = translate(&doc).unwrap_err();
    assert_eq!(err.frames(), ["translate", "apply twins"]);
    assert!(matches!(err.kind(), TranslationErrorKind::Graph(_)));
}

#[test]
fn repeated_translation_starts_fresh() {
    let doc = document(json!([
        container("B", &[to("A")]),
        container("A", &[to("B")])
    ]));
    let (_, first) = translate(&doc).unwrap();
    let (_, second) = translate(&doc).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.id_of("B").unwrap().index(), 0);
}

fn valve(reference: &str, ports: &[Value]) -> Value {
    let mut block = json!({
        "reference": reference,
        "type": "VALVE",
        "number_pins": ports.len(),
        "functions": {
            "block_type": "v", "type": "Pinch", "paramsNumber": 0, "truthTable": []
        }
    });
    for (i, port) in ports.iter().enumerate() {
        block[format!("port{}", i + 1)] = port.clone();
    }
    block
}

#[test]
fn block_wired_to_itself_is_rejected() {
    let doc = document(json!([container("A", &[to("A")])]));
    let err = translate(&doc).unwrap_err();
    assert_eq!(err.frames(), ["translate", "resolve connections"]);
    assert_eq!(
        err.as_schema(),
        Some(&SchemaError::SelfConnection { block: "A".into() })
    );
    assert!(err.to_string().contains("wired to itself"));
}

#[test]
fn reused_reference_is_rejected() {
    let doc = document(json!([
        container("A", &[to("B")]),
        container("A", &[to("B")]),
        container("B", &[to("A")])
    ]));
    let err = translate(&doc).unwrap_err();
    assert_eq!(err.frames(), ["translate", "block 'A'"]);
    assert_eq!(
        err.as_schema(),
        Some(&SchemaError::DuplicateReference {
            reference: "A".into()
        })
    );
}

#[test]
fn declared_twin_slot_must_exist() {
    let mut v1 = valve("V1", &[to("A")]);
    v1["functions"]["number_twins"] = json!(2);
    v1["functions"]["twin1"] = to("V2");
    let doc = document(json!([
        v1,
        valve("V2", &[to("A")]),
        container("A", &[to("V1"), to("V2")])
    ]));

    let err = translate(&doc).unwrap_err();
    assert_eq!(err.frames(), ["translate", "block 'V1'", "twins"]);
    assert_eq!(
        err.as_schema(),
        Some(&SchemaError::MissingField {
            block: Some("V1".into()),
            field: "twin2".into()
        })
    );
}

#[test]
fn block_level_twins_resolve_through_copies() {
    let plain = document(json!([
        valve("V2", &[to("A")]),
        valve("V1", &[to("A")]),
        container("A", &[to("V1"), to("V2")])
    ]));

    let mut v1 = valve("V1", &[to("A")]);
    v1["number_twins"] = json!("1");
    v1["twin1"] = json!({ "copy": { "reference": "V2" } });
    let twinned = document(json!([
        valve("V2", &[to("A")]),
        v1,
        container("A", &[to("V1"), to("V2")])
    ]));

    let (model, mapping) = translate(&twinned).unwrap();
    let v1 = mapping.id_of("V1").unwrap();
    let v2 = mapping.id_of("V2").unwrap();
    let group: BTreeSet<_> = [v1, v2].into_iter().collect();
    assert_eq!(model.graph().twin_groups(), [group.clone()]);
    assert_eq!(model.graph().twins_of(v2), Some(&group));

    // Twins leave nodes and wiring exactly as they were.
    let (without, _) = translate(&plain).unwrap();
    assert!(without.graph().twin_groups().is_empty());
    assert!(model.graph().nodes().eq(without.graph().nodes()));
    assert_eq!(model.graph().edges(), without.graph().edges());
}

#[test]
fn port_lists_stay_within_pin_count() {
    for bad in [0.0, 3.0] {
        let mut doc = document(json!([
            container("N", &[to("T"), to("T2")]),
            container("T", &[to("N")]),
            container("T2", &[to("N")])
        ]));
        let blocks = doc.connections.as_mut().unwrap();
        blocks[0].in_ports = Some(vec![bad.into()]);
        blocks[0].out_ports = Some(vec![2.0.into()]);

        let err = translate(&doc).unwrap_err();
        assert_eq!(err.frames(), ["translate", "block 'N'"]);
        assert!(matches!(
            err.as_schema(),
            Some(SchemaError::InvalidPortList { block, reason })
                if block == "N" && reason.contains(&format!("port {bad}"))
        ));
    }
}
