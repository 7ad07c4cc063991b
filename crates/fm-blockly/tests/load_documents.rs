//! Loading documents from disk in either format.

use std::path::{Path, PathBuf};

use fm_blockly::{TranslationErrorKind, load_document, load_json, translate_file};
use fm_functions::FunctionKind;

fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn fixtures_load() {
    for name in [
        "pump_between_containers.json",
        "twin_valves.json",
        "missing_port.json",
        "unknown_type.json",
        "copied_flask.yaml",
    ] {
        load_document(&data(name)).unwrap_or_else(|e| panic!("Failed to load {name}: {e}"));
    }
}

#[test]
fn yaml_machine_with_copies() {
    let (model, mapping) = translate_file(&data("copied_flask.yaml")).unwrap();
    let graph = model.graph();
    let flask = mapping.id_of("flask").unwrap();
    let rotary = mapping.id_of("rotary").unwrap();
    let waste = mapping.id_of("waste").unwrap();

    // The copy link between flask and rotary collapses onto the direct one.
    assert_eq!(graph.edges().len(), 3);
    assert!(graph.are_connected(flask, rotary));
    assert!(graph.are_connected(rotary, waste));
    assert!(graph.are_connected(flask, waste));
    assert!(!graph.is_port_used(flask, 1));

    assert_eq!(mapping.valves(), [rotary]);
    assert_eq!(mapping.functions_of(flask), [FunctionKind::Stirer]);
    assert_eq!(model.decimal_precision(), 2);
}

#[test]
fn missing_file_has_load_frame() {
    let err = load_json(&data("no_such_file.json")).unwrap_err();
    assert!(err.frames()[0].starts_with("load"));
    assert!(matches!(err.kind(), TranslationErrorKind::Io(_)));
}

#[test]
fn unknown_extension_rejected() {
    let err = load_document(Path::new("machine.xml")).unwrap_err();
    assert!(matches!(
        err.kind(),
        TranslationErrorKind::UnsupportedFormat(ext) if ext == "xml"
    ));
}
