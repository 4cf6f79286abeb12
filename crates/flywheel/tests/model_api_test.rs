//! Integration tests for the document-loading path and the adapter API.
//!
//! These tests drive the model the way the editor does: write a JSON
//! document to disk, load it through the parser seam, and query the
//! resulting tree through addresses only.

use std::{cell::RefCell, io::Write, rc::Rc};

use tempfile::NamedTempFile;

use flywheel::{
    ModelError, TreeModel,
    document::JsonDocumentSource,
    model::{Address, CellValue, Role},
    observer::ModelObserver,
};

const LIGHT_DOCUMENT: &str = r#"{
    "format_version": "1.0",
    "name": "Light",
    "nodes": [
        {
            "kind": "state",
            "id": "top",
            "children": [
                { "kind": "state", "id": "s1", "title": "Off" },
                { "kind": "state", "id": "s2", "title": "On" }
            ]
        }
    ],
    "edges": [
        { "id": "e1", "source": "s1", "target": "s2", "action": "turn_on" }
    ]
}"#;

fn write_document(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file should be creatable");
    file.write_all(content.as_bytes())
        .expect("fixture should write");
    file
}

fn load(content: &str) -> (TreeModel, Result<(), ModelError>) {
    let file = write_document(content);
    let mut model = TreeModel::new();
    let result = model.load_document(&JsonDocumentSource, file.path());
    (model, result)
}

fn display_text(model: &TreeModel, address: Address) -> String {
    match model.data(address, Role::Display) {
        Some(CellValue::Text(text)) => text,
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_light_scenario_through_addresses() {
    let (model, result) = load(LIGHT_DOCUMENT);
    result.expect("document should load");

    assert_eq!(model.format_version(), "1.0");
    assert_eq!(model.machine_name(), "Light");
    assert_eq!(display_text(&model, model.machine_address()), "Light");

    let states = model.states_root_address();
    assert_eq!(model.row_count(Some(states)), 2);
    let s1 = model.address(0, 0, Some(states)).unwrap();
    let s2 = model.address(1, 0, Some(states)).unwrap();
    assert_eq!(display_text(&model, s1), "Off");
    assert_eq!(display_text(&model, s2), "On");

    let transitions = model.transitions_root_address();
    assert_eq!(model.row_count(Some(transitions)), 1);
    let t = model.address(0, 0, Some(transitions)).unwrap();
    assert!(model.is_transition(t));
    assert_eq!(display_text(&model, t), "turn_on");

    let endpoints = model
        .tree()
        .get(t.item())
        .unwrap()
        .data()
        .endpoints()
        .unwrap();
    assert_eq!(endpoints, (s1.item(), s2.item()));
}

#[test]
fn test_unknown_edge_endpoint_leaves_empty_tree() {
    let broken = LIGHT_DOCUMENT.replace("\"target\": \"s2\"", "\"target\": \"s3\"");
    let (model, result) = load(&broken);

    match result {
        Err(ModelError::UnresolvedEndpoint { edge }) => assert_eq!(edge, "e1"),
        other => panic!("expected unresolved endpoint, got {other:?}"),
    }

    // Full abort: both aggregations are empty, nothing partial survived.
    assert_eq!(model.row_count(Some(model.states_root_address())), 0);
    assert_eq!(model.row_count(Some(model.transitions_root_address())), 0);
    assert!(model.index().is_empty());
}

#[test]
fn test_unreadable_and_malformed_documents_leave_empty_tree() {
    let mut model = TreeModel::new();
    let missing = std::path::Path::new("definitely/not/here.json");
    assert!(matches!(
        model.load_document(&JsonDocumentSource, missing),
        Err(ModelError::Read { .. })
    ));

    let (model, result) = load("{ this is not json");
    assert!(matches!(result, Err(ModelError::Parse(_))));
    assert_eq!(model.row_count(Some(model.states_root_address())), 0);
}

#[test]
fn test_reload_invalidates_previous_generation() {
    let file = write_document(LIGHT_DOCUMENT);
    let mut model = TreeModel::new();
    model
        .load_document(&JsonDocumentSource, file.path())
        .unwrap();

    let states = model.states_root_address();
    let stale = model.address(0, 0, Some(states)).unwrap();
    let stale_item = stale.item();

    model
        .load_document(&JsonDocumentSource, file.path())
        .unwrap();

    // Addresses and handles from the first generation resolve to nothing.
    assert_eq!(model.data(stale, Role::Display), None);
    assert_eq!(model.address_of(stale_item), None);

    // The fresh generation is fully queryable.
    let states = model.states_root_address();
    let fresh = model.address(0, 0, Some(states)).unwrap();
    assert_eq!(display_text(&model, fresh), "Off");
}

#[test]
fn test_ownership_invariant_after_load_and_moves() {
    let (mut model, result) = load(LIGHT_DOCUMENT);
    result.unwrap();

    let assert_invariant = |model: &TreeModel| {
        let tree = model.tree();
        let child_sum: usize = tree.iter().map(|(_, item)| item.children().len()).sum();
        assert_eq!(child_sum + 1, tree.len());
        let rootless = tree
            .iter()
            .filter(|(_, item)| item.parent().is_none())
            .count();
        assert_eq!(rootless, 1);
    };
    assert_invariant(&model);

    let s1 = model.id_to_item("s1").unwrap();
    let s2 = model.id_to_item("s2").unwrap();
    model.move_item(s1, Some(s2)).unwrap();
    assert_invariant(&model);
    model.move_item(s1, None).unwrap();
    assert_invariant(&model);
}

#[test]
fn test_identifiers_stay_stable_across_moves() {
    let (mut model, result) = load(LIGHT_DOCUMENT);
    result.unwrap();

    let s1 = model.id_to_item("s1").unwrap();
    let s2 = model.id_to_item("s2").unwrap();
    model.move_item(s1, Some(s2)).unwrap();

    assert_eq!(model.id_to_item("s1"), Some(s1));
    assert_eq!(model.index().len(), 2);
}

#[test]
fn test_drag_and_drop_roundtrip_through_payload() {
    let (mut model, result) = load(LIGHT_DOCUMENT);
    result.unwrap();

    let states = model.states_root_address();
    let s1 = model.address(0, 0, Some(states)).unwrap();
    let s2 = model.address(1, 0, Some(states)).unwrap();

    let payload = model.drag_payload(&[s1]);
    model
        .drop_payload(&payload, s2)
        .expect("drop onto a state should apply");

    // s1 now nests under s2; the aggregation renumbered.
    assert_eq!(model.row_count(Some(states)), 1);
    let s2 = model.address(0, 0, Some(states)).unwrap();
    assert_eq!(display_text(&model, s2), "On");
    let nested = model.address(0, 0, Some(s2)).unwrap();
    assert_eq!(display_text(&model, nested), "Off");
}

/// Counts reset pairs so load bracketing can be asserted.
#[derive(Default)]
struct ResetCounter {
    begun: RefCell<usize>,
    finished: RefCell<usize>,
}

impl ModelObserver for ResetCounter {
    fn reset_about_to_happen(&self) {
        *self.begun.borrow_mut() += 1;
    }
    fn reset_finished(&self) {
        *self.finished.borrow_mut() += 1;
    }
}

#[test]
fn test_load_brackets_one_reset_pair_even_on_failure() {
    let counter = Rc::new(ResetCounter::default());

    let file = write_document(LIGHT_DOCUMENT);
    let mut model = TreeModel::new();
    model.add_observer(counter.clone());
    model
        .load_document(&JsonDocumentSource, file.path())
        .unwrap();
    assert_eq!(*counter.begun.borrow(), 1);
    assert_eq!(*counter.finished.borrow(), 1);

    let broken = write_document("{ broken");
    let _ = model.load_document(&JsonDocumentSource, broken.path());
    assert_eq!(*counter.begun.borrow(), 2);
    assert_eq!(*counter.finished.borrow(), 2);
}
