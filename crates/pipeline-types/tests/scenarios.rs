//! End-to-end scenarios driving the store the way the editor does.

use pipeline_types::{
    ComponentType, ConnectRequest, ConnectionType, Pipeline, PipelineStore, Position, Selection,
};

#[test]
fn build_wire_and_prune_a_small_graph() {
    let mut store = PipelineStore::new();

    let prompt = store.add_node(ComponentType::Prompt, Position::new(300.0, 100.0));
    let llm = store.add_node(ComponentType::Llm, Position::new(100.0, 100.0));

    // Direction follows the ports, not the gesture or the layout.
    let conn = store
        .connect(ConnectRequest {
            source: prompt,
            target: llm,
            source_handle: Some("prompt".into()),
            target_handle: Some("prompt".into()),
            kind: Some(ConnectionType::Text),
            label: None,
        })
        .unwrap();

    let edge = store.pipeline().connection(conn).unwrap();
    assert_eq!(edge.source, prompt);
    assert_eq!(edge.target, llm);

    store.remove_node(llm);
    assert_eq!(store.nodes().len(), 1);
    assert!(store.connections().is_empty());
    assert!(store.pipeline().node(prompt).is_some());
}

#[test]
fn import_an_empty_document_clears_the_canvas() {
    let mut store = PipelineStore::new();
    store.add_node(ComponentType::VectorDb, Position::new(50.0, 50.0));
    store.add_node(ComponentType::Embedding, Position::new(250.0, 50.0));

    let document = Pipeline::new("Empty").to_json().unwrap();
    store.import_json(&document).unwrap();

    assert_eq!(store.name(), "Empty");
    assert!(store.nodes().is_empty());
    assert!(store.connections().is_empty());
    assert_eq!(store.selection(), Selection::None);
}

#[test]
fn exported_document_round_trips_through_import() {
    let mut store = PipelineStore::new();
    store.rename("Retrieval Demo");
    let chunk = store.add_node(ComponentType::Chunking, Position::new(0.0, 0.0));
    let embed = store.add_node(ComponentType::Embedding, Position::new(250.0, 0.0));
    store
        .connect(ConnectRequest {
            source: chunk,
            target: embed,
            source_handle: Some("chunks".into()),
            target_handle: Some("text".into()),
            kind: None,
            label: Some("chunks".into()),
        })
        .unwrap();

    let json = store.export_json().unwrap();
    let mut fresh = PipelineStore::new();
    fresh.import_json(&json).unwrap();

    assert_eq!(fresh.name(), "Retrieval Demo");
    assert_eq!(fresh.nodes().len(), 2);
    assert_eq!(fresh.connections().len(), 1);
    assert_eq!(fresh.connections()[0].kind, ConnectionType::Data);
    assert_eq!(fresh.export_file_name(), "Retrieval_Demo.json");
}
