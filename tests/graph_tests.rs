use metroute::{graph, prelude::*};

fn fixture() -> Graph {
    Graph::from_json_file(format!(
        "{}/tests/fixtures/metro.json",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

#[test]
fn loads_fixture() {
    let graph = fixture();
    assert_eq!(graph.nodes().len(), 6);
    assert_eq!(graph.edges().len(), 9);
    assert_eq!(graph.dangling_edges().count(), 1);

    let anvers = graph.node_by_id("A").unwrap();
    assert_eq!(anvers.index, 0);
    assert_eq!(anvers.name.as_deref(), Some("Anvers"));
    assert_eq!(anvers.metadata["line"], "2");

    let from_b: Vec<&str> = graph.outgoing_edges("B").map(|e| e.to.as_ref()).collect();
    assert_eq!(from_b, ["A", "C", "D"]);
    assert_eq!(graph.outgoing_edges("F").count(), 0);
    assert_eq!(graph.outgoing_edges("nowhere").count(), 0);
}

#[test]
fn strict_integrity_check_flags_dangling_edge() {
    let graph = fixture();
    match graph.check_integrity() {
        Err(graph::Error::DanglingEdge { from, to }) => {
            assert_eq!(from.as_ref(), "E");
            assert_eq!(to.as_ref(), "Z");
        }
        other => panic!("expected a dangling edge, got {other:?}"),
    }
}

#[test]
fn saved_snapshot_loads_back() {
    let graph = fixture();
    let mut buffer: Vec<u8> = Vec::new();
    graph.write_json(&mut buffer).unwrap();
    let reloaded = Graph::from_json_reader(buffer.as_slice()).unwrap();
    assert_eq!(reloaded.nodes(), graph.nodes());
    assert_eq!(reloaded.edges(), graph.edges());
}

#[test]
fn rejects_invalid_json_values() {
    let json = r#"{ "nodes": [{ "id": "A" }, { "id": "B" }],
                    "edges": [{ "from": "A", "to": "B", "duration": -3 }] }"#;
    assert!(matches!(
        Graph::from_json_str(json),
        Err(graph::Error::InvalidDuration { .. })
    ));

    let json = r#"{ "nodes": [{ "id": "A" }], "edges": [{ "from": "A", "to": "A" }] }"#;
    assert!(matches!(
        Graph::from_json_str(json),
        Err(graph::Error::Json(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    assert!(matches!(
        Graph::from_json_file("does/not/exist.json"),
        Err(graph::Error::Io(_))
    ));
}

#[test]
fn extra_edge_kinds_load_and_wait_like_rides() {
    let json = r#"{
        "nodes": [{ "id": "A" }, { "id": "B" }],
        "edges": [{ "from": "A", "to": "B", "duration": 10, "type": "walk", "departure": 100 }]
    }"#;
    let graph = Graph::from_json_str(json).unwrap();
    assert_eq!(graph.edges()[0].edge_type, EdgeType::Ride);
    let itinerary = earliest_arrival(&graph, "A", "B", Time::from_seconds(50.0)).unwrap();
    assert_eq!(itinerary.total, Some(Time::from_seconds(110.0)));
}
