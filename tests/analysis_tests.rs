use metroute::prelude::*;

fn fixture() -> Graph {
    Graph::from_json_file(format!(
        "{}/tests/fixtures/metro.json",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

#[test]
fn isolated_node_splits_components() {
    let graph = fixture();
    let components = components(&graph);
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].len(), 5);
    assert_eq!(components[1][0].as_ref(), "F");
    assert!(!is_connected(&graph));
}

#[test]
fn direction_is_ignored() {
    let nodes = vec![Node::new("A"), Node::new("B"), Node::new("C")];
    let edges = vec![
        Edge::ride("A", "B", 1.0.into()),
        Edge::ride("C", "B", 1.0.into()),
    ];
    let graph = Graph::new(nodes, edges).unwrap();
    assert!(is_connected(&graph));
}

#[test]
fn empty_graph_is_not_connected() {
    let graph = Graph::new(vec![], vec![]).unwrap();
    assert!(!is_connected(&graph));
    assert!(components(&graph).is_empty());
}

#[test]
fn spanning_forest_of_fixture() {
    let graph = fixture();
    let forest = minimum_spanning_forest(&graph);
    let edges: Vec<(&str, &str, f64)> = forest
        .edges
        .iter()
        .map(|edge| (edge.from.as_ref(), edge.to.as_ref(), edge.weight.as_seconds()))
        .collect();
    assert_eq!(
        edges,
        [
            ("B", "C", 3.0),
            ("D", "E", 4.0),
            ("A", "B", 5.0),
            ("C", "D", 20.0)
        ]
    );
    assert_eq!(forest.total_weight, Duration::from_seconds(32.0));
}

#[test]
fn spanning_forest_uses_cheapest_direction() {
    let nodes = vec![Node::new("A"), Node::new("B")];
    let edges = vec![
        Edge::ride("A", "B", 9.0.into()),
        Edge::transfer("B", "A", 2.0.into()),
    ];
    let graph = Graph::new(nodes, edges).unwrap();
    let forest = minimum_spanning_forest(&graph);
    assert_eq!(forest.edges.len(), 1);
    assert_eq!(forest.total_weight, Duration::from_seconds(2.0));
}
