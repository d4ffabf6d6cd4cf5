use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
    time::Instant,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{self, Edge, Graph, Node};

/// The on-disk layout of a graph: `{ "nodes": [...], "edges": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
}

impl TryFrom<Snapshot> for Graph {
    type Error = graph::Error;

    fn try_from(value: Snapshot) -> Result<Self, Self::Error> {
        Graph::new(value.nodes, value.edges)
    }
}

impl Graph {
    pub fn from_json_str(json: &str) -> Result<Self, graph::Error> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.try_into()
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, graph::Error> {
        let snapshot: Snapshot = serde_json::from_reader(reader)?;
        snapshot.try_into()
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, graph::Error> {
        debug!("Loading graph from {}...", path.as_ref().display());
        let now = Instant::now();
        let file = File::open(path)?;
        let graph = Self::from_json_reader(BufReader::new(file))?;
        debug!("Loading graph took {:?}", now.elapsed());
        Ok(graph)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), graph::Error> {
        let snapshot = SnapshotRef {
            nodes: self.nodes(),
            edges: self.edges(),
        };
        serde_json::to_writer_pretty(writer, &snapshot)?;
        Ok(())
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), graph::Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[test]
fn reads_snapshot_with_metadata() {
    let json = r#"{
        "nodes": [
            { "id": "A", "name": "Alpha", "line": "1", "x": 48.8, "y": 2.3 },
            { "id": "B" }
        ],
        "edges": [
            { "from": "A", "to": "B", "duration": 90, "type": "ride", "line": "1" },
            { "from": "B", "to": "A", "duration": 120, "type": "transfer" },
            { "from": "B", "to": "A", "duration": 60, "departure": 300 }
        ]
    }"#;
    let graph = Graph::from_json_str(json).unwrap();
    let alpha = graph.node_by_id("A").unwrap();
    assert_eq!(alpha.name.as_deref(), Some("Alpha"));
    assert_eq!(alpha.metadata["line"], "1");
    assert_eq!(graph.edges()[1].edge_type, crate::graph::EdgeType::Transfer);
    assert_eq!(graph.edges()[2].edge_type, crate::graph::EdgeType::Ride);
    assert_eq!(graph.edges()[2].departure, Some(300.0.into()));
}
