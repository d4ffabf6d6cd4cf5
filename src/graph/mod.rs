use std::{collections::HashMap, io, sync::Arc};

mod entities;
pub mod source;
pub use entities::*;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{gtfs, router::Router};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Node id {0} appears more than once")]
    DuplicateNode(Arc<str>),
    #[error("Edge {from} -> {to} has a negative or non-finite duration")]
    InvalidDuration { from: Arc<str>, to: Arc<str> },
    #[error("Edge {from} -> {to} has a departure that is not a number")]
    InvalidDeparture { from: Arc<str>, to: Arc<str> },
    #[error("Edge {from} -> {to} references a node that does not exist")]
    DanglingEdge { from: Arc<str>, to: Arc<str> },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Gtfs error: {0}")]
    Gtfs(#[from] gtfs::Error),
}

/// An outgoing edge with its target already resolved to a node index.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Link {
    pub edge: u32,
    pub to: u32,
}

/// Read-only snapshot of a transit network.
///
/// Node order is significant: when two nodes share the same arrival time the
/// router settles the one that comes first here.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Box<[Node]>,
    edges: Box<[Edge]>,

    node_lookup: HashMap<Arc<str>, u32>,
    // Per node, usable outgoing edges in edge order
    outgoing: Box<[Box<[Link]>]>,
    dangling: Box<[u32]>,
}

impl Graph {
    /// Builds the lookups for a node and edge set.
    ///
    /// Fails on duplicate node ids, on durations that are negative or not
    /// finite, and on departures that are NaN. Edges pointing at unknown nodes
    /// are kept but never traversed.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, self::Error> {
        let mut node_lookup: HashMap<Arc<str>, u32> = HashMap::with_capacity(nodes.len());
        let mut nodes = nodes;
        for (i, node) in nodes.iter_mut().enumerate() {
            node.index = i as u32;
            if node_lookup.insert(node.id.clone(), i as u32).is_some() {
                return Err(Error::DuplicateNode(node.id.clone()));
            }
        }

        let mut outgoing: Vec<Vec<Link>> = vec![Vec::new(); nodes.len()];
        let mut dangling: Vec<u32> = Vec::new();
        for (i, edge) in edges.iter().enumerate() {
            if !edge.duration.is_valid() {
                return Err(Error::InvalidDuration {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
            if edge.departure.is_some_and(|departure| departure.is_nan()) {
                return Err(Error::InvalidDeparture {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
            match (
                node_lookup.get(edge.from.as_ref()),
                node_lookup.get(edge.to.as_ref()),
            ) {
                (Some(from), Some(to)) => outgoing[*from as usize].push(Link {
                    edge: i as u32,
                    to: *to,
                }),
                _ => dangling.push(i as u32),
            }
        }
        if !dangling.is_empty() {
            warn!(
                "{} edges reference unknown nodes and will not be used",
                dangling.len()
            );
        }
        debug!("Built graph with {} nodes and {} edges", nodes.len(), edges.len());

        Ok(Self {
            nodes: nodes.into(),
            edges: edges.into(),
            node_lookup,
            outgoing: outgoing.into_iter().map(|links| links.into()).collect(),
            dangling: dangling.into(),
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.node_index(id).map(|index| &self.nodes[index as usize])
    }

    pub fn node_index(&self, id: &str) -> Option<u32> {
        self.node_lookup.get(id).copied()
    }

    /// Usable edges leaving `id`, in edge order.
    pub fn outgoing_edges(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.node_index(id)
            .map(|index| self.outgoing(index))
            .unwrap_or_default()
            .iter()
            .map(|link| &self.edges[link.edge as usize])
    }

    /// Edges whose `from` or `to` is not a known node.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.dangling.iter().map(|i| &self.edges[*i as usize])
    }

    /// Strict validation: rejects the graph if any edge is dangling.
    pub fn check_integrity(&self) -> Result<(), self::Error> {
        match self.dangling_edges().next() {
            Some(edge) => Err(Error::DanglingEdge {
                from: edge.from.clone(),
                to: edge.to.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn router<'a>(&'a self, from: &'a str, to: &'a str) -> Router<'a> {
        Router::new(self, from, to)
    }

    pub(crate) fn outgoing(&self, index: u32) -> &[Link] {
        &self.outgoing[index as usize]
    }

    pub(crate) fn edge(&self, index: u32) -> &Edge {
        &self.edges[index as usize]
    }

    pub(crate) fn node(&self, index: u32) -> &Node {
        &self.nodes[index as usize]
    }
}

#[test]
fn duplicate_nodes_are_rejected() {
    let nodes = vec![Node::new("A"), Node::new("A")];
    assert!(matches!(
        Graph::new(nodes, vec![]),
        Err(Error::DuplicateNode(id)) if id.as_ref() == "A"
    ));
}

#[test]
fn negative_duration_is_rejected() {
    let nodes = vec![Node::new("A"), Node::new("B")];
    let edges = vec![Edge::ride("A", "B", (-1.0).into())];
    assert!(matches!(
        Graph::new(nodes, edges),
        Err(Error::InvalidDuration { .. })
    ));
}

#[test]
fn dangling_edges_are_unusable() {
    let nodes = vec![Node::new("A"), Node::new("B")];
    let edges = vec![
        Edge::ride("A", "Z", 1.0.into()),
        Edge::ride("A", "B", 2.0.into()),
    ];
    let graph = Graph::new(nodes, edges).unwrap();
    assert_eq!(graph.outgoing_edges("A").count(), 1);
    assert_eq!(graph.dangling_edges().count(), 1);
    assert!(matches!(
        graph.check_integrity(),
        Err(Error::DanglingEdge { .. })
    ));
}
