//! Whole network diagnostics over the undirected view of a [`Graph`].
//!
//! Direction, schedules and edge types are ignored here. Only edges whose
//! endpoints both exist are considered.

mod disjoint_set;

use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{graph::Graph, shared::time::Duration};
use disjoint_set::DisjointSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanningEdge {
    pub from: Arc<str>,
    pub to: Arc<str>,
    pub weight: Duration,
}

/// A minimum spanning tree per connected component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanningForest {
    pub edges: Vec<SpanningEdge>,
    pub total_weight: Duration,
}

/// True when every node can reach every other ignoring direction.
/// An empty graph is not connected.
pub fn is_connected(graph: &Graph) -> bool {
    !graph.is_empty() && components(graph).len() == 1
}

/// Connected components ordered by their first node, members in node order.
pub fn components(graph: &Graph) -> Vec<Vec<Arc<str>>> {
    let mut set = DisjointSet::new(graph.len());
    for node in 0..graph.len() as u32 {
        for link in graph.outgoing(node) {
            set.union(node, link.to);
        }
    }

    let mut lookup: HashMap<u32, usize> = HashMap::new();
    let mut components: Vec<Vec<Arc<str>>> = Vec::new();
    for node in graph.nodes() {
        let root = set.find(node.index);
        let index = *lookup.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[index].push(node.id.clone());
    }
    debug!("Found {} components", components.len());
    components
}

/// Kruskal over the undirected view.
///
/// A node pair weighs as much as its cheapest edge in either direction.
/// Pairs of equal weight are taken in the order they first appear in the
/// edge list.
pub fn minimum_spanning_forest(graph: &Graph) -> SpanningForest {
    struct Pair {
        from: u32,
        to: u32,
        weight: Duration,
    }

    let mut lookup: HashMap<(u32, u32), usize> = HashMap::new();
    let mut pairs: Vec<Pair> = Vec::new();
    for edge in graph.edges() {
        let (Some(from), Some(to)) = (graph.node_index(&edge.from), graph.node_index(&edge.to))
        else {
            continue;
        };
        if from == to {
            continue;
        }
        let key = (from.min(to), from.max(to));
        match lookup.get(&key) {
            Some(&i) if edge.duration < pairs[i].weight => pairs[i].weight = edge.duration,
            Some(_) => {}
            None => {
                lookup.insert(key, pairs.len());
                pairs.push(Pair {
                    from,
                    to,
                    weight: edge.duration,
                });
            }
        }
    }
    pairs.sort_by(|a, b| a.weight.as_seconds().total_cmp(&b.weight.as_seconds()));

    let mut set = DisjointSet::new(graph.len());
    let mut forest = SpanningForest::default();
    for pair in pairs {
        if set.union(pair.from, pair.to) {
            forest.total_weight += pair.weight;
            forest.edges.push(SpanningEdge {
                from: graph.node(pair.from).id.clone(),
                to: graph.node(pair.to).id.clone(),
                weight: pair.weight,
            });
        }
    }
    debug!(
        "Spanning forest has {} edges weighing {}s",
        forest.edges.len(),
        forest.total_weight.as_seconds()
    );
    forest
}
