use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    graph::{EdgeType, Graph},
    router::state::State,
    shared::time::Time,
};

/// One edge taken on the way to the destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub from: Arc<str>,
    pub to: Arc<str>,
    /// Line of the edge, `?` when it has none.
    pub line: Arc<str>,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// When the edge was boarded, after any wait.
    pub departure: Time,
    /// Arrival at `to`.
    pub arrival: Time,
}

/// Consecutive steps on the same line and of the same type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub from: Arc<str>,
    pub to: Arc<str>,
    pub line: Arc<str>,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    pub departure: Time,
    pub arrival: Time,
    /// Every node passed, both ends included.
    pub stops: Vec<Arc<str>>,
}

/// Outcome of an earliest arrival search.
///
/// `total` is `None` when the destination cannot be reached. In that case
/// `path` only holds the start and `steps` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub path: Vec<Arc<str>>,
    pub total: Option<Time>,
    pub steps: Vec<Step>,
}

impl Itinerary {
    pub(crate) fn unreachable(from: &str) -> Self {
        Self {
            path: vec![from.into()],
            total: None,
            steps: vec![],
        }
    }

    pub(crate) fn trivial(from: &str, departure: Time) -> Self {
        Self {
            path: vec![from.into()],
            total: departure.is_finite().then_some(departure),
            steps: vec![],
        }
    }

    /// Walks parents back from `target` and prepends `start`.
    pub(crate) fn backtrack(graph: &Graph, state: &State, start: &str, target: u32) -> Self {
        let mut steps: Vec<Step> = Vec::new();
        let mut current = target;
        while let Some(parent) = state.parents[current as usize] {
            let edge = graph.edge(parent.edge);
            steps.push(Step {
                from: graph.node(parent.from).id.clone(),
                to: graph.node(current).id.clone(),
                line: edge.line_label(),
                edge_type: edge.edge_type,
                departure: parent.departure_time,
                arrival: state.arrival[current as usize],
            });
            current = parent.from;
        }
        steps.reverse();

        let arrival = state.arrival[target as usize];
        let mut path: Vec<Arc<str>> = Vec::with_capacity(steps.len() + 1);
        path.push(start.into());
        path.extend(steps.iter().map(|step| step.to.clone()));
        Self {
            path,
            total: arrival.is_finite().then_some(arrival),
            steps,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.total.is_some()
    }

    /// Groups the steps into rideable legs.
    pub fn legs(&self) -> Vec<Leg> {
        let mut legs: Vec<Leg> = Vec::new();
        for step in self.steps.iter() {
            match legs.last_mut() {
                Some(leg) if leg.line == step.line && leg.edge_type == step.edge_type => {
                    leg.to = step.to.clone();
                    leg.arrival = step.arrival;
                    leg.stops.push(step.to.clone());
                }
                _ => legs.push(Leg {
                    from: step.from.clone(),
                    to: step.to.clone(),
                    line: step.line.clone(),
                    edge_type: step.edge_type,
                    departure: step.departure,
                    arrival: step.arrival,
                    stops: vec![step.from.clone(), step.to.clone()],
                }),
            }
        }
        legs
    }
}

#[test]
fn legs_merge_same_line() {
    let step = |from: &str, to: &str, line: &str, edge_type, arrival: f64| Step {
        from: from.into(),
        to: to.into(),
        line: line.into(),
        edge_type,
        departure: (arrival - 1.0).into(),
        arrival: arrival.into(),
    };
    let itinerary = Itinerary {
        path: ["A", "B", "C", "D"].into_iter().map(Arc::from).collect(),
        total: Some(30.0.into()),
        steps: vec![
            step("A", "B", "1", EdgeType::Ride, 10.0),
            step("B", "C", "1", EdgeType::Ride, 20.0),
            step("C", "D", "?", EdgeType::Transfer, 30.0),
        ],
    };
    let legs = itinerary.legs();
    assert_eq!(legs.len(), 2);
    assert_eq!(legs[0].stops.len(), 3);
    assert_eq!(legs[0].departure, Time::from_seconds(9.0));
    assert_eq!(legs[0].arrival, Time::from_seconds(20.0));
    assert_eq!(legs[1].edge_type, EdgeType::Transfer);
}
