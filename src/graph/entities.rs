use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::shared::time::{Duration, Time};

/// A station or platform in the network.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// The internal index used for O(1) array lookups in the graph.
    #[serde(skip)]
    pub index: u32,
    /// The unique external identifier.
    pub id: Arc<str>,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Arc<str>>,
    /// Caller supplied display data. Never read by the router.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Controls how long a traveller waits before an edge can be used.
///
/// Any tag other than `transfer` reads as [`EdgeType::Ride`], so feeds with
/// extra kinds such as `walk` still load and follow the scheduled wait rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// A scheduled ride. Waits for `departure` when one is set.
    #[default]
    Ride,
    /// A walking connection, always usable immediately.
    Transfer,
}

impl<'de> Deserialize<'de> for EdgeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "transfer" => EdgeType::Transfer,
            _ => EdgeType::Ride,
        })
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeType::Ride => f.write_str("ride"),
            EdgeType::Transfer => f.write_str("transfer"),
        }
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: Arc<str>,
    pub to: Arc<str>,
    /// Travel time once the edge has been boarded.
    pub duration: Duration,
    /// Scheduled departure, only meaningful for rides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<Time>,
    #[serde(rename = "type", default)]
    pub edge_type: EdgeType,
    /// Display label carried through to itineraries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Arc<str>>,
}

impl Edge {
    pub fn ride(from: impl Into<Arc<str>>, to: impl Into<Arc<str>>, duration: Duration) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            duration,
            departure: None,
            edge_type: EdgeType::Ride,
            line: None,
        }
    }

    pub fn transfer(from: impl Into<Arc<str>>, to: impl Into<Arc<str>>, duration: Duration) -> Self {
        Self {
            edge_type: EdgeType::Transfer,
            ..Self::ride(from, to, duration)
        }
    }

    pub fn departing_at(mut self, departure: Time) -> Self {
        self.departure = Some(departure);
        self
    }

    pub fn on_line(mut self, line: impl Into<Arc<str>>) -> Self {
        self.line = Some(line.into());
        self
    }

    /// How long someone standing at `from` at time `at` waits before boarding.
    pub fn wait(&self, at: Time) -> Duration {
        match (self.edge_type, self.departure) {
            (EdgeType::Transfer, _) | (EdgeType::Ride, None) => Duration::ZERO,
            (EdgeType::Ride, Some(departure)) => (departure - at).at_least_zero(),
        }
    }

    /// Label shown to riders, `?` when the edge has none.
    pub fn line_label(&self) -> Arc<str> {
        match &self.line {
            Some(line) if !line.is_empty() => line.clone(),
            _ => "?".into(),
        }
    }
}

#[test]
fn ride_waits_for_departure() {
    let edge = Edge::ride("A", "B", 10.0.into()).departing_at(100.0.into());
    assert_eq!(edge.wait(50.0.into()), Duration::from_seconds(50.0));
    assert_eq!(edge.wait(120.0.into()), Duration::ZERO);
}

#[test]
fn transfer_ignores_departure() {
    let mut edge = Edge::transfer("A", "B", 10.0.into());
    edge.departure = Some(100.0.into());
    assert_eq!(edge.wait(50.0.into()), Duration::ZERO);
}

#[test]
fn unscheduled_ride_leaves_immediately() {
    let edge = Edge::ride("A", "B", 5.0.into());
    assert_eq!(edge.wait(0.0.into()), Duration::ZERO);
}

#[test]
fn unknown_edge_tags_read_as_rides() {
    let edge: Edge = serde_json::from_str(
        r#"{ "from": "A", "to": "B", "duration": 10, "type": "walk", "departure": 100 }"#,
    )
    .unwrap();
    assert_eq!(edge.edge_type, EdgeType::Ride);
    assert_eq!(edge.wait(50.0.into()), Duration::from_seconds(50.0));
}
