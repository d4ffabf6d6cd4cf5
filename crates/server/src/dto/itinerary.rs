use metroute::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItineraryDto {
    pub path: Vec<Arc<str>>,
    pub reachable: bool,
    /// Seconds, `None` when the destination cannot be reached.
    pub total: Option<f64>,
    pub total_hms: Option<String>,
    pub steps: Vec<StepDto>,
    pub legs: Vec<LegDto>,
}

impl From<Itinerary> for ItineraryDto {
    fn from(itinerary: Itinerary) -> Self {
        let legs = itinerary.legs().into_iter().map(LegDto::from).collect();
        Self {
            reachable: itinerary.is_reachable(),
            total: itinerary.total.map(|total| total.as_seconds()),
            total_hms: itinerary.total.map(|total| total.to_hms_string()),
            steps: itinerary.steps.into_iter().map(StepDto::from).collect(),
            path: itinerary.path,
            legs,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepDto {
    pub from: Arc<str>,
    pub to: Arc<str>,
    pub line: Arc<str>,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    pub departure: f64,
    pub arrival: f64,
    pub arrival_hms: String,
}

impl From<Step> for StepDto {
    fn from(step: Step) -> Self {
        Self {
            from: step.from,
            to: step.to,
            line: step.line,
            edge_type: step.edge_type,
            departure: step.departure.as_seconds(),
            arrival: step.arrival.as_seconds(),
            arrival_hms: step.arrival.to_hms_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LegDto {
    pub from: Arc<str>,
    pub to: Arc<str>,
    pub line: Arc<str>,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    pub departure_hms: String,
    pub arrival_hms: String,
    pub stops: Vec<Arc<str>>,
}

impl From<Leg> for LegDto {
    fn from(leg: Leg) -> Self {
        Self {
            from: leg.from,
            to: leg.to,
            line: leg.line,
            edge_type: leg.edge_type,
            departure_hms: leg.departure.to_hms_string(),
            arrival_hms: leg.arrival.to_hms_string(),
            stops: leg.stops,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ShortestPathRequest {
    pub source: String,
    pub destination: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ShortestPathDto {
    pub path: Vec<Arc<str>>,
    pub total_time: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorDto {
    pub error: &'static str,
}
