pub mod analysis;
pub mod graph;
pub mod gtfs;
pub mod router;
pub mod shared;

pub mod prelude {
    pub use crate::analysis::{SpanningForest, components, is_connected, minimum_spanning_forest};
    pub use crate::graph::{Edge, EdgeType, Graph, Node};
    pub use crate::gtfs::{Config, GtfsReader, Timetable};
    pub use crate::router::{Itinerary, Leg, Router, Step, earliest_arrival};
    pub use crate::shared::time::{Duration, Time};
}
