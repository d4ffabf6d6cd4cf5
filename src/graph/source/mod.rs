mod gtfs;
mod json;

pub use json::Snapshot;
