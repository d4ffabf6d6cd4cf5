use metroute::prelude::*;

pub struct AppState {
    pub graph: Graph,
}

impl AppState {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }
}
