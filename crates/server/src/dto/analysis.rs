use metroute::analysis::SpanningForest;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Debug, Serialize)]
pub struct ConnectivityDto {
    pub connected: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ComponentsDto {
    pub count: usize,
    pub sizes: Vec<usize>,
}

impl From<Vec<Vec<Arc<str>>>> for ComponentsDto {
    fn from(components: Vec<Vec<Arc<str>>>) -> Self {
        Self {
            count: components.len(),
            sizes: components.iter().map(|component| component.len()).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SpanningForestDto {
    pub edges: Vec<(Arc<str>, Arc<str>, f64)>,
    pub total_weight: f64,
}

impl From<SpanningForest> for SpanningForestDto {
    fn from(forest: SpanningForest) -> Self {
        Self {
            edges: forest
                .edges
                .into_iter()
                .map(|edge| (edge.from, edge.to, edge.weight.as_seconds()))
                .collect(),
            total_weight: forest.total_weight.as_seconds(),
        }
    }
}
