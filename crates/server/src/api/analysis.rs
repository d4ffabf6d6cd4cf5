use axum::{Json, extract::State};
use metroute::analysis;
use std::sync::Arc;

use crate::{
    dto::{ComponentsDto, ConnectivityDto, SpanningForestDto},
    state::AppState,
};

pub async fn connectivity(State(state): State<Arc<AppState>>) -> Json<ConnectivityDto> {
    Json(ConnectivityDto {
        connected: analysis::is_connected(&state.graph),
    })
}

pub async fn components(State(state): State<Arc<AppState>>) -> Json<ComponentsDto> {
    Json(analysis::components(&state.graph).into())
}

pub async fn mst(State(state): State<Arc<AppState>>) -> Json<SpanningForestDto> {
    Json(analysis::minimum_spanning_forest(&state.graph).into())
}
