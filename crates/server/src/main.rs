mod api;
mod dto;
mod state;

use crate::state::AppState;
use axum::routing::{get, post};
use metroute::{
    graph,
    gtfs::{Config, GtfsReader},
    prelude::Graph,
};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};
use tracing::{error, info};

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 2 {
        error!("Missing graph source: a .json snapshot, a gtfs zip or a gtfs directory");
        std::process::exit(1);
    }
    let path = PathBuf::from(&args[1]);

    info!("Loading data...");
    let now = Instant::now();
    let graph = match load_graph(&path) {
        Ok(graph) => graph,
        Err(err) => {
            error!("Failed to load {}: {err}", path.display());
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} nodes and {} edges in {:?}",
        graph.nodes().len(),
        graph.edges().len(),
        now.elapsed()
    );
    let state = Arc::new(AppState::new(graph));

    let port = std::env::var("METROUTE_PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    let app = axum::Router::new()
        .route("/route", get(api::route))
        .route("/shortest-path", post(api::shortest_path))
        .route("/connectivity", get(api::connectivity))
        .route("/components", get(api::components))
        .route("/mst", get(api::mst))
        .with_state(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}

fn load_graph(path: &Path) -> Result<Graph, graph::Error> {
    if path.extension().is_some_and(|ext| ext == "json") {
        Graph::from_json_file(path)
    } else {
        Graph::load_gtfs(&GtfsReader::new(Config::default()).from_path(path))
    }
}
