use metroute::{
    gtfs::{self, Config, GtfsReader, Timetable},
    prelude::*,
};
use std::sync::Arc;

fn feed_dir() -> String {
    format!("{}/tests/fixtures/gtfs", env!("CARGO_MANIFEST_DIR"))
}

fn feed_zip() -> String {
    format!("{}/tests/fixtures/gtfs.zip", env!("CARGO_MANIFEST_DIR"))
}

fn metro_only() -> Config {
    Config {
        route_types: Some(vec![1]),
        ..Default::default()
    }
}

fn ids(path: &[Arc<str>]) -> Vec<&str> {
    path.iter().map(|id| id.as_ref()).collect()
}

fn edge<'a>(graph: &'a Graph, from: &str, to: &str) -> &'a Edge {
    graph
        .outgoing_edges(from)
        .find(|edge| edge.to.as_ref() == to)
        .unwrap()
}

#[test]
fn streams_rows_from_directory() {
    let reader = GtfsReader::new(Config::default()).from_directory(feed_dir());
    let mut stops = Vec::new();
    reader.stream_stops(|(_, stop)| stops.push(stop)).unwrap();
    assert_eq!(stops.len(), 8);
    assert_eq!(stops[1].parent_station.as_deref(), Some("ST_CHAT"));
    assert_eq!(stops[0].parent_station, None);

    let mut stop_times = 0;
    reader.stream_stop_times(|_| stop_times += 1).unwrap();
    assert_eq!(stop_times, 11);
}

#[test]
fn missing_table_is_reported() {
    let config = Config {
        stops_file_name: "missing.txt".into(),
        ..Default::default()
    };
    let reader = GtfsReader::new(config).from_directory(feed_dir());
    let result = reader.stream_stops(|_| {});
    assert!(matches!(result, Err(gtfs::Error::FileNotFound(name)) if name == "missing.txt"));
}

#[test]
fn aggregated_metro_graph() {
    let reader = GtfsReader::new(metro_only()).from_path(feed_dir());
    let graph = Graph::load_gtfs(&reader).unwrap();

    let node_ids: Vec<&str> = graph.nodes().iter().map(|node| node.id.as_ref()).collect();
    assert_eq!(node_ids, ["ST_CHAT", "P_PALA", "P_LOUV", "P_CITE", "P_STMI"]);
    let chatelet = graph.node_by_id("ST_CHAT").unwrap();
    assert_eq!(chatelet.name.as_deref(), Some("Châtelet"));
    assert_eq!(chatelet.metadata["line"], "1,4");
    assert_eq!(graph.edges().len(), 8);

    // Two rides (120s, 180s) and a 300s transfer share the pair
    let pala_louv = edge(&graph, "P_PALA", "P_LOUV");
    assert_eq!(pala_louv.duration, Duration::from_seconds(200.0));
    assert_eq!(pala_louv.edge_type, EdgeType::Ride);
    assert_eq!(pala_louv.line.as_deref(), Some("1"));
    assert_eq!(pala_louv.departure, None);

    assert_eq!(
        edge(&graph, "P_LOUV", "ST_CHAT").duration,
        Duration::from_seconds(150.0)
    );
    assert_eq!(
        edge(&graph, "P_STMI", "P_CITE").duration,
        Duration::from_seconds(60.0)
    );

    let itinerary = graph.router("P_PALA", "P_STMI").solve().unwrap();
    assert_eq!(
        ids(&itinerary.path),
        ["P_PALA", "P_LOUV", "ST_CHAT", "P_CITE", "P_STMI"]
    );
    assert_eq!(itinerary.total, Some(Time::from_seconds(530.0)));
}

#[test]
fn default_config_keeps_buses() {
    let reader = GtfsReader::new(Config::default()).from_directory(feed_dir());
    let graph = Graph::load_gtfs(&reader).unwrap();
    assert_eq!(graph.nodes().len(), 6);
    assert_eq!(graph.edges().len(), 10);
    let chatelet = graph.node_by_id("ST_CHAT").unwrap();
    assert_eq!(chatelet.metadata["line"], "1,38,4");
    assert_eq!(
        edge(&graph, "P_BUS", "ST_CHAT").line.as_deref(),
        Some("38")
    );
}

#[test]
fn scheduled_metro_graph() {
    let config = metro_only().with_timetable(Timetable::Scheduled);
    let reader = GtfsReader::new(config).from_directory(feed_dir());
    let graph = Graph::load_gtfs(&reader).unwrap();

    // Six trip hops plus a transfer each way
    assert_eq!(graph.edges().len(), 8);
    let rides: Vec<&Edge> = graph
        .edges()
        .iter()
        .filter(|edge| edge.edge_type == EdgeType::Ride)
        .collect();
    assert_eq!(rides.len(), 6);
    assert!(rides.iter().all(|edge| edge.departure.is_some()));
    let transfer = edge(&graph, "P_LOUV", "P_PALA");
    assert_eq!(transfer.edge_type, EdgeType::Transfer);
    assert_eq!(transfer.duration, Duration::from_seconds(300.0));
    assert_eq!(transfer.line, None);

    let departure = Time::from_hms("08:00:00").unwrap();
    let itinerary = graph
        .router("P_PALA", "P_STMI")
        .departure_at(departure)
        .solve()
        .unwrap();
    assert_eq!(
        itinerary.total.map(|total| total.to_hms_string()),
        Some("08:08:00".to_string())
    );
    let legs = itinerary.legs();
    assert_eq!(legs.len(), 2);
    assert_eq!(legs[0].line.as_ref(), "1");
    assert_eq!(legs[1].line.as_ref(), "4");
    assert_eq!(itinerary.steps[2].departure, Time::from_hms("08:05:00").unwrap());
}

#[test]
fn zip_and_directory_agree() {
    let from_dir =
        Graph::load_gtfs(&GtfsReader::new(metro_only()).from_directory(feed_dir())).unwrap();
    let from_zip = Graph::load_gtfs(&GtfsReader::new(metro_only()).from_zip(feed_zip())).unwrap();
    assert_eq!(from_dir.nodes(), from_zip.nodes());
    assert_eq!(from_dir.edges(), from_zip.edges());
}

#[test]
fn paris_metro_filter_drops_unknown_lines() {
    let reader = GtfsReader::new(Config::paris_metro()).from_directory(feed_dir());
    let graph = Graph::load_gtfs(&reader).unwrap();
    assert!(graph.node_by_id("P_BUS").is_none());
    assert_eq!(graph.nodes().len(), 5);
}

#[test]
fn oversized_departure_is_skipped() {
    let dir = std::env::temp_dir().join(format!("metroute-oversized-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let tables = [
        (
            "routes.txt",
            "route_id,route_short_name,route_long_name,route_type\nR1,1,Ligne 1,1\n",
        ),
        ("trips.txt", "route_id,service_id,trip_id\nR1,WEEK,T1\n"),
        (
            "stops.txt",
            "stop_id,stop_name,stop_lat,stop_lon,location_type,parent_station\n\
             A,Alpha,48.0,2.0,0,\nB,Beta,48.1,2.1,0,\nC,Gamma,48.2,2.2,0,\n",
        ),
        (
            "stop_times.txt",
            "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
             T1,08:00:00,08:00:00,A,1\n\
             T1,08:02:00,08:02:00,B,2\n\
             T1,99999999:00:00,99999999:00:00,C,3\n",
        ),
    ];
    for (name, content) in tables {
        std::fs::write(dir.join(name), content).unwrap();
    }

    let reader = GtfsReader::new(Config::default()).from_directory(&dir);
    let graph = Graph::load_gtfs(&reader).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    let node_ids: Vec<&str> = graph.nodes().iter().map(|node| node.id.as_ref()).collect();
    assert_eq!(node_ids, ["A", "B"]);
    assert_eq!(graph.edges().len(), 2);
    assert_eq!(edge(&graph, "A", "B").duration, Duration::from_seconds(120.0));
}
