use crate::{
    graph::{self, Edge, EdgeType, Graph, Node},
    gtfs::{self, GtfsReader, Timetable},
    shared::time::{Duration, Time},
};
use rayon::prelude::*;
use std::{
    collections::{BTreeSet, HashMap, HashSet},
    sync::Arc,
    time::Instant,
};
use tracing::debug;

/// A logical station: a GTFS parent station, or a stop without one.
#[derive(Debug)]
struct Station {
    id: Arc<str>,
    name: Option<String>,
    coordinate: Option<(f64, f64)>,
    lines: BTreeSet<Arc<str>>,
}

#[derive(Debug, Default)]
struct Stations {
    stations: Vec<Station>,
    station_lookup: HashMap<Arc<str>, u32>,
    stop_to_station: HashMap<String, u32>,
}

#[derive(Debug)]
struct StopVisit {
    sequence: u32,
    stop_id: String,
    station: Option<u32>,
    departure: Option<Time>,
}

#[derive(Debug, Default)]
struct TripStops {
    line: Arc<str>,
    visits: Vec<StopVisit>,
}

#[derive(Debug, Clone)]
struct Hop {
    from: u32,
    to: u32,
    duration: Duration,
    departure: Option<Time>,
    edge_type: EdgeType,
    line: Option<Arc<str>>,
}

impl Graph {
    /// Builds a station graph from a GTFS feed.
    ///
    /// Stops are folded into their parent stations. Rides come from
    /// consecutive stop times of the kept trips and transfers from
    /// `transfers.txt`.
    pub fn load_gtfs(gtfs: &GtfsReader) -> Result<Self, graph::Error> {
        let now = Instant::now();
        let lines = load_lines(gtfs)?;
        let trips = load_trips(gtfs, &lines)?;
        let mut stations = load_stations(gtfs)?;
        let (rides, used_stops) = load_rides(gtfs, trips, &mut stations)?;
        let transfers = load_transfers(gtfs, &stations, &used_stops)?;

        let hops = match gtfs.config().timetable {
            Timetable::Aggregated => {
                let mut hops = rides;
                hops.extend(transfers);
                merge_parallel(hops)
            }
            Timetable::Scheduled => {
                let mut hops = rides;
                hops.extend(merge_parallel(transfers));
                hops
            }
        };

        let graph = build(stations, hops)?;
        debug!("Loading gtfs graph took {:?}", now.elapsed());
        Ok(graph)
    }
}

/// Maps each kept route to the line label riders see.
fn load_lines(gtfs: &GtfsReader) -> Result<HashMap<String, Arc<str>>, gtfs::Error> {
    debug!("Loading routes...");
    let now = Instant::now();
    let config = gtfs.config();
    let mut lines: HashMap<String, Arc<str>> = HashMap::new();
    gtfs.stream_routes(|(_, route)| {
        if config.keeps_route(route.route_type, route.route_short_name.as_deref()) {
            let line: Arc<str> = route
                .route_short_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| route.route_id.clone())
                .into();
            lines.insert(route.route_id, line);
        }
    })?;
    debug!("Kept {} routes in {:?}", lines.len(), now.elapsed());
    Ok(lines)
}

fn load_trips(
    gtfs: &GtfsReader,
    lines: &HashMap<String, Arc<str>>,
) -> Result<HashMap<String, Arc<str>>, gtfs::Error> {
    debug!("Loading trips...");
    let now = Instant::now();
    let mut trips: HashMap<String, Arc<str>> = HashMap::new();
    gtfs.stream_trips(|(_, trip)| {
        if let Some(line) = lines.get(&trip.route_id) {
            trips.insert(trip.trip_id, line.clone());
        }
    })?;
    debug!("Kept {} trips in {:?}", trips.len(), now.elapsed());
    Ok(trips)
}

fn load_stations(gtfs: &GtfsReader) -> Result<Stations, gtfs::Error> {
    debug!("Loading stops...");
    let now = Instant::now();
    let mut stations = Stations::default();
    gtfs.stream_stops(|(_, stop)| {
        let station_id = stop
            .parent_station
            .filter(|parent| !parent.is_empty())
            .unwrap_or_else(|| stop.stop_id.clone());
        let index = match stations.station_lookup.get(station_id.as_str()) {
            Some(index) => *index,
            None => {
                let index = stations.stations.len() as u32;
                let id: Arc<str> = station_id.into();
                stations.stations.push(Station {
                    id: id.clone(),
                    name: stop.stop_name,
                    coordinate: stop.stop_lat.zip(stop.stop_lon),
                    lines: BTreeSet::new(),
                });
                stations.station_lookup.insert(id, index);
                index
            }
        };
        stations.stop_to_station.insert(stop.stop_id, index);
    })?;
    debug!(
        "Loaded {} stations in {:?}",
        stations.stations.len(),
        now.elapsed()
    );
    Ok(stations)
}

/// Turns consecutive stop times of each kept trip into ride hops.
fn load_rides(
    gtfs: &GtfsReader,
    trip_lines: HashMap<String, Arc<str>>,
    stations: &mut Stations,
) -> Result<(Vec<Hop>, HashSet<String>), gtfs::Error> {
    debug!("Loading stop times...");
    let now = Instant::now();
    let config = gtfs.config();

    // Trips keep the order in which they first show up
    let mut trip_lookup: HashMap<String, usize> = HashMap::new();
    let mut trips: Vec<TripStops> = Vec::new();
    gtfs.stream_stop_times(|(_, stop_time)| {
        let Some(line) = trip_lines.get(&stop_time.trip_id) else {
            return;
        };
        let index = *trip_lookup
            .entry(stop_time.trip_id)
            .or_insert_with(|| {
                trips.push(TripStops {
                    line: line.clone(),
                    visits: Vec::new(),
                });
                trips.len() - 1
            });
        trips[index].visits.push(StopVisit {
            sequence: stop_time.stop_sequence,
            station: stations.stop_to_station.get(&stop_time.stop_id).copied(),
            stop_id: stop_time.stop_id,
            departure: stop_time
                .departure_time
                .as_deref()
                .and_then(Time::from_hms),
        });
    })?;

    trips.par_iter_mut().for_each(|trip| {
        trip.visits.sort_by(|a, b| {
            a.sequence
                .cmp(&b.sequence)
                .then_with(|| a.stop_id.cmp(&b.stop_id))
        })
    });

    let per_trip: Vec<Vec<(Hop, usize)>> = trips
        .par_iter()
        .map(|trip| {
            let mut hops = Vec::new();
            for (i, pair) in trip.visits.windows(2).enumerate() {
                let (a, b) = (&pair[0], &pair[1]);
                let (Some(from), Some(to)) = (a.station, b.station) else {
                    continue;
                };
                let (Some(t1), Some(t2)) = (a.departure, b.departure) else {
                    continue;
                };
                let delta = t2 - t1;
                if from == to || delta <= Duration::ZERO || delta >= config.max_hop {
                    continue;
                }
                let departure = match config.timetable {
                    Timetable::Aggregated => None,
                    Timetable::Scheduled => Some(t1),
                };
                hops.push((
                    Hop {
                        from,
                        to,
                        duration: delta,
                        departure,
                        edge_type: EdgeType::Ride,
                        line: Some(trip.line.clone()),
                    },
                    i,
                ));
            }
            hops
        })
        .collect();

    let mut rides: Vec<Hop> = Vec::new();
    let mut used_stops: HashSet<String> = HashSet::new();
    for (trip, hops) in trips.iter().zip(per_trip) {
        for (hop, i) in hops {
            used_stops.insert(trip.visits[i].stop_id.clone());
            used_stops.insert(trip.visits[i + 1].stop_id.clone());
            stations.stations[hop.from as usize]
                .lines
                .insert(trip.line.clone());
            stations.stations[hop.to as usize]
                .lines
                .insert(trip.line.clone());
            match config.timetable {
                Timetable::Aggregated => {
                    let back = Hop {
                        from: hop.to,
                        to: hop.from,
                        ..hop.clone()
                    };
                    rides.push(hop);
                    rides.push(back);
                }
                Timetable::Scheduled => rides.push(hop),
            }
        }
    }
    debug!(
        "Built {} ride hops from {} trips in {:?}",
        rides.len(),
        trips.len(),
        now.elapsed()
    );
    Ok((rides, used_stops))
}

fn load_transfers(
    gtfs: &GtfsReader,
    stations: &Stations,
    used_stops: &HashSet<String>,
) -> Result<Vec<Hop>, gtfs::Error> {
    debug!("Loading transfers...");
    let now = Instant::now();
    let mut transfers: Vec<Hop> = Vec::new();
    let result = gtfs.stream_transfers(|(_, transfer)| {
        if !used_stops.contains(&transfer.from_stop_id) || !used_stops.contains(&transfer.to_stop_id)
        {
            return;
        }
        let Some(seconds) = transfer
            .min_transfer_time
            .as_deref()
            .and_then(|value| value.parse::<u32>().ok())
        else {
            return;
        };
        let from = stations.stop_to_station.get(&transfer.from_stop_id);
        let to = stations.stop_to_station.get(&transfer.to_stop_id);
        if let (Some(&from), Some(&to)) = (from, to)
            && from != to
        {
            let hop = Hop {
                from,
                to,
                duration: seconds.into(),
                departure: None,
                edge_type: EdgeType::Transfer,
                line: None,
            };
            transfers.push(hop.clone());
            transfers.push(Hop {
                from: to,
                to: from,
                ..hop
            });
        }
    });
    match result {
        Ok(()) => {}
        // Feeds are allowed to ship without transfers
        Err(gtfs::Error::FileNotFound(name)) => debug!("No {name} in feed"),
        Err(err) => return Err(err),
    }
    debug!(
        "Built {} transfer hops in {:?}",
        transfers.len(),
        now.elapsed()
    );
    Ok(transfers)
}

/// Collapses hops sharing the same ordered station pair.
///
/// The merged hop keeps the truncated mean duration, the first type seen and,
/// for rides, the first line seen. Pairs keep their first appearance order.
fn merge_parallel(hops: Vec<Hop>) -> Vec<Hop> {
    struct Group {
        hop: Hop,
        total: f64,
        count: u32,
    }

    let mut lookup: HashMap<(u32, u32), usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();
    for hop in hops {
        match lookup.get(&(hop.from, hop.to)) {
            Some(&i) => {
                let group = &mut groups[i];
                group.total += hop.duration.as_seconds();
                group.count += 1;
                if group.hop.line.is_none() {
                    group.hop.line = hop.line;
                }
            }
            None => {
                lookup.insert((hop.from, hop.to), groups.len());
                groups.push(Group {
                    total: hop.duration.as_seconds(),
                    count: 1,
                    hop,
                });
            }
        }
    }

    groups
        .into_iter()
        .map(|group| {
            let mut hop = group.hop;
            hop.duration = Duration::from_seconds((group.total / group.count as f64).trunc());
            hop.departure = None;
            if hop.edge_type != EdgeType::Ride {
                hop.line = None;
            }
            hop
        })
        .collect()
}

fn build(stations: Stations, hops: Vec<Hop>) -> Result<Graph, graph::Error> {
    let kept: Vec<bool> = stations
        .stations
        .iter()
        .map(|station| !station.lines.is_empty())
        .collect();

    let ids: Vec<Arc<str>> = stations
        .stations
        .iter()
        .map(|station| station.id.clone())
        .collect();

    let nodes: Vec<Node> = stations
        .stations
        .into_iter()
        .filter(|station| !station.lines.is_empty())
        .map(|station| {
            let lines: Vec<&str> = station.lines.iter().map(|line| line.as_ref()).collect();
            let mut node = Node::new(station.id).with_metadata("line", lines.join(","));
            if let Some(name) = station.name {
                node = node.with_name(name);
            }
            if let Some((lat, lon)) = station.coordinate {
                node = node.with_metadata("x", lat).with_metadata("y", lon);
            }
            node
        })
        .collect();

    let edges: Vec<Edge> = hops
        .into_iter()
        .filter(|hop| kept[hop.from as usize] && kept[hop.to as usize])
        .map(|hop| Edge {
            from: ids[hop.from as usize].clone(),
            to: ids[hop.to as usize].clone(),
            duration: hop.duration,
            departure: hop.departure,
            edge_type: hop.edge_type,
            line: hop.line,
        })
        .collect();

    Graph::new(nodes, edges)
}
