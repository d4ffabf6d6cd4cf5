use crate::shared::time::Duration;

/// How ride hops taken from `stop_times.txt` become edges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Timetable {
    /// One ride edge per station pair and direction, weighted by the mean hop
    /// time and usable at any moment.
    #[default]
    Aggregated,
    /// One ride edge per trip hop, carrying the scheduled departure.
    Scheduled,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub stops_file_name: String,
    pub routes_file_name: String,
    pub trips_file_name: String,
    pub stop_times_file_name: String,
    pub transfers_file_name: String,
    /// Only keep routes of these GTFS `route_type`s. `None` keeps all.
    pub route_types: Option<Vec<i32>>,
    /// Only keep routes with these short names. `None` keeps all.
    pub route_short_names: Option<Vec<String>>,
    /// Hops this long or longer are treated as data errors.
    pub max_hop: Duration,
    pub timetable: Timetable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stops_file_name: "stops.txt".into(),
            routes_file_name: "routes.txt".into(),
            trips_file_name: "trips.txt".into(),
            stop_times_file_name: "stop_times.txt".into(),
            transfers_file_name: "transfers.txt".into(),
            route_types: None,
            route_short_names: None,
            max_hop: Duration::from_hours(1.0),
            timetable: Timetable::Aggregated,
        }
    }
}

impl Config {
    /// The Paris metro: route type 1, lines 1 to 14 plus 3bis and 7bis.
    pub fn paris_metro() -> Self {
        let lines = [
            "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "3bis",
            "7bis",
        ];
        Self {
            route_types: Some(vec![1]),
            route_short_names: Some(lines.into_iter().map(String::from).collect()),
            ..Default::default()
        }
    }

    pub fn with_timetable(mut self, timetable: Timetable) -> Self {
        self.timetable = timetable;
        self
    }

    pub(crate) fn keeps_route(&self, route_type: i32, short_name: Option<&str>) -> bool {
        let type_ok = self
            .route_types
            .as_ref()
            .is_none_or(|types| types.contains(&route_type));
        let name_ok = self.route_short_names.as_ref().is_none_or(|names| {
            short_name.is_some_and(|short_name| names.iter().any(|name| name == short_name))
        });
        type_ok && name_ok
    }
}

#[test]
fn paris_metro_filters_routes() {
    let config = Config::paris_metro();
    assert!(config.keeps_route(1, Some("3bis")));
    assert!(!config.keeps_route(3, Some("1")));
    assert!(!config.keeps_route(1, Some("A")));
    assert!(!config.keeps_route(1, None));
}
