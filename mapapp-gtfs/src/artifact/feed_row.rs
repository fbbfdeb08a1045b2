use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{FeedTable, ScheduleTime};

/// a row type deserialized by header name from one GTFS table.
pub trait FeedRow: DeserializeOwned {
    const TABLE: FeedTable;
    /// columns that must be present in the header. optional GTFS
    /// columns are left out and default when absent.
    const REQUIRED_COLUMNS: &'static [&'static str];
}

/// a row of trips.txt
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TripRow {
    pub trip_id: String,
    pub route_id: String,
    /// calendar (day type) this trip runs on
    pub service_id: String,
    #[serde(default)]
    pub trip_headsign: String,
    pub shape_id: Option<String>,
}

impl FeedRow for TripRow {
    const TABLE: FeedTable = FeedTable::Trips;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["trip_id", "route_id", "service_id"];
}

/// a row of stop_times.txt. times are optional in GTFS for stops
/// that are not timepoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StopTimeRow {
    pub trip_id: String,
    pub stop_id: String,
    pub arrival_time: Option<ScheduleTime>,
    pub departure_time: Option<ScheduleTime>,
    pub stop_sequence: String,
}

impl FeedRow for StopTimeRow {
    const TABLE: FeedTable = FeedTable::StopTimes;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "trip_id",
        "stop_id",
        "arrival_time",
        "departure_time",
        "stop_sequence",
    ];
}

/// a row of shapes.txt
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShapeRow {
    pub shape_id: String,
    pub shape_pt_lat: f64,
    pub shape_pt_lon: f64,
    pub shape_pt_sequence: u32,
}

impl FeedRow for ShapeRow {
    const TABLE: FeedTable = FeedTable::Shapes;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "shape_id",
        "shape_pt_lat",
        "shape_pt_lon",
        "shape_pt_sequence",
    ];
}

/// a row of stops.txt. location is optional for stops that
/// inherit it from a parent station.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StopRow {
    pub stop_id: String,
    #[serde(default)]
    pub stop_name: String,
    pub stop_lat: Option<f64>,
    pub stop_lon: Option<f64>,
    pub parent_station: Option<String>,
}

impl FeedRow for StopRow {
    const TABLE: FeedTable = FeedTable::Stops;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["stop_id", "stop_lat", "stop_lon"];
}
