use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::FeedTable;

/// the derived datasets this crate can emit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    /// one sorted schedule file per stop
    StopSchedules,
    /// first departure / last arrival per trip
    TripTimes,
    /// shapes and served stops per route
    RouteGeometry,
    /// name and location per stop
    StopInfo,
    /// headsign per trip
    TripHeadsigns,
}

impl Artifact {
    pub const ALL: [Artifact; 5] = [
        Artifact::StopSchedules,
        Artifact::TripTimes,
        Artifact::RouteGeometry,
        Artifact::StopInfo,
        Artifact::TripHeadsigns,
    ];

    /// feed tables that must exist before this artifact can be built.
    pub fn required_tables(&self) -> &'static [FeedTable] {
        match self {
            Artifact::StopSchedules => &[FeedTable::Trips, FeedTable::StopTimes],
            Artifact::TripTimes => &[FeedTable::StopTimes],
            Artifact::RouteGeometry => &[FeedTable::Trips, FeedTable::StopTimes, FeedTable::Shapes],
            Artifact::StopInfo => &[FeedTable::Stops],
            Artifact::TripHeadsigns => &[FeedTable::Trips],
        }
    }
}

impl Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Artifact::StopSchedules => "stop schedules",
            Artifact::TripTimes => "trip times",
            Artifact::RouteGeometry => "route geometry",
            Artifact::StopInfo => "stop info",
            Artifact::TripHeadsigns => "trip headsigns",
        };
        write!(f, "{name}")
    }
}
