use std::{collections::BTreeMap, fmt::Display};

use itertools::Itertools;
use serde::Serialize;

/// counts collected over one pipeline run, logged when the run completes.
#[derive(Debug, Default, Clone, Serialize, PartialEq)]
pub struct PipelineSummary {
    pub trips: usize,
    pub stop_time_rows: usize,
    /// stop_times rows whose trip_id is absent from trips.txt
    pub unmatched_stop_time_rows: usize,
    /// stop_times rows with neither arrival nor departure time
    pub untimed_stop_time_rows: usize,
    pub shape_points: usize,
    /// rows passed over under the skip policy, by table file name
    pub skipped_rows: BTreeMap<String, usize>,
    pub stop_schedules: usize,
    pub trip_time_ranges: usize,
    pub routes: usize,
    pub stops: usize,
    pub stops_without_location: usize,
    pub trip_headsigns: usize,
    pub files_written: usize,
}

impl Display for PipelineSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let skipped = match self.skipped_rows.is_empty() {
            true => String::from("none"),
            false => self
                .skipped_rows
                .iter()
                .map(|(table, n)| format!("{table}={n}"))
                .join(","),
        };
        write!(
            f,
            "trips={} stop_time_rows={} unmatched={} untimed={} shape_points={} skipped=[{}] \
             stop_schedules={} trip_time_ranges={} routes={} stops={} stops_without_location={} \
             trip_headsigns={} files_written={}",
            self.trips,
            self.stop_time_rows,
            self.unmatched_stop_time_rows,
            self.untimed_stop_time_rows,
            self.shape_points,
            skipped,
            self.stop_schedules,
            self.trip_time_ranges,
            self.routes,
            self.stops,
            self.stops_without_location,
            self.trip_headsigns,
            self.files_written
        )
    }
}
