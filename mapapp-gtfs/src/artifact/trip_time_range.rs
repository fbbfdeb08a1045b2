use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::{ScheduleTime, StopTimeRow};

/// span of a trip: its earliest departure and latest arrival.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TripTimeRange {
    pub start: ScheduleTime,
    pub end: ScheduleTime,
}

/// running min/max for one trip. both bounds start unset, so the first
/// timed row always sets them.
#[derive(Debug, Default, Clone)]
pub struct TripTimeAccumulator {
    start: Option<ScheduleTime>,
    end: Option<ScheduleTime>,
}

impl TripTimeAccumulator {
    /// start becomes the minimum departure and end the maximum arrival.
    /// a missing departure falls back to the row's arrival and vice versa.
    pub fn observe(&mut self, departure: Option<&ScheduleTime>, arrival: Option<&ScheduleTime>) {
        if let Some(departure) = departure.or(arrival) {
            if self.start.as_ref().map_or(true, |start| departure < start) {
                self.start = Some(departure.clone());
            }
        }
        if let Some(arrival) = arrival.or(departure) {
            if self.end.as_ref().map_or(true, |end| arrival > end) {
                self.end = Some(arrival.clone());
            }
        }
    }

    /// the observed range, or None if no timed row was seen.
    pub fn finish(self) -> Option<TripTimeRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(TripTimeRange { start, end }),
            _ => None,
        }
    }
}

/// folds every stop_times row into a per-trip [`TripTimeAccumulator`].
/// no join against trips.txt is made; every row counts.
#[derive(Debug, Default)]
pub struct TripTimes {
    trips: HashMap<String, TripTimeAccumulator>,
}

impl TripTimes {
    pub fn new() -> TripTimes {
        TripTimes::default()
    }

    pub fn observe(&mut self, row: &StopTimeRow) {
        let departure = row.departure_time.as_ref();
        let arrival = row.arrival_time.as_ref();
        match self.trips.get_mut(&row.trip_id) {
            Some(acc) => acc.observe(departure, arrival),
            None => {
                let mut acc = TripTimeAccumulator::default();
                acc.observe(departure, arrival);
                self.trips.insert(row.trip_id.clone(), acc);
            }
        }
    }

    /// ranges keyed by trip_id. trips whose rows carried no times are left
    /// out and logged.
    pub fn build(self) -> BTreeMap<String, TripTimeRange> {
        let mut untimed = 0;
        let ranges = self
            .trips
            .into_iter()
            .filter_map(|(trip_id, acc)| match acc.finish() {
                Some(range) => Some((trip_id, range)),
                None => {
                    untimed += 1;
                    None
                }
            })
            .collect();
        if untimed > 0 {
            log::warn!("{untimed} trip(s) have no arrival or departure times and were left out of the trip times");
        }
        ranges
    }
}
