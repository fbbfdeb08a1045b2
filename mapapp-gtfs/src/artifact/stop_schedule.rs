use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{ScheduleTime, StopTimeRow, TripInfo};

/// one scheduled passage at a stop, with short field names to keep the
/// per-stop files small.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    #[serde(rename = "r")]
    pub route_id: Arc<str>,
    #[serde(rename = "t")]
    pub time: ScheduleTime,
    #[serde(rename = "h")]
    pub headsign: Arc<str>,
    /// used by the consumer to filter by day type
    #[serde(rename = "s")]
    pub service_id: Arc<str>,
}

/// accumulates [`ScheduleEntry`] lists per stop during the stop_times scan.
#[derive(Debug, Default)]
pub struct StopScheduleBuilder {
    target_filter: Option<HashSet<String>>,
    schedules: HashMap<String, Vec<ScheduleEntry>>,
    untimed: usize,
}

impl StopScheduleBuilder {
    /// when `target_filter` is non-empty, only those stops are accumulated.
    pub fn new(target_filter: &[String]) -> StopScheduleBuilder {
        let target_filter = if target_filter.is_empty() {
            None
        } else {
            Some(target_filter.iter().cloned().collect())
        };
        StopScheduleBuilder {
            target_filter,
            ..Default::default()
        }
    }

    /// appends an entry for a stop_times row whose trip was found in the
    /// index. the entry time is the arrival, or the departure when no
    /// arrival is given; a row with neither is counted and dropped.
    pub fn observe(&mut self, row: &StopTimeRow, trip: &TripInfo) {
        if let Some(filter) = &self.target_filter {
            if !filter.contains(&row.stop_id) {
                return;
            }
        }
        let time = match row.arrival_time.as_ref().or(row.departure_time.as_ref()) {
            Some(time) => time.clone(),
            None => {
                self.untimed += 1;
                return;
            }
        };
        let entry = ScheduleEntry {
            route_id: Arc::clone(&trip.route_id),
            time,
            headsign: Arc::clone(&trip.headsign),
            service_id: Arc::clone(&trip.service_id),
        };
        match self.schedules.get_mut(&row.stop_id) {
            Some(entries) => entries.push(entry),
            None => {
                self.schedules.insert(row.stop_id.clone(), vec![entry]);
            }
        }
    }

    /// rows dropped for having neither an arrival nor a departure time.
    pub fn untimed(&self) -> usize {
        self.untimed
    }

    /// sorts every stop's list by time. the sort is stable, so passages
    /// at the same time keep their stop_times.txt order.
    pub fn build(self) -> StopSchedules {
        let mut schedules = self.schedules;
        schedules
            .par_iter_mut()
            .for_each(|(_, entries)| entries.sort_by(|a, b| a.time.cmp(&b.time)));
        StopSchedules(schedules)
    }
}

/// per-stop schedules, each sorted by time.
#[derive(Debug, Default)]
pub struct StopSchedules(HashMap<String, Vec<ScheduleEntry>>);

impl StopSchedules {
    pub fn get(&self, stop_id: &str) -> Option<&Vec<ScheduleEntry>> {
        self.0.get(stop_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &HashMap<String, Vec<ScheduleEntry>> {
        &self.0
    }
}
