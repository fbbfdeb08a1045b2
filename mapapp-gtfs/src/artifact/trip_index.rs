use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use super::TripRow;

/// the fields of a trip joined onto each of its stop_times rows.
///
/// values are interned: every trip (and every schedule entry built
/// from it) with the same route, headsign or service shares one
/// allocation of that text.
#[derive(Debug, Clone, PartialEq)]
pub struct TripInfo {
    pub route_id: Arc<str>,
    pub headsign: Arc<str>,
    pub service_id: Arc<str>,
}

/// lookup from trip_id to [`TripInfo`], fully built from trips.txt before
/// stop_times.txt is scanned.
#[derive(Debug, Default)]
pub struct TripIndex {
    trips: HashMap<String, TripInfo>,
    duplicates: usize,
}

impl TripIndex {
    /// builds the index. when a trip_id repeats, the later row wins.
    pub fn new<'a>(rows: impl IntoIterator<Item = &'a TripRow>) -> TripIndex {
        let mut pool: HashSet<Arc<str>> = HashSet::new();
        let mut trips = HashMap::new();
        let mut duplicates = 0;
        for row in rows {
            let info = TripInfo {
                route_id: intern(&mut pool, &row.route_id),
                headsign: intern(&mut pool, &row.trip_headsign),
                service_id: intern(&mut pool, &row.service_id),
            };
            if trips.insert(row.trip_id.clone(), info).is_some() {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            log::warn!("trips.txt lists {duplicates} duplicate trip_id(s), keeping the last row of each");
        }
        TripIndex { trips, duplicates }
    }

    pub fn get(&self, trip_id: &str) -> Option<&TripInfo> {
        self.trips.get(trip_id)
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

fn intern(pool: &mut HashSet<Arc<str>>, value: &str) -> Arc<str> {
    match pool.get(value) {
        Some(shared) => Arc::clone(shared),
        None => {
            let shared: Arc<str> = Arc::from(value);
            pool.insert(Arc::clone(&shared));
            shared
        }
    }
}
