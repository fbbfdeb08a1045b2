use std::collections::BTreeMap;

use super::TripRow;

/// flattens trips.txt into trip_id -> trip_headsign. a repeated trip_id
/// keeps its last headsign.
pub fn build_trip_headsigns<'a>(
    rows: impl IntoIterator<Item = &'a TripRow>,
) -> BTreeMap<String, String> {
    rows.into_iter()
        .map(|row| (row.trip_id.clone(), row.trip_headsign.clone()))
        .collect()
}
