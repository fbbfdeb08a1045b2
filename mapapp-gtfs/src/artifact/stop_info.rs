use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::StopRow;

/// display name and location of a stop.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StopInfo {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// builds the stop dictionary keyed by stop_id.
///
/// returns the dictionary and the number of stops left out because
/// neither they nor their parent station have a location.
pub fn build_stop_info(rows: &[StopRow]) -> (BTreeMap<String, StopInfo>, usize) {
    let by_id: HashMap<&str, &StopRow> = rows.iter().map(|r| (r.stop_id.as_str(), r)).collect();
    let mut missing = 0;
    let mut result = BTreeMap::new();
    for row in rows {
        match get_stop_location(row, &by_id) {
            Some((lat, lon)) => {
                let info = StopInfo {
                    name: row.stop_name.clone(),
                    lat,
                    lon,
                };
                result.insert(row.stop_id.clone(), info);
            }
            None => {
                log::debug!("stop '{}' has no location and no located parent", row.stop_id);
                missing += 1;
            }
        }
    }
    if missing > 0 {
        log::warn!("{missing} stop(s) without a location were left out of the stop info");
    }
    (result, missing)
}

// Checks the stop and then its parent station for lat,lon. Returns None if neither has both.
fn get_stop_location(stop: &StopRow, by_id: &HashMap<&str, &StopRow>) -> Option<(f64, f64)> {
    if let (Some(lat), Some(lon)) = (stop.stop_lat, stop.stop_lon) {
        return Some((lat, lon));
    }

    // only one level up: a parent station is required to carry a location
    stop.parent_station
        .as_deref()
        .and_then(|parent_id| by_id.get(parent_id))
        .and_then(|parent| match (parent.stop_lat, parent.stop_lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        })
}
