use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Enumerates alternative ways to handle a stop_times row whose
/// trip_id has no entry in trips.txt. Applies to the joined outputs
/// (stop schedules, route stop lists); trip time ranges never join.
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedTripPolicy {
    /// exclude the row without reporting it
    Drop,
    /// exclude the row and report a count once the scan completes
    #[default]
    Warn,
    /// abort the run on the first unmatched row
    Fail,
}
