use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Enumerates alternative ways to handle a row that
/// cannot be deserialized from a feed table
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MalformedRowPolicy {
    /// abort the run, reporting the file and row
    #[default]
    Fail,
    /// log the row, count it, and keep reading
    Skip,
}
