use clap::Subcommand;
use serde::{Deserialize, Serialize};

use crate::artifact::{self, Artifact, ArtifactError, PipelineConfig, ScheduleTime};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum ArtifactOperation {
    /// build every artifact
    All,
    /// one sorted schedule file per stop
    StopTimes,
    /// first departure and last arrival of every trip
    TripTimes,
    /// shapes and served stops of every route
    Routes,
    /// name and location of every stop
    Stops,
    /// headsign of every trip
    Trips,
    /// print the first stop_times rows at one stop
    Preview {
        /// stop to inspect. defaults to the first target_filter entry
        #[arg(long)]
        stop_id: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

impl ArtifactOperation {
    pub fn run(&self, config: &PipelineConfig) -> Result<(), ArtifactError> {
        let artifacts: &[Artifact] = match self {
            ArtifactOperation::All => &Artifact::ALL,
            ArtifactOperation::StopTimes => &[Artifact::StopSchedules],
            ArtifactOperation::TripTimes => &[Artifact::TripTimes],
            ArtifactOperation::Routes => &[Artifact::RouteGeometry],
            ArtifactOperation::Stops => &[Artifact::StopInfo],
            ArtifactOperation::Trips => &[Artifact::TripHeadsigns],
            ArtifactOperation::Preview { stop_id, limit } => {
                let stop_id = stop_id
                    .as_ref()
                    .or(config.target_filter.first())
                    .ok_or_else(|| {
                        ArtifactError::InvalidUserInput(String::from(
                            "preview requires --stop-id or a target_filter entry",
                        ))
                    })?;
                return preview(config, stop_id, *limit);
            }
        };
        let summary = artifact::run(config, artifacts)?;
        log::info!("{summary}");
        Ok(())
    }
}

fn preview(config: &PipelineConfig, stop_id: &str, limit: usize) -> Result<(), ArtifactError> {
    let rows = artifact::preview_stop(config, stop_id, limit)?;
    if rows.is_empty() {
        log::warn!("no stop_times rows found for stop '{stop_id}'");
    }
    let show = |time: &Option<ScheduleTime>| time.as_ref().map(|t| t.to_string()).unwrap_or_default();
    println!("trip_id,arrival_time,departure_time");
    for row in rows {
        println!(
            "{},{},{}",
            row.trip_id,
            show(&row.arrival_time),
            show(&row.departure_time)
        );
    }
    Ok(())
}
