use std::path::PathBuf;

use clap::Parser;

use super::ArtifactOperation;
use crate::artifact::{ArtifactError, MalformedRowPolicy, PipelineConfig, UnmatchedTripPolicy};

/// command line tool turning a GTFS feed into the compact JSON lookups
/// used by the map application
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct ArtifactApp {
    #[command(subcommand)]
    pub op: ArtifactOperation,
    /// TOML file with pipeline settings, applied before MAPAPP_GTFS_* variables
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,
    /// directory of GTFS tables, or a GTFS .zip archive
    #[arg(long, global = true)]
    pub input_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,
    /// comma-separated stop_ids to emit schedules for
    #[arg(long, global = true, value_delimiter = ',')]
    pub target_filter: Option<Vec<String>>,
    #[arg(long, global = true, value_enum)]
    pub malformed_row_policy: Option<MalformedRowPolicy>,
    #[arg(long, global = true, value_enum)]
    pub unmatched_trip_policy: Option<UnmatchedTripPolicy>,
    /// replace artifacts left by a previous run (true or false)
    #[arg(long, global = true)]
    pub overwrite: Option<bool>,
}

impl ArtifactApp {
    pub fn run(&self) -> Result<(), ArtifactError> {
        let config = self.pipeline_config()?;
        self.op.run(&config)
    }

    /// the loaded configuration with command line flags applied on top.
    pub fn pipeline_config(&self) -> Result<PipelineConfig, ArtifactError> {
        let mut config = PipelineConfig::load(self.config_file.as_deref())?;
        if let Some(input_dir) = &self.input_dir {
            config.input_dir = input_dir.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(target_filter) = &self.target_filter {
            config.target_filter = target_filter.clone();
        }
        if let Some(policy) = self.malformed_row_policy {
            config.malformed_row_policy = policy;
        }
        if let Some(policy) = self.unmatched_trip_policy {
            config.unmatched_trip_policy = policy;
        }
        if let Some(overwrite) = self.overwrite {
            config.overwrite = overwrite;
        }
        Ok(config)
    }
}
