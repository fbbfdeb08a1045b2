use std::path::{Path, PathBuf};

use config::Config;
use serde::{Deserialize, Serialize};

use super::{ArtifactError, MalformedRowPolicy, UnmatchedTripPolicy};

/// prefix of environment variables read by [`PipelineConfig::load`],
/// e.g. `MAPAPP_GTFS_OUTPUT_DIR`.
pub const ENV_PREFIX: &str = "MAPAPP_GTFS";

/// settings passed to every stage of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// directory of GTFS .txt tables, or a GTFS .zip archive
    pub input_dir: PathBuf,
    /// directory receiving all artifacts
    pub output_dir: PathBuf,
    /// stop_ids to emit schedules for. empty means every stop
    pub target_filter: Vec<String>,
    pub malformed_row_policy: MalformedRowPolicy,
    pub unmatched_trip_policy: UnmatchedTripPolicy,
    /// replace artifacts left by a previous run
    pub overwrite: bool,
    pub outputs: OutputFilenames,
}

/// names of the artifacts inside the output directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputFilenames {
    pub stop_times_directory: String,
    pub trip_times: String,
    pub route_geometry: String,
    pub stop_info: String,
    pub trip_headsigns: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("STM_GTFS_DATA"),
            output_dir: PathBuf::from("."),
            target_filter: vec![],
            malformed_row_policy: MalformedRowPolicy::default(),
            unmatched_trip_policy: UnmatchedTripPolicy::default(),
            overwrite: true,
            outputs: OutputFilenames::default(),
        }
    }
}

impl Default for OutputFilenames {
    fn default() -> Self {
        Self {
            stop_times_directory: String::from("stop_times"),
            trip_times: String::from("trip_times.json"),
            route_geometry: String::from("stm_parcours.json"),
            stop_info: String::from("stm_stops.json"),
            trip_headsigns: String::from("stm_trips.json"),
        }
    }
}

impl PipelineConfig {
    /// reads the configuration from an optional TOML file and `MAPAPP_GTFS_*`
    /// environment variables, on top of the defaults.
    pub fn load(config_filepath: Option<&Path>) -> Result<PipelineConfig, ArtifactError> {
        PipelineConfig::load_with_env(config_filepath, None)
    }

    /// [`PipelineConfig::load`] reading variables from `env` instead of the
    /// process environment when given.
    fn load_with_env(
        config_filepath: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<PipelineConfig, ArtifactError> {
        let mut builder = Config::builder();
        if let Some(path) = config_filepath {
            let filename = path.to_str().unwrap_or_default();
            builder = builder.add_source(config::File::new(filename, config::FileFormat::Toml));
        }
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("target_filter")
                    .source(env),
            )
            .build()
            .map_err(|e| ArtifactError::ConfigReadError {
                msg: String::from("failed reading pipeline configuration"),
                source: e,
            })?;
        config
            .try_deserialize::<PipelineConfig>()
            .map_err(|e| ArtifactError::ConfigReadError {
                msg: String::from("failed deserializing pipeline configuration"),
                source: e,
            })
    }
}
