#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("required input '{filepath}' not found")]
    MissingFile { filepath: String },
    #[error("'{filename}' is missing required column '{column}'")]
    MissingColumn { filename: String, column: String },
    #[error("failed parsing row {row} of '{filename}': {message}")]
    Parse {
        filename: String,
        row: usize,
        message: String,
    },
    #[error("stop_times row at stop '{stop_id}' references unknown trip '{trip_id}'")]
    UnmatchedJoinKey { trip_id: String, stop_id: String },
    #[error("'{0}' cannot be used as an output file name")]
    InvalidOutputKey(String),
    #[error("failed reading GTFS archive '{filepath}': {error}")]
    ArchiveError { filepath: String, error: String },
    #[error("failed writing '{filepath}': {error}")]
    WriteError { filepath: String, error: String },
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("{0}")]
    InvalidUserInput(String),
    #[error("{0}")]
    OtherError(String),
}
