use std::{
    fmt::Display,
    fs::File,
    io::{BufReader, Cursor, Read},
    path::{Path, PathBuf},
};

use zip::{result::ZipError, ZipArchive};

use super::ArtifactError;

/// the GTFS tables read by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeedTable {
    Trips,
    StopTimes,
    Shapes,
    Stops,
}

impl FeedTable {
    pub fn filename(&self) -> &'static str {
        match self {
            FeedTable::Trips => "trips.txt",
            FeedTable::StopTimes => "stop_times.txt",
            FeedTable::Shapes => "shapes.txt",
            FeedTable::Stops => "stops.txt",
        }
    }
}

impl Display for FeedTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.filename())
    }
}

/// location of an unpacked or zipped GTFS feed.
#[derive(Debug, Clone)]
pub enum FeedSource {
    /// a directory holding the feed's .txt tables
    Directory(PathBuf),
    /// a .zip archive with the tables at its root
    Archive(PathBuf),
}

impl FeedSource {
    /// picks the source type from the path. anything that is not an existing
    /// file is treated as a directory, so that a missing directory surfaces
    /// as a missing table.
    pub fn new(path: &Path) -> FeedSource {
        if path.is_file() {
            FeedSource::Archive(path.to_path_buf())
        } else {
            FeedSource::Directory(path.to_path_buf())
        }
    }

    /// confirms every table exists before anything is read or written.
    pub fn require(&self, tables: &[FeedTable]) -> Result<(), ArtifactError> {
        match self {
            FeedSource::Directory(dir) => {
                for table in tables {
                    let filepath = dir.join(table.filename());
                    if !filepath.is_file() {
                        return Err(missing(&filepath));
                    }
                }
                Ok(())
            }
            FeedSource::Archive(archive_path) => {
                let archive = open_archive(archive_path)?;
                for table in tables {
                    if !archive.file_names().any(|name| name == table.filename()) {
                        return Err(missing(&archive_path.join(table.filename())));
                    }
                }
                Ok(())
            }
        }
    }

    /// opens a reader over one table.
    ///
    /// archive entries are inflated into memory since the entry reader
    /// borrows the archive.
    pub fn open(&self, table: FeedTable) -> Result<Box<dyn Read + Send>, ArtifactError> {
        match self {
            FeedSource::Directory(dir) => {
                let filepath = dir.join(table.filename());
                let file = File::open(&filepath).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => missing(&filepath),
                    _ => ArtifactError::OtherError(format!(
                        "failure opening '{}': {e}",
                        filepath.to_str().unwrap_or_default()
                    )),
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            FeedSource::Archive(archive_path) => {
                let mut archive = open_archive(archive_path)?;
                let mut entry = archive.by_name(table.filename()).map_err(|e| match e {
                    ZipError::FileNotFound => missing(&archive_path.join(table.filename())),
                    other => archive_error(archive_path, other),
                })?;
                let mut buffer = Vec::with_capacity(entry.size() as usize);
                entry
                    .read_to_end(&mut buffer)
                    .map_err(|e| archive_error(archive_path, e))?;
                Ok(Box::new(Cursor::new(buffer)))
            }
        }
    }

    /// a name for this feed suitable for log messages.
    pub fn describe(&self, table: FeedTable) -> String {
        let path = match self {
            FeedSource::Directory(p) => p,
            FeedSource::Archive(p) => p,
        };
        path.join(table.filename())
            .to_str()
            .unwrap_or(table.filename())
            .to_string()
    }
}

fn open_archive(archive_path: &Path) -> Result<ZipArchive<File>, ArtifactError> {
    let file = File::open(archive_path).map_err(|e| archive_error(archive_path, e))?;
    ZipArchive::new(file).map_err(|e| archive_error(archive_path, e))
}

fn missing(filepath: &Path) -> ArtifactError {
    ArtifactError::MissingFile {
        filepath: filepath.to_str().unwrap_or_default().to_string(),
    }
}

fn archive_error(archive_path: &Path, error: impl Display) -> ArtifactError {
    ArtifactError::ArchiveError {
        filepath: archive_path.to_str().unwrap_or_default().to_string(),
        error: error.to_string(),
    }
}
