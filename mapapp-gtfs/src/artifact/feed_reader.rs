use std::io::Read;

use csv::{DeserializeRecordsIntoIter, ReaderBuilder, Trim};

use super::{ArtifactError, FeedRow, FeedSource, MalformedRowPolicy};

/// lazily deserializes the rows of one feed table.
///
/// all id and time columns stay text; the header is checked for the row
/// type's required columns before the first row is read. rows that fail
/// to deserialize are handled by the [`MalformedRowPolicy`]: under
/// `Fail` the error is yielded with its row number and iteration ends,
/// under `Skip` the row is logged, counted and passed over. I/O errors
/// always end iteration.
pub struct FeedReader<T: FeedRow> {
    rows: DeserializeRecordsIntoIter<Box<dyn Read + Send>, T>,
    filename: String,
    policy: MalformedRowPolicy,
    row: usize,
    skipped: usize,
    done: bool,
}

impl<T: FeedRow> FeedReader<T> {
    pub fn new(source: &FeedSource, policy: MalformedRowPolicy) -> Result<Self, ArtifactError> {
        let reader = source.open(T::TABLE)?;
        Self::from_reader(reader, &source.describe(T::TABLE), policy)
    }

    pub fn from_reader(
        reader: Box<dyn Read + Send>,
        filename: &str,
        policy: MalformedRowPolicy,
    ) -> Result<Self, ArtifactError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(reader);
        let headers = csv_reader.headers().map_err(|e| ArtifactError::Parse {
            filename: filename.to_string(),
            row: 0,
            message: format!("unreadable header: {e}"),
        })?;
        if let Some(column) = T::REQUIRED_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|h| h == **column))
        {
            return Err(ArtifactError::MissingColumn {
                filename: filename.to_string(),
                column: column.to_string(),
            });
        }
        Ok(Self {
            rows: csv_reader.into_deserialize(),
            filename: filename.to_string(),
            policy,
            row: 0,
            skipped: 0,
            done: false,
        })
    }

    /// number of rows passed over under [`MalformedRowPolicy::Skip`].
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

impl<T: FeedRow> Iterator for FeedReader<T> {
    type Item = Result<T, ArtifactError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let result = self.rows.next()?;
            self.row += 1;
            match result {
                Ok(row) => return Some(Ok(row)),
                Err(e) => {
                    let error = ArtifactError::Parse {
                        filename: self.filename.clone(),
                        row: self.row,
                        message: e.to_string(),
                    };
                    if e.is_io_error() || self.policy == MalformedRowPolicy::Fail {
                        self.done = true;
                        return Some(Err(error));
                    }
                    log::warn!("skipping malformed row: {error}");
                    self.skipped += 1;
                }
            }
        }
    }
}
