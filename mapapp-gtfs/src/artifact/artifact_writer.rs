use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use serde::Serialize;

use super::ArtifactError;

/// writes artifacts as compact JSON below an output directory.
///
/// each file is written to a `.tmp` sibling and renamed into place, so a
/// reader never sees a partially written artifact. when `overwrite` is
/// false, existing files are left alone.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_directory: PathBuf,
    overwrite: bool,
}

impl ArtifactWriter {
    pub fn new(output_directory: &Path, overwrite: bool) -> ArtifactWriter {
        ArtifactWriter {
            output_directory: output_directory.to_path_buf(),
            overwrite,
        }
    }

    /// writes one value to `<output_directory>/<filename>`. returns false if
    /// the file already existed and was kept.
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        filename: &str,
        value: &T,
    ) -> Result<bool, ArtifactError> {
        create_dirs(&self.output_directory)?;
        write_file(&self.output_directory.join(filename), value, self.overwrite)
    }

    /// writes one `<key>.json` file per entry into `<output_directory>/<subdirectory>`,
    /// next to any files already there. every key is validated before the
    /// first file is created. returns the number of files written.
    pub fn write_per_key<'a, K, T>(
        &self,
        subdirectory: &str,
        entries: impl IntoParallelIterator<Item = (&'a K, &'a T)>,
    ) -> Result<usize, ArtifactError>
    where
        K: AsRef<str> + Sync + ?Sized + 'a,
        T: Serialize + Sync + ?Sized + 'a,
    {
        let entries = validated_entries(subdirectory, entries)?;
        let directory = self.output_directory.join(subdirectory);
        create_dirs(&directory)?;
        write_entries(&directory, entries, self.overwrite)
    }

    /// like [`ArtifactWriter::write_per_key`], but the directory ends up holding
    /// exactly these entries. files are written to a `<subdirectory>.tmp`
    /// sibling which then replaces the previous directory, so keys absent from
    /// `entries` do not survive from an earlier run. when `overwrite` is false
    /// this falls back to `write_per_key`.
    pub fn replace_per_key<'a, K, T>(
        &self,
        subdirectory: &str,
        entries: impl IntoParallelIterator<Item = (&'a K, &'a T)>,
    ) -> Result<usize, ArtifactError>
    where
        K: AsRef<str> + Sync + ?Sized + 'a,
        T: Serialize + Sync + ?Sized + 'a,
    {
        if !self.overwrite {
            return self.write_per_key(subdirectory, entries);
        }
        let entries = validated_entries(subdirectory, entries)?;
        let directory = self.output_directory.join(subdirectory);
        let staging = self.output_directory.join(format!("{subdirectory}.tmp"));
        remove_dir(&staging)?;
        create_dirs(&staging)?;
        let written = write_entries(&staging, entries, true)?;
        remove_dir(&directory)?;
        std::fs::rename(&staging, &directory).map_err(|e| ArtifactError::WriteError {
            filepath: directory.to_str().unwrap_or_default().to_string(),
            error: e.to_string(),
        })?;
        Ok(written)
    }
}

fn validated_entries<'a, K, T>(
    subdirectory: &str,
    entries: impl IntoParallelIterator<Item = (&'a K, &'a T)>,
) -> Result<Vec<(&'a K, &'a T)>, ArtifactError>
where
    K: AsRef<str> + Sync + ?Sized + 'a,
    T: Sync + ?Sized + 'a,
{
    validate_key(subdirectory)?;
    let entries: Vec<(&'a K, &'a T)> = entries.into_par_iter().collect();
    entries
        .iter()
        .try_for_each(|(key, _)| validate_key(key.as_ref()))?;
    Ok(entries)
}

fn write_entries<K, T>(
    directory: &Path,
    entries: Vec<(&K, &T)>,
    overwrite: bool,
) -> Result<usize, ArtifactError>
where
    K: AsRef<str> + Sync + ?Sized,
    T: Serialize + Sync + ?Sized,
{
    let written = entries
        .into_par_iter()
        .map(|(key, value)| {
            let key = key.as_ref();
            write_file(&directory.join(format!("{key}.json")), value, overwrite)
        })
        .collect::<Result<Vec<bool>, ArtifactError>>()?;
    Ok(written.into_iter().filter(|w| *w).count())
}

/// rejects keys that would escape the output directory or cannot be file names.
fn validate_key(key: &str) -> Result<(), ArtifactError> {
    let invalid = key.is_empty()
        || key == "."
        || key.contains("..")
        || key.contains('/')
        || key.contains('\\')
        || key.contains('\0');
    if invalid {
        Err(ArtifactError::InvalidOutputKey(key.to_string()))
    } else {
        Ok(())
    }
}

fn write_file<T: Serialize + ?Sized>(
    filepath: &Path,
    value: &T,
    overwrite: bool,
) -> Result<bool, ArtifactError> {
    let filename = filepath.to_str().unwrap_or_default().to_string();
    if filepath.exists() && !overwrite {
        log::warn!("'{filename}' exists and overwrite is disabled, leaving it in place");
        return Ok(false);
    }
    let write_error = |error: String| ArtifactError::WriteError {
        filepath: filename.clone(),
        error,
    };
    let mut tmp_path = filepath.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    let file = File::create(&tmp_path).map_err(|e| write_error(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value).map_err(|e| write_error(e.to_string()))?;
    writer.flush().map_err(|e| write_error(e.to_string()))?;
    drop(writer);
    std::fs::rename(&tmp_path, filepath).map_err(|e| write_error(e.to_string()))?;
    Ok(true)
}

/// "rm -rf path", a no-op when nothing is there
fn remove_dir(path: &Path) -> Result<(), ArtifactError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| ArtifactError::WriteError {
            filepath: path.to_str().unwrap_or_default().to_string(),
            error: e.to_string(),
        })
    } else {
        Ok(())
    }
}

/// helper function to "mkdir -p path" - make all directories along a path
fn create_dirs(path: &Path) -> Result<(), ArtifactError> {
    if !path.is_dir() {
        std::fs::create_dir_all(path).map_err(|e| {
            let msg = format!(
                "error building output directory '{}': {e}",
                path.to_str().unwrap_or_default()
            );
            ArtifactError::InvalidUserInput(msg)
        })
    } else {
        Ok(())
    }
}
