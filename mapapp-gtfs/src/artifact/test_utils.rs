use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use zip::{write::SimpleFileOptions, ZipWriter};

/// an empty directory unique to one test, under the system temp directory.
pub fn scratch_dir(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "mapapp-gtfs-{}-{test_name}",
        std::process::id()
    ));
    if dir.exists() {
        std::fs::remove_dir_all(&dir)
            .unwrap_or_else(|e| panic!("failed clearing scratch dir {dir:?}: {e}"));
    }
    std::fs::create_dir_all(&dir)
        .unwrap_or_else(|e| panic!("failed creating scratch dir {dir:?}: {e}"));
    dir
}

pub fn write_table(dir: &Path, filename: &str, contents: &str) {
    std::fs::write(dir.join(filename), contents)
        .unwrap_or_else(|e| panic!("failed writing {filename}: {e}"));
}

pub fn write_archive(archive_path: &Path, tables: &[(&str, &str)]) {
    let file = File::create(archive_path).expect("create archive file");
    let mut writer = ZipWriter::new(file);
    for (filename, contents) in tables {
        writer
            .start_file(*filename, SimpleFileOptions::default())
            .expect("start archive entry");
        writer
            .write_all(contents.as_bytes())
            .expect("write archive entry");
    }
    writer.finish().expect("finish archive");
}

/// the sample feed checked in under `test/stm_sample`.
pub fn sample_feed_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test")
        .join("stm_sample")
}

/// names of all regular files directly inside a directory, sorted.
pub fn list_files(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return vec![];
    }
    let mut names = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry"))
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect::<Vec<_>>();
    names.sort();
    names
}
