use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use flate2::read::GzDecoder;

use super::error::ArchiveError;

/// Compressed segments rotated out earlier the same day, oldest first.
/// A file qualifies only when its name starts with the day's date stamp
/// AND it carries the gz extension; everything else in the directory is
/// ignored.
pub fn same_day_archives(dir: &Path, date: NaiveDate) -> Result<Vec<PathBuf>, ArchiveError> {
    let stamp = date.format("%Y-%m-%d").to_string();
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|source| ArchiveError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_same_day_archive(path, &stamp))
        .collect();
    paths.sort();
    Ok(paths)
}

fn is_same_day_archive(path: &Path, stamp: &str) -> bool {
    if path.extension().and_then(|ext| ext.to_str()) != Some("gz") {
        return false;
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.starts_with(stamp))
}

/// Decompressed lines of one archive segment.
pub fn read_archive_lines(path: &Path) -> Result<Vec<String>, ArchiveError> {
    let file = fs::File::open(path).map_err(|source| ArchiveError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(GzDecoder::new(file));
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|source| ArchiveError::Decompress {
            path: path.to_path_buf(),
            source,
        })?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}
