//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ExpenseError;

/// Platform default line separator used when writing line-oriented files
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Platform default line separator used when writing line-oriented files
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Read all lines of a text file, or `None` if the file doesn't exist
///
/// Both `\n` and `\r\n` terminators are accepted.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Option<Vec<String>>, ExpenseError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    BufReader::new(file)
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .map(Some)
        .map_err(|e| ExpenseError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Write lines to a file atomically, each followed by [`LINE_ENDING`]
pub fn write_lines_atomic<I, S, P>(path: P, lines: I) -> Result<(), ExpenseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: AsRef<Path>,
{
    write_atomic(path.as_ref(), |writer| {
        for line in lines {
            writer.write_all(line.as_ref().as_bytes())?;
            writer.write_all(LINE_ENDING.as_bytes())?;
        }
        Ok(())
    })
}

/// Write pretty JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ExpenseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path.as_ref(), |writer| {
        serde_json::to_writer_pretty(&mut *writer, data).map_err(io::Error::from)
    })
}

/// Path of the temp file used while writing `path`
///
/// Lives in the same directory so the final rename stays on one filesystem.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("data"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a file atomically (write to temp, then rename)
///
/// The target is either completely replaced or left exactly as it was.
fn write_atomic<F>(path: &Path, write: F) -> Result<(), ExpenseError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);

    let result = write_temp(&temp_path, write).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| ExpenseError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_temp<F>(temp_path: &Path, write: F) -> Result<(), ExpenseError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = File::create(temp_path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    write(&mut writer)
        .map_err(|e| ExpenseError::Storage(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| ExpenseError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ExpenseError::Storage(format!("Failed to sync data: {}", e)))
}
