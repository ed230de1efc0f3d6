//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::ffi::OsString;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::DiaryError;

/// Read every record of a headed CSV file, returning nothing if the file doesn't exist
pub fn read_csv<T, P>(path: P) -> Result<Vec<T>, DiaryError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| DiaryError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    reader
        .deserialize::<T>()
        .enumerate()
        .map(|(row, record)| {
            record.map_err(|e| {
                DiaryError::Storage(format!(
                    "Failed to parse {} record {}: {}",
                    path.display(),
                    row + 1,
                    e
                ))
            })
        })
        .collect()
}

/// Serialize records to CSV with a header row
///
/// The header is written even when there are no records.
pub fn to_csv_bytes<T: Serialize>(records: &[T], headers: &[&str]) -> Result<Vec<u8>, DiaryError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| DiaryError::Storage(format!("Failed to flush CSV data: {}", e)))
}

/// Sibling path used while writing `path`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// This ensures that the file is either completely written or not modified at all,
/// preventing corruption on crashes or power failures.
pub async fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<(), DiaryError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            DiaryError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file lives in the same directory so the rename stays atomic
    let temp_path = temp_path_for(path);

    let mut file = tokio::fs::File::create(&temp_path)
        .await
        .map_err(|e| DiaryError::Storage(format!("Failed to create temp file: {}", e)))?;

    file.write_all(contents)
        .await
        .map_err(|e| DiaryError::Storage(format!("Failed to write data: {}", e)))?;

    file.flush()
        .await
        .map_err(|e| DiaryError::Storage(format!("Failed to flush data: {}", e)))?;

    file.sync_all()
        .await
        .map_err(|e| DiaryError::Storage(format!("Failed to sync data: {}", e)))?;

    drop(file);

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(DiaryError::Storage(format!(
            "Failed to replace {}: {}",
            path.display(),
            e
        )));
    }

    Ok(())
}
