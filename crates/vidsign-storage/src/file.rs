use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use crate::error::{StorageError, StorageResult};
use vidsign_core::StoredFileKind;

/// A file inside one of the storage roots.
///
/// Only [`StorageLayout::resolve`](crate::StorageLayout::resolve) constructs
/// these, so `path` is always inside the root for `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    kind: StoredFileKind,
    filename: String,
    path: PathBuf,
}

impl StoredFile {
    pub(crate) fn new(kind: StoredFileKind, filename: String, path: PathBuf) -> Self {
        Self {
            kind,
            filename,
            path,
        }
    }

    pub fn kind(&self) -> StoredFileKind {
        self.kind
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file for writing. Fails if it already exists.
    pub async fn create(&self) -> StorageResult<File> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::AlreadyExists(self.filename.clone()),
                _ => StorageError::Unavailable(format!(
                    "Failed to create file {}: {}",
                    self.path.display(),
                    e
                )),
            })
    }

    pub async fn open(&self) -> StorageResult<File> {
        File::open(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(self.filename.clone()),
            _ => StorageError::Unavailable(format!(
                "Failed to open file {}: {}",
                self.path.display(),
                e
            )),
        })
    }

    /// Open the file as a chunked byte stream.
    pub async fn stream(&self) -> StorageResult<ReaderStream<File>> {
        let file = self.open().await?;
        Ok(ReaderStream::new(file))
    }

    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    pub async fn len(&self) -> StorageResult<u64> {
        let meta = fs::metadata(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(self.filename.clone()),
            _ => StorageError::IoError(e),
        })?;
        Ok(meta.len())
    }

    /// Delete the file. Deleting a missing file succeeds.
    pub async fn remove(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!(
                    kind = %self.kind,
                    filename = %self.filename,
                    "Stored file removed"
                );
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Unavailable(format!(
                "Failed to delete file {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Write `data` to a new file. Fails if the file already exists.
    pub async fn write(&self, data: &[u8]) -> StorageResult<()> {
        let start = std::time::Instant::now();
        let mut file = self.create().await?;

        file.write_all(data).await.map_err(|e| {
            StorageError::Unavailable(format!(
                "Failed to write file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::Unavailable(format!(
                "Failed to sync file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!(
            kind = %self.kind,
            filename = %self.filename,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Stored file written"
        );

        Ok(())
    }
}
