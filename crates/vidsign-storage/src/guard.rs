use std::io::ErrorKind;

use crate::file::StoredFile;

/// Removes its file when dropped unless [`keep`](CleanupGuard::keep) is
/// called.
///
/// Runs on every exit path, including early returns, panics and futures
/// dropped because the client went away.
#[derive(Debug)]
pub struct CleanupGuard {
    file: StoredFile,
    armed: bool,
}

impl CleanupGuard {
    pub fn new(file: StoredFile) -> Self {
        Self { file, armed: true }
    }

    pub fn file(&self) -> &StoredFile {
        &self.file
    }

    /// Release ownership; the file survives the guard.
    pub fn keep(mut self) -> StoredFile {
        self.armed = false;
        self.file.clone()
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        match std::fs::remove_file(self.file.path()) {
            Ok(()) => tracing::debug!(
                kind = %self.file.kind(),
                filename = %self.file.filename(),
                "Cleaned up job file"
            ),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                kind = %self.file.kind(),
                filename = %self.file.filename(),
                error = %e,
                "Failed to clean up job file"
            ),
        }
    }
}
