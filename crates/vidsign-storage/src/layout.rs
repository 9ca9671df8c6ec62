use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{StorageError, StorageResult};
use crate::file::StoredFile;
use vidsign_core::StoredFileKind;

/// The three storage roots, canonicalized at startup.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    uploads: PathBuf,
    outputs: PathBuf,
    manifests: PathBuf,
}

impl StorageLayout {
    /// Create the roots if absent and canonicalize them.
    ///
    /// # Arguments
    /// * `uploads` - Staging directory for incoming videos (never served)
    /// * `outputs` - Directory for signed videos
    /// * `manifests` - Directory for manifest reports
    pub async fn new(
        uploads: impl Into<PathBuf>,
        outputs: impl Into<PathBuf>,
        manifests: impl Into<PathBuf>,
    ) -> StorageResult<Self> {
        let uploads = Self::prepare_root(uploads.into()).await?;
        let outputs = Self::prepare_root(outputs.into()).await?;
        let manifests = Self::prepare_root(manifests.into()).await?;

        if uploads == outputs || uploads == manifests || outputs == manifests {
            return Err(StorageError::Unavailable(
                "Upload, output and manifest directories must be distinct".to_string(),
            ));
        }

        tracing::info!(
            uploads = %uploads.display(),
            outputs = %outputs.display(),
            manifests = %manifests.display(),
            "Storage layout ready"
        );

        Ok(Self {
            uploads,
            outputs,
            manifests,
        })
    }

    async fn prepare_root(path: PathBuf) -> StorageResult<PathBuf> {
        fs::create_dir_all(&path).await.map_err(|e| {
            StorageError::Unavailable(format!(
                "Failed to create storage directory {}: {}",
                path.display(),
                e
            ))
        })?;

        fs::canonicalize(&path).await.map_err(|e| {
            StorageError::Unavailable(format!(
                "Failed to canonicalize storage directory {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn root(&self, kind: StoredFileKind) -> &Path {
        match kind {
            StoredFileKind::Input => &self.uploads,
            StoredFileKind::Output => &self.outputs,
            StoredFileKind::Manifest => &self.manifests,
        }
    }

    /// Map a filename to a path inside the root for `kind`.
    ///
    /// The name must be a single plain path component. If the joined path
    /// already exists it is canonicalized, so a symlink pointing outside the
    /// root is rejected as well.
    pub fn resolve(&self, kind: StoredFileKind, filename: &str) -> StorageResult<StoredFile> {
        validate_component(filename)?;

        let root = self.root(kind);
        let path = root.join(filename);

        let path = match path.canonicalize() {
            Ok(canonical) => {
                let is_strict_child = canonical
                    .strip_prefix(root)
                    .map(|rest| !rest.as_os_str().is_empty())
                    .unwrap_or(false);
                if !is_strict_child {
                    tracing::warn!(
                        kind = %kind,
                        filename = %filename,
                        "Filename resolves outside its storage root"
                    );
                    return Err(StorageError::PathTraversal(
                        "Filename resolves outside storage directory".to_string(),
                    ));
                }
                canonical
            }
            // Not created yet; the name is a single component so the joined
            // path is a direct child of the root.
            Err(_) => path,
        };

        Ok(StoredFile::new(kind, filename.to_string(), path))
    }

    /// Find an existing file among `kinds`, in order.
    ///
    /// Unresolvable names are reported as `NotFound` so callers never reveal
    /// which check failed.
    pub async fn locate(
        &self,
        kinds: &[StoredFileKind],
        filename: &str,
    ) -> StorageResult<StoredFile> {
        for kind in kinds {
            match self.resolve(*kind, filename) {
                Ok(file) if file.exists().await => return Ok(file),
                Ok(_) => continue,
                Err(StorageError::PathTraversal(_)) => {
                    return Err(StorageError::NotFound(filename.to_string()))
                }
                Err(e) => return Err(e),
            }
        }
        Err(StorageError::NotFound(filename.to_string()))
    }
}

fn validate_component(filename: &str) -> StorageResult<()> {
    let rejected = filename.is_empty()
        || filename == "."
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
        || filename.chars().any(|c| c.is_control())
        || Path::new(filename).is_absolute();

    if rejected {
        return Err(StorageError::PathTraversal(
            "Filename contains invalid path components".to_string(),
        ));
    }
    Ok(())
}
