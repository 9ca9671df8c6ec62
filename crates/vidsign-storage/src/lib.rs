//! Vidsign Storage Library
//!
//! Owns the three flat storage roots of the service: staged uploads, signed
//! outputs and manifest reports.
//!
//! # Path safety
//!
//! Every path the service touches is produced by [`StorageLayout::resolve`].
//! Filenames must be plain names (no separators, no `..`, no control
//! characters) and must resolve to a strict descendant of their root after
//! symlinks are followed.

pub mod error;
pub mod file;
pub mod guard;
pub mod layout;

pub use error::{StorageError, StorageResult};
pub use file::StoredFile;
pub use guard::CleanupGuard;
pub use layout::StorageLayout;
pub use vidsign_core::StoredFileKind;
