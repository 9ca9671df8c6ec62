use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Which managed storage root a file lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoredFileKind {
    /// Staged upload awaiting signing. Never served.
    Input,
    /// Signed video.
    Output,
    /// Manifest store report of a signed video.
    Manifest,
}

impl StoredFileKind {
    /// Kinds that may be downloaded, in lookup order.
    pub const SERVABLE: [StoredFileKind; 2] = [StoredFileKind::Output, StoredFileKind::Manifest];
}

impl Display for StoredFileKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StoredFileKind::Input => write!(f, "input"),
            StoredFileKind::Output => write!(f, "output"),
            StoredFileKind::Manifest => write!(f, "manifest"),
        }
    }
}
