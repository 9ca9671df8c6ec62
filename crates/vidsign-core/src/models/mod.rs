//! Data models for the application
//!
//! Each sub-module represents a specific feature area.

mod job;
mod metadata;
mod storage;

pub use job::*;
pub use metadata::*;
pub use storage::*;
