//! Request-scoped services behind the HTTP handlers

pub mod response;
pub mod signing;

pub use response::{SignVideoResponse, SignedLinks, SignedVideoMetadata};
pub use signing::sign_upload;
