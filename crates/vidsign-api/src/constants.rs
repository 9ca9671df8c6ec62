//! API constants

/// Versioned prefix for every API route
pub const API_PREFIX: &str = "/api/v1";

/// Route of the served OpenAPI document
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Route of the interactive API docs
pub const DOCS_PATH: &str = "/docs";

/// Multipart field carrying the video
pub const VIDEO_FIELD: &str = "video";

/// Largest raw text metadata field accepted, in bytes. Enough for the
/// longest description at four bytes per character.
pub const MAX_TEXT_FIELD_BYTES: usize = 4 * vidsign_core::validation::MAX_DESCRIPTION_LENGTH;

/// Headroom above the maximum video size for multipart framing and text fields
pub const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;
