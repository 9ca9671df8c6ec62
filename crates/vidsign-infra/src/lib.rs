//! Vidsign Infrastructure Library
//!
//! Shared infrastructure for the HTTP service:
//! - Middleware (request ID, security headers)
//! - Telemetry initialization
//! - Error response format

pub mod error;
pub mod middleware;
pub mod telemetry;

// Re-export commonly used types
pub use error::ErrorResponse;
pub use middleware::{
    request_id_middleware, security_headers_middleware, RequestId, SecurityHeadersConfig,
};
pub use telemetry::{init_telemetry, LogFormat};
