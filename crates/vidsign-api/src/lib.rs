//! Vidsign API Library
//!
//! HTTP surface of the video signing service: handlers, the signing
//! pipeline, response assembly and application setup.

mod api_doc;
pub mod constants;
mod handlers;
mod services;
pub mod setup;
mod utils;

pub mod error;
pub mod state;

pub use api_doc::ApiDoc;
pub use error::{ErrorDetailsPolicy, HttpAppError};
pub use state::AppState;
pub use vidsign_infra::ErrorResponse;
