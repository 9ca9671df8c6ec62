//! HTTP error response conversion
//!
//! Handlers return `Result<Response, HttpAppError>`. Anything that converts
//! into `AppError` converts into `HttpAppError` and renders as an
//! [`ErrorResponse`] with the status its `ErrorMetadata` declares.
//!
//! Bodies are rendered without diagnostics. [`error_details_middleware`]
//! adds them back for non-sensitive errors when [`ErrorDetailsPolicy`]
//! allows it.

use axum::{
    body::Body,
    extract::{multipart::MultipartError, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use vidsign_core::{AppError, Config, ErrorMetadata, LogLevel, ValidationError};
use vidsign_infra::ErrorResponse;
use vidsign_signer::SignerError;
use vidsign_storage::StorageError;

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from vidsign-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<SignerError> for HttpAppError {
    fn from(err: SignerError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        HttpAppError(err.into())
    }
}

/// Body-limit overruns surface as multipart errors with a 413 status.
impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        let app = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::FileTooLarge("Request body exceeds the maximum upload size".to_string())
        } else {
            AppError::InvalidInput(format!("Malformed multipart body: {}", err.body_text()))
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error,
                error_type = error_type,
                details = %error.detailed_message(),
                "Error occurred"
            );
        }
    }
}

/// Full error body, including diagnostics, carried on the response until
/// [`error_details_middleware`] decides whether the client may see it.
#[derive(Debug, Clone)]
struct DetailedErrorBody(ErrorResponse);

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let mut body = ErrorResponse::new(app_error.client_message(), app_error.error_code());
        body.recoverable = app_error.is_recoverable();
        body.suggested_action = app_error.suggested_action().map(String::from);

        // Rendered without details; sensitive errors never carry them
        let detailed = (!app_error.is_sensitive()).then(|| {
            let mut detailed = body.clone();
            detailed.details = Some(app_error.detailed_message());
            detailed.error_type = Some(app_error.error_type().to_string());
            DetailedErrorBody(detailed)
        });

        let mut response = (status, Json(body)).into_response();
        if let Some(detailed) = detailed {
            response.extensions_mut().insert(detailed);
        }
        response
    }
}

/// Whether error responses may include diagnostics. Built once from
/// [`Config`]; production never exposes them.
#[derive(Debug, Clone, Copy)]
pub struct ErrorDetailsPolicy {
    pub expose_details: bool,
}

impl ErrorDetailsPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            expose_details: !config.is_production(),
        }
    }
}

/// Swaps in the detailed error body when the policy allows it.
pub async fn error_details_middleware(
    State(policy): State<ErrorDetailsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(DetailedErrorBody(detailed)) = response.extensions_mut().remove::<DetailedErrorBody>()
    else {
        return response;
    };
    if !policy.expose_details {
        return response;
    }

    let bytes = match serde_json::to_vec(&detailed) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize detailed error body");
            return response;
        }
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
