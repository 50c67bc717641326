//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpThumbnailError>`. The status code comes from
//! [`ErrorMetadata`], so a retrievable store fault answers 503 (the platform
//! redelivers) and every permanent failure answers 4xx (the platform gives up
//! or dead-letters). Bodies over the delivery size limit answer 413.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use thumbnailer_core::{ErrorMetadata, LogLevel, ThumbnailError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether redelivering the same event may succeed
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

#[derive(Debug)]
pub enum HttpThumbnailError {
    /// The pipeline ran and failed.
    Pipeline(ThumbnailError),
    /// The delivery body is not a storage-object event.
    InvalidEvent(String),
    /// The delivery body exceeds the request size limit.
    BodyTooLarge(String),
}

impl From<ThumbnailError> for HttpThumbnailError {
    fn from(err: ThumbnailError) -> Self {
        HttpThumbnailError::Pipeline(err)
    }
}

/// Convert JSON body rejections into our ErrorResponse format: 413 when the
/// body hit the size limit, 400 otherwise.
impl From<JsonRejection> for HttpThumbnailError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return HttpThumbnailError::BodyTooLarge(rejection.body_text());
        }
        HttpThumbnailError::InvalidEvent(format!(
            "Invalid event payload: {}",
            rejection.body_text()
        ))
    }
}

impl std::fmt::Display for HttpThumbnailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpThumbnailError::Pipeline(err) => write!(f, "{}", err),
            HttpThumbnailError::InvalidEvent(message) => f.write_str(message),
            HttpThumbnailError::BodyTooLarge(message) => {
                write!(f, "Event body too large: {}", message)
            }
        }
    }
}

impl ErrorMetadata for HttpThumbnailError {
    fn http_status_code(&self) -> u16 {
        match self {
            HttpThumbnailError::Pipeline(err) => err.http_status_code(),
            HttpThumbnailError::InvalidEvent(_) => 400,
            HttpThumbnailError::BodyTooLarge(_) => 413,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            HttpThumbnailError::Pipeline(err) => err.error_code(),
            HttpThumbnailError::InvalidEvent(_) => "INVALID_EVENT",
            HttpThumbnailError::BodyTooLarge(_) => "PAYLOAD_TOO_LARGE",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            HttpThumbnailError::Pipeline(err) => err.is_recoverable(),
            HttpThumbnailError::InvalidEvent(_) | HttpThumbnailError::BodyTooLarge(_) => false,
        }
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            HttpThumbnailError::Pipeline(err) => err.suggested_action(),
            HttpThumbnailError::InvalidEvent(_) => {
                Some("Send a storage-object JSON body with bucket and name")
            }
            HttpThumbnailError::BodyTooLarge(_) => {
                Some("Event bodies carry object metadata only, never object bytes")
            }
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            HttpThumbnailError::Pipeline(err) => err.log_level(),
            HttpThumbnailError::InvalidEvent(_) | HttpThumbnailError::BodyTooLarge(_) => {
                LogLevel::Debug
            }
        }
    }
}

impl HttpThumbnailError {
    fn error_type(&self) -> &'static str {
        match self {
            HttpThumbnailError::Pipeline(err) => err.error_type(),
            HttpThumbnailError::InvalidEvent(_) => "InvalidEvent",
            HttpThumbnailError::BodyTooLarge(_) => "BodyTooLarge",
        }
    }

    /// Message safe to show outside the service.
    fn client_message(&self) -> String {
        match self {
            HttpThumbnailError::Pipeline(ThumbnailError::Retrievable { operation, .. }) => {
                format!("Transient object store fault during {}", operation)
            }
            HttpThumbnailError::Pipeline(ThumbnailError::Permanent(_)) => {
                "Event cannot be processed".to_string()
            }
            HttpThumbnailError::Pipeline(ThumbnailError::Decode(_)) => {
                "Object is not a valid image of its declared type".to_string()
            }
            HttpThumbnailError::Pipeline(ThumbnailError::UnsupportedFormat(_)) => {
                "Unsupported image format".to_string()
            }
            HttpThumbnailError::Pipeline(ThumbnailError::Encode(_)) => {
                "Thumbnail could not be encoded".to_string()
            }
            HttpThumbnailError::InvalidEvent(_) => "Invalid event payload".to_string(),
            HttpThumbnailError::BodyTooLarge(_) => "Event body too large".to_string(),
        }
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpThumbnailError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpThumbnailError::from)?;
        Ok(ValidatedJson(inner))
    }
}

// The pipeline already logged its own failures with full context.
fn log_error(error: &HttpThumbnailError) {
    if let HttpThumbnailError::InvalidEvent(_) | HttpThumbnailError::BodyTooLarge(_) = error {
        match error.log_level() {
            LogLevel::Debug => tracing::debug!(error = %error, "Rejected event delivery"),
            LogLevel::Warn => tracing::warn!(error = %error, "Rejected event delivery"),
            LogLevel::Error => tracing::error!(error = %error, "Rejected event delivery"),
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl HttpThumbnailError {
    /// Render the error response. In production `details` and `error_type`
    /// are omitted so store messages and object paths stay internal.
    pub fn into_response_for(self, is_production: bool) -> Response {
        let status =
            StatusCode::from_u16(self.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self);

        let (details, error_type) = if is_production {
            (None, None)
        } else {
            (Some(self.to_string()), Some(self.error_type().to_string()))
        };

        let body = Json(ErrorResponse {
            error: self.client_message(),
            details,
            error_type,
            code: self.error_code().to_string(),
            recoverable: self.is_recoverable(),
            suggested_action: self.suggested_action().map(String::from),
        });

        (status, body).into_response()
    }
}

impl IntoResponse for HttpThumbnailError {
    fn into_response(self) -> Response {
        self.into_response_for(is_production_env())
    }
}
