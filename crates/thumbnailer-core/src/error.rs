//! Error types module
//!
//! `ThumbnailError` is the failure taxonomy of one pipeline invocation. Skips
//! are not errors and never appear here; see `PipelineOutcome::Skipped`.
//!
//! Every variant self-describes through [`ErrorMetadata`] so the transport
//! binding can decide between "redeliver" and "give up" without matching on
//! variants itself.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed events
    Debug,
    /// Warning level - for bad input data and transient faults
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return to the transport
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "RETRIEVABLE_STORE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (redelivery may succeed)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the caller
    fn suggested_action(&self) -> Option<&'static str>;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Object-store call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Download,
    Upload,
}

impl Display for StoreOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StoreOperation::Download => f.write_str("download"),
            StoreOperation::Upload => f.write_str("upload"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    /// Transient store fault; the transport may redeliver.
    #[error("Transient store fault during {operation}: {message}")]
    Retrievable {
        operation: StoreOperation,
        message: String,
    },

    /// Terminal failure (object gone, malformed event, misconfigured bucket).
    #[error("Permanent failure: {0}")]
    Permanent(String),

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Image encode error: {0}")]
    Encode(String),
}

/// Result type for pipeline operations
pub type ThumbnailResult<T> = Result<T, ThumbnailError>;

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, log_level).
fn thumbnail_error_static_metadata(
    err: &ThumbnailError,
) -> (u16, &'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        ThumbnailError::Retrievable { .. } => (
            503,
            "RETRIEVABLE_STORE_ERROR",
            true,
            Some("Redeliver the event after a short delay"),
            LogLevel::Warn,
        ),
        ThumbnailError::Permanent(_) => (
            422,
            "PERMANENT_ERROR",
            false,
            Some("Do not redeliver; inspect the source object and event"),
            LogLevel::Error,
        ),
        ThumbnailError::Decode(_) => (
            422,
            "IMAGE_DECODE_ERROR",
            false,
            Some("Check that the object bytes match its declared content type"),
            LogLevel::Warn,
        ),
        ThumbnailError::UnsupportedFormat(_) => (
            422,
            "UNSUPPORTED_FORMAT",
            false,
            Some("Upload JPEG, PNG, GIF or WebP images"),
            LogLevel::Warn,
        ),
        ThumbnailError::Encode(_) => (
            422,
            "IMAGE_ENCODE_ERROR",
            false,
            Some("Check the thumbnail dimensions against the source aspect ratio"),
            LogLevel::Error,
        ),
    }
}

impl ThumbnailError {
    pub fn retrievable(operation: StoreOperation, message: impl Into<String>) -> Self {
        ThumbnailError::Retrievable {
            operation,
            message: message.into(),
        }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        ThumbnailError::Permanent(message.into())
    }

    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            ThumbnailError::Retrievable { .. } => "Retrievable",
            ThumbnailError::Permanent(_) => "Permanent",
            ThumbnailError::Decode(_) => "Decode",
            ThumbnailError::UnsupportedFormat(_) => "UnsupportedFormat",
            ThumbnailError::Encode(_) => "Encode",
        }
    }
}

impl ErrorMetadata for ThumbnailError {
    fn http_status_code(&self) -> u16 {
        thumbnail_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        thumbnail_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        thumbnail_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        thumbnail_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        thumbnail_error_static_metadata(self).4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_retrievable_is_recoverable() {
        let errors = [
            ThumbnailError::retrievable(StoreOperation::Download, "timeout"),
            ThumbnailError::permanent("gone"),
            ThumbnailError::Decode("bad bytes".into()),
            ThumbnailError::UnsupportedFormat("image/svg+xml".into()),
            ThumbnailError::Encode("zero area".into()),
        ];

        let recoverable: Vec<bool> = errors.iter().map(|e| e.is_recoverable()).collect();
        assert_eq!(recoverable, vec![true, false, false, false, false]);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ThumbnailError::retrievable(StoreOperation::Upload, "reset").http_status_code(),
            503
        );
        assert_eq!(ThumbnailError::permanent("gone").http_status_code(), 422);
        assert_eq!(
            ThumbnailError::UnsupportedFormat("image/heic".into()).error_code(),
            "UNSUPPORTED_FORMAT"
        );
    }

    #[test]
    fn test_display_mentions_operation() {
        let err = ThumbnailError::retrievable(StoreOperation::Upload, "connection reset");
        assert_eq!(
            err.to_string(),
            "Transient store fault during upload: connection reset"
        );
        assert_eq!(err.error_type(), "Retrievable");
    }
}
