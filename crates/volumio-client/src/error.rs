//! Error types for Volumio client operations

use reqwest::StatusCode;
use thiserror::Error;

/// Boxed cause of a connection error
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for Volumio client operations
pub type Result<T> = std::result::Result<T, VolumioError>;

/// Errors that can occur while talking to a Volumio device
///
/// Every failure collapses into [`VolumioError::CannotConnect`]: callers
/// only ever need to know that the device could not be used for this call.
#[derive(Error, Debug)]
pub enum VolumioError {
    /// The device was unreachable or answered with something other than 200
    #[error("Cannot connect to Volumio: {message}")]
    CannotConnect {
        message: String,
        /// Status returned by the device, when it answered at all
        status: Option<StatusCode>,
        /// Underlying transport or decode failure
        #[source]
        source: Option<BoxError>,
    },
}

impl VolumioError {
    /// Create an error for a device that answered with a non-200 status
    pub fn from_status(status: StatusCode) -> Self {
        Self::CannotConnect {
            message: format!("HTTP {}", status),
            status: Some(status),
            source: None,
        }
    }

    /// Create an error for an unusable response without a transport cause
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::CannotConnect {
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// HTTP status returned by the device, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::CannotConnect { status, .. } => *status,
        }
    }

    /// Whether the underlying transport timed out
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::CannotConnect { source, .. } => source
                .as_ref()
                .and_then(|e| e.downcast_ref::<reqwest::Error>())
                .is_some_and(|e| e.is_timeout()),
        }
    }
}

impl From<reqwest::Error> for VolumioError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else if err.is_builder() {
            "invalid request".to_string()
        } else {
            err.to_string()
        };

        Self::CannotConnect {
            message,
            status: err.status(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for VolumioError {
    fn from(err: serde_json::Error) -> Self {
        Self::CannotConnect {
            message: format!("error decoding response body: {}", err),
            status: None,
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        let err = VolumioError::from_status(StatusCode::NOT_FOUND);
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(!err.is_timeout());
        assert_eq!(
            err.to_string(),
            "Cannot connect to Volumio: HTTP 404 Not Found"
        );
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let decode = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = VolumioError::from(decode);
        assert!(err.status().is_none());
        assert!(!err.is_timeout());
        assert!(std::error::Error::source(&err)
            .is_some_and(|e| e.downcast_ref::<serde_json::Error>().is_some()));
    }

    #[test]
    fn test_invalid_response_has_no_source() {
        let err = VolumioError::invalid_response("missing navigation");
        assert!(err.status().is_none());
        assert!(std::error::Error::source(&err).is_none());
    }
}
