use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Matches the description Telegram returns when a referenced reply is gone.
static REPLY_NOT_FOUND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)reply message not found").expect("valid regex"));

/// Field-level validation failures raised by the wire engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field had no value (or an explicit `null`)
    #[error("{object}: missing required field `{field}`")]
    MissingRequiredField {
        object: &'static str,
        field: &'static str,
    },

    /// A value does not match the declared field type
    #[error("{object}: field `{field}` expected {expected}, found {found}")]
    TypeMismatch {
        object: &'static str,
        field: &'static str,
        expected: String,
        found: &'static str,
    },

    /// An object stored in a one-of field is none of the declared variants
    #[error("{object}: field `{field}` cannot hold a {found}")]
    UnknownVariant {
        object: &'static str,
        field: &'static str,
        found: &'static str,
    },

    /// No declared variant accepted the incoming wire map
    #[error("{object}: field `{field}` matched none of its variants")]
    NoVariantMatched {
        object: &'static str,
        field: &'static str,
    },

    /// The schema declares no field with this name
    #[error("{object} has no field named `{field}`")]
    UnknownField { object: &'static str, field: String },
}

/// Structured error reported by the Telegram Bot API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Telegram API error {error_code}: {description}")]
pub struct ApiError {
    /// Numeric error code (mirrors the HTTP status)
    pub error_code: i64,
    /// Human readable description
    pub description: String,
}

impl ApiError {
    pub fn new<S: AsRef<str>>(error_code: i64, description: S) -> Self {
        ApiError {
            error_code,
            description: description.as_ref().to_string(),
        }
    }

    /// Whether the server rejected the request because the replied-to
    /// message no longer exists.
    ///
    /// Telegram exposes no machine-readable subcode for this, so the
    /// description text is matched.
    pub fn is_reply_not_found(&self) -> bool {
        self.error_code == 400 && REPLY_NOT_FOUND.is_match(&self.description)
    }
}

/// Error types for Telegrama operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API error from Telegram
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Local field validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Create a new configuration error
    pub fn configuration<S: AsRef<str>>(message: S) -> Self {
        Error::Configuration(message.as_ref().to_string())
    }

    /// Create a new API error
    pub fn api<S: AsRef<str>>(error_code: i64, description: S) -> Self {
        Error::Api(ApiError::new(error_code, description))
    }

    /// The structured API error, if this is one
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}
