//! Error types for route registration and configuration.
//!
//! Lookups never fail: a miss resolves to the router's NotFound or
//! MethodNotAllowed handler. Errors only come out of the setup phase, that is
//! registering or removing routes and loading configuration, and are expected
//! to abort application startup.
//!
//! # Design
//!
//! This module uses an opaque `Error` struct paired with an `ErrorKind` enum,
//! following the `std::io::Error` pattern. Internal error sources can change
//! without breaking consumers.
//!
//! # Example
//!
//! ```rust
//! use radix_router::{Error, ErrorKind, Router};
//!
//! let mut router = Router::new("not found", "not allowed");
//! router.add("users", "GET", "/users", "list").unwrap();
//!
//! let err = router.add("users", "GET", "/accounts", "list").unwrap_err();
//! match err.kind() {
//!     ErrorKind::RouteConflict => println!("Conflict: {}", err),
//!     _ => println!("Other error: {}", err),
//! }
//! ```

use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// The kind of error that occurred.
///
/// This enum is marked `#[non_exhaustive]`; always include a wildcard arm
/// when matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A route name is already bound to another path, or a path to another name.
    #[error("route conflict")]
    RouteConflict,

    /// A handler reference could not be resolved to a handler value.
    #[error("invalid handler")]
    InvalidHandler,

    /// A path pattern is malformed (e.g. text after a wildcard segment).
    #[error("invalid pattern")]
    InvalidPattern,

    /// Configuration error (invalid TOML, missing values).
    #[error("configuration error")]
    Configuration,

    /// I/O error (reading configuration files).
    #[error("I/O error")]
    Io,
}

/// An error returned by the router or its configuration layer.
///
/// Use [`Error::kind()`] to determine the category of error for matching,
/// and the `Display` implementation to get a human-readable message.
///
/// ```rust
/// use radix_router::Error;
///
/// let err = Error::route_conflict("name `home` is already bound to `/`");
/// let err = Error::invalid_pattern("nothing may follow a wildcard");
/// ```
pub struct Error {
    kind: ErrorKind,
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl Error {
    /// Creates a new error with the given kind and source.
    ///
    /// ```rust
    /// use radix_router::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Configuration, "missing [router] section");
    /// assert_eq!(err.kind(), ErrorKind::Configuration);
    /// ```
    pub fn new<E>(kind: ErrorKind, error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self {
            kind,
            source: error.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns a stable identifier for this error, suitable for logs and
    /// machine consumption.
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ErrorKind::RouteConflict => "ROUTE_CONFLICT",
            ErrorKind::InvalidHandler => "INVALID_HANDLER",
            ErrorKind::InvalidPattern => "INVALID_PATTERN",
            ErrorKind::Configuration => "CONFIG_ERROR",
            ErrorKind::Io => "IO_ERROR",
        }
    }

    /// Returns the HTTP status code an admin endpoint that registers routes
    /// at runtime should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::RouteConflict => StatusCode::CONFLICT,
            ErrorKind::InvalidHandler => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::InvalidPattern => StatusCode::BAD_REQUEST,
            ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Io => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Consumes the error and returns the inner error source.
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self.source
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl Error {
    /// Creates a route conflict error.
    pub fn route_conflict(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::RouteConflict, msg.into())
    }

    /// Creates an invalid handler error.
    pub fn invalid_handler(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidHandler, msg.into())
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPattern, msg.into())
    }

    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, msg.into())
    }

    /// Creates an I/O error from a message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, msg.into())
    }
}

// ============================================================================
// Trait implementations
// ============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

// ============================================================================
// From implementations
// ============================================================================

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::new(ErrorKind::Configuration, err)
    }
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Self::new(ErrorKind::Configuration, err)
    }
}

// ============================================================================
// Tests
// ============================================================================
