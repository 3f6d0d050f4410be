//! Unified application error types for Sudoward.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The request body is malformed or missing required fields.
    InvalidRequest,
    /// The requested grant duration is zero, negative, or above the limit.
    InvalidDuration,
    /// The principal name is not a valid OS account name.
    InvalidPrincipal,
    /// The principal does not exist on the host.
    UnknownPrincipal,
    /// Querying the host account databases failed.
    Probe,
    /// Creating the privilege artifact failed.
    ArtifactWrite,
    /// Removing the privilege artifact failed.
    ArtifactRemoval,
    /// The principal holds no active grant.
    NoActiveSession,
    /// Appending to the audit log failed.
    AuditWrite,
    /// Reading the audit log failed.
    AuditRead,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind is a caller-facing rejection that left no partial state.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest
                | Self::InvalidDuration
                | Self::InvalidPrincipal
                | Self::UnknownPrincipal
                | Self::NoActiveSession
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "INVALID_REQUEST"),
            Self::InvalidDuration => write!(f, "INVALID_DURATION"),
            Self::InvalidPrincipal => write!(f, "INVALID_PRINCIPAL"),
            Self::UnknownPrincipal => write!(f, "UNKNOWN_PRINCIPAL"),
            Self::Probe => write!(f, "PROBE_ERROR"),
            Self::ArtifactWrite => write!(f, "ARTIFACT_WRITE_ERROR"),
            Self::ArtifactRemoval => write!(f, "ARTIFACT_REMOVAL_ERROR"),
            Self::NoActiveSession => write!(f, "NO_ACTIVE_SESSION"),
            Self::AuditWrite => write!(f, "AUDIT_WRITE_ERROR"),
            Self::AuditRead => write!(f, "AUDIT_READ_ERROR"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Sudoward.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    /// Create an invalid-duration error.
    pub fn invalid_duration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDuration, message)
    }

    /// Create an invalid-principal error.
    pub fn invalid_principal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPrincipal, message)
    }

    /// Create an unknown-principal error.
    pub fn unknown_principal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownPrincipal, message)
    }

    /// Create a host probe error.
    pub fn probe(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Probe, message)
    }

    /// Create an artifact write error.
    pub fn artifact_write(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArtifactWrite, message)
    }

    /// Create an artifact removal error.
    pub fn artifact_removal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArtifactRemoval, message)
    }

    /// Create a no-active-session error.
    pub fn no_active_session(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoActiveSession, message)
    }

    /// Create an audit write error.
    pub fn audit_write(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuditWrite, message)
    }

    /// Create an audit read error.
    pub fn audit_read(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuditRead, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
