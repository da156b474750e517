//! Shared error type across sbot-host crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed message.
    BadRequest,
    /// Not allowed by policy.
    NotAllowed,
    /// Unsupported config or protocol version.
    UnsupportedVersion,
    /// Configuration could not be loaded.
    Config,
    /// Identity could not be loaded or created.
    Identity,
    /// Filesystem failure.
    Io,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotAllowed => "NOT_ALLOWED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Config => "CONFIG",
            ClientCode::Identity => "IDENTITY",
            ClientCode::Io => "IO",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HostError>;

/// Unified error type used by core and daemon.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not allowed: {0}")]
    NotAllowed(String),
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("config: {0}")]
    Config(String),
    #[error("identity: {0}")]
    Identity(String),
    #[error("io: {0}")]
    Io(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl HostError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            HostError::BadRequest(_) => ClientCode::BadRequest,
            HostError::NotAllowed(_) => ClientCode::NotAllowed,
            HostError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            HostError::Config(_) => ClientCode::Config,
            HostError::Identity(_) => ClientCode::Identity,
            HostError::Io(_) => ClientCode::Io,
            HostError::Internal(_) => ClientCode::Internal,
        }
    }
}

impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        HostError::Io(e.to_string())
    }
}
