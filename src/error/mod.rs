//! Error Types
//!
//! Error hierarchy for entity configuration, request construction, token
//! acquisition, and transport execution.

use std::time::Duration;
use thiserror::Error;

/// Root error type for remote entity operations.
#[derive(Error, Debug)]
pub enum RemoteEntityError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgumentError),

    #[error("Auth provider error: {0}")]
    AuthProvider(#[from] AuthProviderError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl RemoteEntityError {
    /// Get error code for telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "ENTITY_CONFIG",
            Self::InvalidArgument(_) => "ENTITY_ARGUMENT",
            Self::AuthProvider(_) => "ENTITY_AUTH_PROVIDER",
            Self::Transport(_) => "ENTITY_TRANSPORT",
        }
    }

    /// Check whether the failure happened before any network I/O.
    pub fn is_pre_flight(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::InvalidArgument(_))
    }
}

/// Convenience alias for results produced by this crate.
pub type RemoteEntityResult<T> = Result<T, RemoteEntityError>;

/// Configuration error: the entity or provider setup is unusable.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("missing required parameter - {field}")]
    MissingRequired { field: String },

    #[error("no auth provider configured for grant type '{grant_type}'")]
    MissingProvider { grant_type: String },

    #[error("unsupported grant descriptor '{descriptor}'")]
    UnsupportedGrant { descriptor: String },

    #[error("unsupported HTTP method '{method}'")]
    UnsupportedHttpMethod { method: String },

    #[error("cannot resolve token endpoint from '{url}'")]
    InvalidTokenEndpoint { url: String },
}

/// Caller error: the per-call input is not usable.
#[derive(Error, Debug)]
pub enum InvalidArgumentError {
    #[error("invalid parameter type - accepted only a JSON object, got {actual}")]
    NotAnObject { actual: String },

    #[error("no operation named '{operation}' is configured")]
    UnknownOperation { operation: String },
}

/// Token endpoint exchange failure. Aborts the call before the main
/// request is sent.
#[derive(Error, Debug)]
pub enum AuthProviderError {
    #[error("token endpoint returned status {status}: {body}")]
    ExchangeFailed { status: u16, body: String },

    #[error("token endpoint unreachable: {message}")]
    ExchangeTransport { message: String },

    #[error("malformed token response: {message}")]
    MalformedTokenResponse { message: String },
}

/// Network-layer failure of the main HTTP request.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("failed to read response body: {message}")]
    ReadFailed { message: String },

    #[error("malformed response body: {message}")]
    MalformedBody { message: String },
}
