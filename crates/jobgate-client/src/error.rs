//! Client error types.

use jobgate_api::{KeyError, ResponseCode};
use thiserror::Error;

use crate::proxy::TransportError;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised to callers of `SchedulerClient`.
///
/// Callers branch on the variant. Only `RemoteOperation` and `Transport`
/// can be worth retrying; the others are caller-side defects.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The job belongs to a different cluster than the one this client talks to.
    #[error("job {job} belongs to cluster {job_cluster}, but this client is bound to {client_cluster}")]
    ClusterMismatch {
        job: String,
        job_cluster: String,
        client_cluster: String,
    },

    #[error("update config error: {0}")]
    UpdateConfig(#[from] UpdateConfigError),

    #[error("{method} failed with {code}: {message}")]
    RemoteOperation {
        method: &'static str,
        code: ResponseCode,
        message: String,
    },

    #[error("{method} succeeded but the scheduler returned no usable result")]
    UnexpectedResult { method: &'static str },

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl ClientError {
    /// Whether repeating the same call could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::RemoteOperation { .. } | ClientError::Transport(_)
        )
    }

    /// Scheduler response code, for classified remote failures.
    pub fn response_code(&self) -> Option<ResponseCode> {
        match self {
            ClientError::RemoteOperation { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Reasons a job configuration could not become an update request.
#[derive(Debug, Error)]
pub enum UpdateConfigError {
    /// The configuration object itself failed to produce a tuning mapping.
    #[error("failed to read update config: {0}")]
    Source(#[source] anyhow::Error),

    #[error("failed to parse update config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid update config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("invalid job key: {0}")]
    JobKey(#[from] KeyError),
}
