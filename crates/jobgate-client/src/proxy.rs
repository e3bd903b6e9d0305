//! Scheduler transport.
//!
//! `SchedulerProxy` is the seam between the client's protocol logic and
//! the wire. `HttpSchedulerProxy` speaks JSON over HTTP: every call is a
//! `POST {scheduler_uri}/api` whose body is a `SchedulerCall` envelope and
//! whose reply is a `Response`.

use std::time::Duration;

use async_trait::async_trait;
use jobgate_api::{JobUpdateRequest, Lock, LockKey, LockValidation, Response, SchedulerCall};
use thiserror::Error;
use tracing::debug;

use crate::auth::AuthMechanism;
use crate::config::Cluster;

/// Result type alias for transport calls.
pub type TransportResult<T> = Result<T, TransportError>;

/// Failures below the protocol level: the call's outcome is unknown.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scheduler answered HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid transport configuration: {0}")]
    Config(String),
}

/// One method per scheduler RPC the client consumes.
///
/// Implementations must be usable from many tasks at once.
#[async_trait]
pub trait SchedulerProxy: Send + Sync {
    async fn acquire_lock(&self, lock_key: LockKey) -> TransportResult<Response>;

    async fn release_lock(
        &self,
        lock: Lock,
        validation: LockValidation,
    ) -> TransportResult<Response>;

    async fn start_job_update(&self, request: JobUpdateRequest) -> TransportResult<Response>;
}

/// JSON-over-HTTP transport to a single cluster's scheduler.
#[derive(Debug, Clone)]
pub struct HttpSchedulerProxy {
    endpoint: String,
    auth: AuthMechanism,
    http: reqwest::Client,
}

impl HttpSchedulerProxy {
    /// Build a proxy for `cluster`, honoring its timeout and auth settings.
    pub fn new(cluster: &Cluster) -> TransportResult<Self> {
        let base = cluster.scheduler_uri.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(TransportError::Config(format!(
                "scheduler_uri for {} must be http:// or https://, got {:?}",
                cluster.name, cluster.scheduler_uri
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cluster.request_timeout_secs))
            .user_agent(concat!("jobgate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            endpoint: format!("{base}/api"),
            auth: cluster.auth.clone(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(&self, call: SchedulerCall) -> TransportResult<Response> {
        let method = call.method();
        debug!(method, endpoint = %self.endpoint, "dispatching scheduler call");

        let request = self.auth.apply(self.http.post(&self.endpoint).json(&call));
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = status_body(response.text().await);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Response>().await?)
    }
}

/// Body text for a `Status` error, noting when the body itself could not be read.
fn status_body<E: std::fmt::Display>(read: Result<String, E>) -> String {
    match read {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "failed to read error response body");
            format!("<unreadable body: {e}>")
        }
    }
}

#[async_trait]
impl SchedulerProxy for HttpSchedulerProxy {
    async fn acquire_lock(&self, lock_key: LockKey) -> TransportResult<Response> {
        self.call(SchedulerCall::AcquireLock { lock_key }).await
    }

    async fn release_lock(
        &self,
        lock: Lock,
        validation: LockValidation,
    ) -> TransportResult<Response> {
        self.call(SchedulerCall::ReleaseLock { lock, validation })
            .await
    }

    async fn start_job_update(&self, request: JobUpdateRequest) -> TransportResult<Response> {
        self.call(SchedulerCall::StartJobUpdate { request }).await
    }
}
