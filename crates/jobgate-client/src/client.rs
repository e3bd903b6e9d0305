//! SchedulerClient — the lock and update-start protocol.
//!
//! Every operation is validate → one RPC → classify. Validation failures
//! never reach the proxy; classification never retries.

use std::future::Future;
use std::sync::Arc;

use jobgate_api::{
    AcquireLockResult, JobUpdateRequest, Lock, LockKey, LockValidation, ResponseResult,
    StartJobUpdateResult, UpdateId,
};
use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::config::Cluster;
use crate::error::{ClientError, ClientResult};
use crate::proxy::{HttpSchedulerProxy, SchedulerProxy};
use crate::translate::{JobConfigProvider, build_update_request};
use crate::validate::{JobKeyArg, LockArg};

/// Client for one cluster's scheduler.
///
/// Cheap to clone; clones share the underlying proxy. Holds no lock state
/// of its own.
#[derive(Clone)]
pub struct SchedulerClient {
    cluster: String,
    proxy: Arc<dyn SchedulerProxy>,
}

impl SchedulerClient {
    /// Wrap an existing proxy.
    pub fn new(cluster: &str, proxy: Arc<dyn SchedulerProxy>) -> Self {
        Self {
            cluster: cluster.to_string(),
            proxy,
        }
    }

    /// Connect over HTTP using a cluster entry from clusters.toml.
    pub fn for_cluster(cluster: &Cluster) -> ClientResult<Self> {
        let proxy = HttpSchedulerProxy::new(cluster)?;
        info!(
            cluster = %cluster.name,
            endpoint = %proxy.endpoint(),
            auth = cluster.auth.name(),
            "scheduler client ready"
        );
        Ok(Self::new(&cluster.name, Arc::new(proxy)))
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    /// Acquire the mutation lock for a job.
    ///
    /// The job must belong to this client's cluster; the wire key carries no
    /// cluster, so a foreign identifier is refused before any RPC.
    pub async fn acquire_job_lock<K>(&self, job_key: &K) -> ClientResult<Lock>
    where
        K: JobKeyArg + ?Sized,
    {
        let job = job_key.to_job_identifier()?;
        if job.cluster() != self.cluster {
            return Err(ClientError::ClusterMismatch {
                job: job.to_string(),
                job_cluster: job.cluster().to_string(),
                client_cluster: self.cluster.clone(),
            });
        }
        let lock_key = LockKey::Job(job.to_job_key());
        debug!(job = %job, "acquiring job lock");

        let response = self.proxy.acquire_lock(lock_key).await?;
        match classify("acquireLock", response)? {
            Some(ResponseResult::AcquireLockResult(AcquireLockResult { lock })) => {
                info!(job = %job, user = lock.user(), "job lock acquired");
                Ok(lock)
            }
            _ => Err(ClientError::UnexpectedResult {
                method: "acquireLock",
            }),
        }
    }

    /// Release a lock previously returned by `acquire_job_lock`.
    ///
    /// Always asks for `CHECKED` validation. Not idempotent: releasing a
    /// lock twice fails however the scheduler decides, so a failure here
    /// must not be retried blindly.
    pub async fn release_job_lock<L>(&self, lock: &L) -> ClientResult<()>
    where
        L: LockArg + ?Sized,
    {
        let lock = lock.to_lock()?;
        let job = lock.key().job().clone();
        debug!(job = %job, "releasing job lock");

        let response = self
            .proxy
            .release_lock(lock, LockValidation::Checked)
            .await?;
        classify("releaseLock", response)?;
        info!(job = %job, "job lock released");
        Ok(())
    }

    /// Translate `config` and ask the scheduler to start an update.
    ///
    /// Returns the scheduler's update id when it reports one. A
    /// configuration that does not translate is never sent.
    pub async fn start_job_update<C>(&self, config: &C) -> ClientResult<Option<UpdateId>>
    where
        C: JobConfigProvider + ?Sized,
    {
        let request = build_update_request(config)?;
        self.send_update(request).await
    }

    async fn send_update(&self, request: JobUpdateRequest) -> ClientResult<Option<UpdateId>> {
        let job = request.job_key.clone();
        let response = self.proxy.start_job_update(request).await?;
        let update_id = match classify("startJobUpdate", response)? {
            Some(ResponseResult::StartJobUpdateResult(StartJobUpdateResult { update_id })) => {
                Some(update_id)
            }
            _ => None,
        };
        info!(job = %job, update_id = ?update_id, "job update started");
        Ok(update_id)
    }

    /// Run `f` while holding the job's mutation lock.
    ///
    /// The lock is released with `CHECKED` validation whether `f` succeeds
    /// or not. An error from `f` takes precedence over a release error.
    ///
    /// The release only happens if the returned future runs to completion.
    /// Dropping it after the lock is granted (a `select!` branch losing, a
    /// timeout firing) leaves the lock held on the scheduler; release it
    /// with `release_job_lock`.
    pub async fn with_job_lock<K, F, Fut, T>(&self, job_key: &K, f: F) -> ClientResult<T>
    where
        K: JobKeyArg + ?Sized,
        F: FnOnce(Lock) -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let lock = self.acquire_job_lock(job_key).await?;
        let outcome = f(lock.clone()).await;
        let released = self.release_job_lock(&lock).await;

        match (outcome, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(release_err)) => Err(release_err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(release_err)) => {
                warn!(
                    job = %lock.key().job(),
                    error = %release_err,
                    "lock release failed after locked operation error"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use jobgate_api::{JobIdentifier, JobKey, Response};

    use crate::proxy::TransportResult;

    /// Proxy whose every call fails at the transport level.
    struct Unreachable;

    #[async_trait]
    impl SchedulerProxy for Unreachable {
        async fn acquire_lock(&self, _: LockKey) -> TransportResult<Response> {
            Err(crate::proxy::TransportError::Config("unreachable".into()))
        }
        async fn release_lock(&self, _: Lock, _: LockValidation) -> TransportResult<Response> {
            Err(crate::proxy::TransportError::Config("unreachable".into()))
        }
        async fn start_job_update(&self, _: JobUpdateRequest) -> TransportResult<Response> {
            Err(crate::proxy::TransportError::Config("unreachable".into()))
        }
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_transport_error() {
        let client = SchedulerClient::new("dev", Arc::new(Unreachable));
        let id = JobIdentifier::new("dev", "r", "e", "n").unwrap();

        let err = client.acquire_job_lock(&id).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.is_retryable());

        let lock = Lock::new(LockKey::Job(JobKey::new("r", "e", "n")), "t", "u", 1);
        let err = client.release_job_lock(&lock).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[tokio::test]
    async fn foreign_cluster_is_refused_before_transport() {
        // Unreachable would surface as Transport if the call got through.
        let client = SchedulerClient::new("dev", Arc::new(Unreachable));
        let id = JobIdentifier::new("prod", "r", "e", "n").unwrap();

        let err = client.acquire_job_lock(&id).await.unwrap_err();
        assert!(matches!(err, ClientError::ClusterMismatch { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn for_cluster_rejects_bad_uri() {
        let err = SchedulerClient::for_cluster(&Cluster::new("dev", "localhost:8081"))
            .err()
            .unwrap();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
