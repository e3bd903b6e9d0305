//! Shared test doubles.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use jobgate_api::*;
use jobgate_client::{JobConfigProvider, SchedulerProxy, TransportResult};

/// Proxy that records every call and replays scripted responses in order.
///
/// Once the script runs out it answers `OK` with no result.
#[derive(Default)]
pub struct RecordingProxy {
    calls: Mutex<Vec<SchedulerCall>>,
    script: Mutex<VecDeque<Response>>,
}

impl RecordingProxy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, response: Response) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<SchedulerCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: SchedulerCall) -> Response {
        self.calls.lock().unwrap().push(call);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(Response::ok_empty)
    }
}

#[async_trait]
impl SchedulerProxy for RecordingProxy {
    async fn acquire_lock(&self, lock_key: LockKey) -> TransportResult<Response> {
        Ok(self.record(SchedulerCall::AcquireLock { lock_key }))
    }

    async fn release_lock(
        &self,
        lock: Lock,
        validation: LockValidation,
    ) -> TransportResult<Response> {
        Ok(self.record(SchedulerCall::ReleaseLock { lock, validation }))
    }

    async fn start_job_update(&self, request: JobUpdateRequest) -> TransportResult<Response> {
        Ok(self.record(SchedulerCall::StartJobUpdate { request }))
    }
}

pub fn test_identifier() -> JobIdentifier {
    JobIdentifier::new("foo", "role", "env", "name").unwrap()
}

pub fn test_lock() -> Lock {
    Lock::new(
        LockKey::Job(JobKey::new("role", "env", "name")),
        "token-1",
        "alice",
        1_700_000_000_000,
    )
}

pub fn lock_granted(lock: Lock) -> Response {
    Response::ok(ResponseResult::AcquireLockResult(AcquireLockResult { lock }))
}

pub const UPDATE_CONFIG: &str = r#"
batch_size = 1
restart_threshold = 50
watch_secs = 50
max_per_shard_failures = 2
max_total_failures = 1
rollback_on_failure = true
wait_for_batch_completion = false
"#;

/// Job configuration stand-in with a fixed shape.
pub struct FakeJobConfig {
    pub update: Option<&'static str>,
}

impl FakeJobConfig {
    pub fn valid() -> Self {
        Self {
            update: Some(UPDATE_CONFIG),
        }
    }

    /// `update_config()` raises.
    pub fn broken() -> Self {
        Self { update: None }
    }
}

impl JobConfigProvider for FakeJobConfig {
    fn role(&self) -> &str {
        "role"
    }

    fn environment(&self) -> &str {
        "env"
    }

    fn name(&self) -> &str {
        "name"
    }

    fn instances(&self) -> u32 {
        5
    }

    fn job(&self) -> TaskConfig {
        TaskConfig::default()
    }

    fn update_config(&self) -> anyhow::Result<toml::Table> {
        match self.update {
            Some(src) => Ok(src.parse()?),
            None => anyhow::bail!("could not parse update config"),
        }
    }
}

pub fn expected_update_request() -> JobUpdateRequest {
    JobUpdateRequest {
        job_key: JobKey::new("role", "env", "name"),
        instance_count: 5,
        settings: JobUpdateSettings {
            update_group_size: 1,
            max_per_instance_failures: 2,
            max_failed_instances: 1,
            max_wait_to_instance_running_ms: 50,
            min_wait_in_instance_running_ms: 50,
            rollback_on_failure: true,
            wait_for_batch_completion: false,
        },
        task_config: TaskConfig::default(),
    }
}
