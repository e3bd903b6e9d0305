//! Call envelope — one scheduler RPC and its arguments.
//!
//! Transports serialize a `SchedulerCall` as
//! `{"method": "<name>", "args": {...}}`.

use serde::{Deserialize, Serialize};

use crate::lock::{Lock, LockKey, LockValidation};
use crate::update::JobUpdateRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "method",
    content = "args",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum SchedulerCall {
    AcquireLock {
        lock_key: LockKey,
    },
    ReleaseLock {
        lock: Lock,
        validation: LockValidation,
    },
    StartJobUpdate {
        request: JobUpdateRequest,
    },
}

impl SchedulerCall {
    /// RPC method name as the scheduler knows it.
    pub fn method(&self) -> &'static str {
        match self {
            SchedulerCall::AcquireLock { .. } => "acquireLock",
            SchedulerCall::ReleaseLock { .. } => "releaseLock",
            SchedulerCall::StartJobUpdate { .. } => "startJobUpdate",
        }
    }
}
