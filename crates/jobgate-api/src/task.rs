//! Task template — the per-instance configuration a job runs.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::job_key::JobKey;

/// Identity a task runs as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user: String,
}

/// Executor selection and its opaque payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutorConfig {
    pub name: String,
    pub data: String,
}

/// Per-instance task template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskConfig {
    pub job: JobKey,
    pub owner: Identity,
    /// Long-running service (restarted on exit) rather than a batch task.
    pub is_service: bool,
    pub production: bool,
    pub priority: i32,
    pub max_task_failures: i32,
    pub num_cpus: f64,
    pub ram_mb: u64,
    pub disk_mb: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor_config: Option<ExecutorConfig>,
    /// Named ports the scheduler must allocate per instance.
    #[serde(default)]
    pub requested_ports: BTreeSet<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}
