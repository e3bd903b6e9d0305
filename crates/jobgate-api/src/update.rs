//! Job update request and its tuning settings.

use serde::{Deserialize, Serialize};

use crate::job_key::JobKey;
use crate::task::TaskConfig;

/// Scheduler-assigned identifier of a started update.
pub type UpdateId = String;

/// Tuning for a rolling update, resolved from the job's update config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdateSettings {
    /// Instances updated together in one batch.
    pub update_group_size: u32,
    /// Restarts tolerated per instance before it counts as failed.
    pub max_per_instance_failures: u32,
    /// Failed instances tolerated before the update fails.
    pub max_failed_instances: u32,
    pub max_wait_to_instance_running_ms: u32,
    pub min_wait_in_instance_running_ms: u32,
    pub rollback_on_failure: bool,
    pub wait_for_batch_completion: bool,
}

/// Complete request to start an update. Never sent partially populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdateRequest {
    pub job_key: JobKey,
    pub instance_count: u32,
    pub settings: JobUpdateSettings,
    pub task_config: TaskConfig,
}
