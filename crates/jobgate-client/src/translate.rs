//! Update request translation.
//!
//! Turns a human-authored job configuration into the `JobUpdateRequest`
//! the scheduler expects. Pure: no I/O, and the same configuration always
//! yields the same request.

use jobgate_api::{JobKey, JobUpdateRequest, JobUpdateSettings, TaskConfig, validate_component};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::UpdateConfigError;

/// The narrow view of a job configuration the translator needs.
pub trait JobConfigProvider {
    fn role(&self) -> &str;
    fn environment(&self) -> &str;
    fn name(&self) -> &str;
    /// Number of instances the job should run.
    fn instances(&self) -> u32;
    /// Per-instance task template.
    fn job(&self) -> TaskConfig;
    /// Raw update tuning mapping.
    fn update_config(&self) -> anyhow::Result<toml::Table>;
}

/// Update tuning, as written in a job's `update_config` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateConfig {
    pub batch_size: u32,
    /// Seconds an instance may take to reach RUNNING before it is restarted.
    pub restart_threshold: u32,
    /// Seconds an instance must stay RUNNING to count as healthy.
    pub watch_secs: u32,
    pub max_per_shard_failures: u32,
    pub max_total_failures: u32,
    pub rollback_on_failure: bool,
    pub wait_for_batch_completion: bool,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            batch_size: 1,
            restart_threshold: 60,
            watch_secs: 45,
            max_per_shard_failures: 0,
            max_total_failures: 0,
            rollback_on_failure: true,
            wait_for_batch_completion: false,
        }
    }
}

impl UpdateConfig {
    /// Parse a tuning mapping, filling absent keys with defaults.
    pub fn from_table(table: toml::Table) -> Result<Self, UpdateConfigError> {
        let config: UpdateConfig = toml::Value::Table(table).try_into()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), UpdateConfigError> {
        if self.batch_size == 0 {
            return Err(UpdateConfigError::Invalid {
                key: "batch_size",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.watch_secs == 0 {
            return Err(UpdateConfigError::Invalid {
                key: "watch_secs",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve into the scheduler's settings record.
    ///
    /// Both wait bounds come from the single watch window.
    pub fn to_settings(&self) -> JobUpdateSettings {
        JobUpdateSettings {
            update_group_size: self.batch_size,
            max_per_instance_failures: self.max_per_shard_failures,
            max_failed_instances: self.max_total_failures,
            max_wait_to_instance_running_ms: self.watch_secs,
            min_wait_in_instance_running_ms: self.watch_secs,
            rollback_on_failure: self.rollback_on_failure,
            wait_for_batch_completion: self.wait_for_batch_completion,
        }
    }
}

/// Build the complete update request for `config`.
pub fn build_update_request<C>(config: &C) -> Result<JobUpdateRequest, UpdateConfigError>
where
    C: JobConfigProvider + ?Sized,
{
    let table = config.update_config().map_err(UpdateConfigError::Source)?;
    let settings = UpdateConfig::from_table(table)?.to_settings();

    validate_component("role", config.role())?;
    validate_component("environment", config.environment())?;
    validate_component("name", config.name())?;
    let job_key = JobKey::new(config.role(), config.environment(), config.name());

    debug!(
        job = %job_key,
        instances = config.instances(),
        group_size = settings.update_group_size,
        "translated update request"
    );

    Ok(JobUpdateRequest {
        job_key,
        instance_count: config.instances(),
        settings,
        task_config: config.job(),
    })
}
