//! Job file parser — the local, human-authored description of a job.
//!
//! ```toml
//! [job]
//! cluster = "devcluster"
//! role = "www-data"
//! environment = "prod"
//! name = "hello"
//! instances = 5
//!
//! [task]
//! num_cpus = 1.0
//! ram_mb = 128
//! disk_mb = 256
//!
//! [task.executor]
//! name = "thermos"
//! data = "{...}"
//!
//! [update_config]
//! batch_size = 2
//! watch_secs = 30
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, bail};
use jobgate_api::{ExecutorConfig, Identity, JobIdentifier, JobKey, KeyResult, TaskConfig};
use serde::{Deserialize, Serialize};

use crate::translate::JobConfigProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    pub job: JobSection,
    #[serde(default)]
    pub task: TaskSection,
    /// Kept raw; its contents are checked when an update is translated.
    pub update_config: Option<toml::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSection {
    pub cluster: String,
    pub role: String,
    pub environment: String,
    pub name: String,
    pub instances: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskSection {
    /// Defaults to the job's role.
    pub owner: Option<String>,
    pub is_service: bool,
    pub production: bool,
    pub priority: i32,
    pub max_task_failures: i32,
    pub num_cpus: f64,
    pub ram_mb: u64,
    pub disk_mb: u64,
    pub contact_email: Option<String>,
    pub executor: Option<ExecutorSection>,
    pub ports: BTreeSet<String>,
    pub metadata: BTreeMap<String, String>,
}

impl Default for TaskSection {
    fn default() -> Self {
        Self {
            owner: None,
            is_service: true,
            production: false,
            priority: 0,
            max_task_failures: 1,
            num_cpus: 1.0,
            ram_mb: 128,
            disk_mb: 128,
            contact_email: None,
            executor: None,
            ports: BTreeSet::new(),
            metadata: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutorSection {
    pub name: String,
    #[serde(default)]
    pub data: String,
}

impl JobFile {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read job file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid job file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let file: JobFile = toml::from_str(content)?;
        if file.job.instances == 0 {
            bail!("job.instances must be at least 1");
        }
        Ok(file)
    }

    /// Cluster-qualified identifier of the job this file describes.
    pub fn identifier(&self) -> KeyResult<JobIdentifier> {
        JobIdentifier::new(
            &self.job.cluster,
            &self.job.role,
            &self.job.environment,
            &self.job.name,
        )
    }
}

impl JobConfigProvider for JobFile {
    fn role(&self) -> &str {
        &self.job.role
    }

    fn environment(&self) -> &str {
        &self.job.environment
    }

    fn name(&self) -> &str {
        &self.job.name
    }

    fn instances(&self) -> u32 {
        self.job.instances
    }

    fn job(&self) -> TaskConfig {
        let task = &self.task;
        TaskConfig {
            job: JobKey::new(&self.job.role, &self.job.environment, &self.job.name),
            owner: Identity {
                user: task.owner.clone().unwrap_or_else(|| self.job.role.clone()),
            },
            is_service: task.is_service,
            production: task.production,
            priority: task.priority,
            max_task_failures: task.max_task_failures,
            num_cpus: task.num_cpus,
            ram_mb: task.ram_mb,
            disk_mb: task.disk_mb,
            contact_email: task.contact_email.clone(),
            executor_config: task.executor.as_ref().map(|e| ExecutorConfig {
                name: e.name.clone(),
                data: e.data.clone(),
            }),
            requested_ports: task.ports.clone(),
            metadata: task.metadata.clone(),
        }
    }

    fn update_config(&self) -> anyhow::Result<toml::Table> {
        match &self.update_config {
            None => Ok(toml::Table::new()),
            Some(toml::Value::Table(table)) => Ok(table.clone()),
            Some(other) => bail!(
                "update_config must be a table, found a {}",
                other.type_str()
            ),
        }
    }
}
