//! clusters.toml — where each cluster's scheduler lives.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::auth::AuthMechanism;

fn default_request_timeout_secs() -> u64 {
    30
}

/// One cluster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub name: String,
    /// Base URI of the scheduler's HTTP endpoint.
    pub scheduler_uri: String,
    /// Transport-level timeout per call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub auth: AuthMechanism,
}

impl Cluster {
    pub fn new(name: &str, scheduler_uri: &str) -> Self {
        Self {
            name: name.to_string(),
            scheduler_uri: scheduler_uri.to_string(),
            request_timeout_secs: default_request_timeout_secs(),
            auth: AuthMechanism::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClustersConfig {
    #[serde(default, rename = "cluster")]
    pub clusters: Vec<Cluster>,
}

impl ClustersConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read clusters file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("invalid clusters file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: ClustersConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for cluster in &self.clusters {
            if cluster.name.is_empty() {
                bail!("cluster name must not be empty");
            }
            if !seen.insert(cluster.name.as_str()) {
                bail!("duplicate cluster {:?}", cluster.name);
            }
            if cluster.scheduler_uri.is_empty() {
                bail!("cluster {:?} has an empty scheduler_uri", cluster.name);
            }
            if cluster.request_timeout_secs == 0 {
                bail!("cluster {:?} request_timeout_secs must be > 0", cluster.name);
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.name == name)
    }

    /// Look up a cluster, failing with the list of known names.
    pub fn require(&self, name: &str) -> anyhow::Result<&Cluster> {
        self.get(name).with_context(|| {
            let known: Vec<&str> = self.clusters.iter().map(|c| c.name.as_str()).collect();
            format!("unknown cluster {name:?} (known: {})", known.join(", "))
        })
    }
}
