use std::path::Path;

use anyhow::Context;
use jobgate_api::{JobIdentifier, Lock};
use jobgate_client::validate_lock;
use tracing::info;

use super::{connect, read_input};

pub async fn acquire(clusters: &Path, job: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let job: JobIdentifier = job.parse()?;
    let client = connect(clusters, job.cluster())?;

    let lock = client.acquire_job_lock(&job).await?;
    let json = serde_json::to_string_pretty(&lock)?;

    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write lock to {}", path.display()))?;
            info!(job = %job, path = %path.display(), "lock written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub async fn release(clusters: &Path, cluster: &str, lock_path: &Path) -> anyhow::Result<()> {
    let lock = parse_lock(&read_input(lock_path)?)?;
    let client = connect(clusters, cluster)?;

    client.release_job_lock(&lock).await?;
    println!("✓ Released lock on {}", lock.key().job());
    Ok(())
}

/// Decode and validate a lock as printed by `lock acquire`.
fn parse_lock(text: &str) -> anyhow::Result<Lock> {
    let value: serde_json::Value = serde_json::from_str(text).context("lock is not valid JSON")?;
    Ok(validate_lock(&value)?)
}
