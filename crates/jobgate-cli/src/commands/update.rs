use std::path::Path;

use jobgate_client::{JobFile, build_update_request};
use tracing::info;

use super::connect;

pub async fn start(
    clusters: &Path,
    config_path: &Path,
    dry_run: bool,
    hold_lock: bool,
) -> anyhow::Result<()> {
    let job_file = JobFile::from_file(config_path)?;
    let job = job_file.identifier()?;

    if dry_run {
        let request = build_update_request(&job_file)?;
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let client = connect(clusters, job.cluster())?;
    let update_id = if hold_lock {
        client
            .with_job_lock(&job, |_lock| async {
                client.start_job_update(&job_file).await
            })
            .await?
    } else {
        client.start_job_update(&job_file).await?
    };

    info!(job = %job, "update requested");
    match update_id {
        Some(id) => println!("✓ Update {id} started for {job}"),
        None => println!("✓ Update started for {job}"),
    }
    Ok(())
}
