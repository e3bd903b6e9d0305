pub mod lock;
pub mod update;

use std::io::Read;
use std::path::Path;

use jobgate_client::{ClustersConfig, SchedulerClient};

/// Build a client for `cluster` from the clusters file.
pub fn connect(clusters_path: &Path, cluster: &str) -> anyhow::Result<SchedulerClient> {
    let clusters = ClustersConfig::from_file(clusters_path)?;
    let entry = clusters.require(cluster)?;
    Ok(SchedulerClient::for_cluster(entry)?)
}

/// Read a file, or stdin when the path is "-".
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
