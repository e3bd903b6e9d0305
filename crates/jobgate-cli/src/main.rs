//! jobgate — take job mutation locks and start updates from the shell.
//!
//! # Usage
//!
//! ```text
//! jobgate lock acquire devcluster/www-data/prod/hello -o hello.lock.json
//! jobgate update start hello.toml --hold-lock
//! jobgate lock release --cluster devcluster hello.lock.json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "jobgate",
    about = "jobgate — serialized job mutation against a cluster scheduler",
    version,
    propagate_version = true
)]
struct Cli {
    /// Show verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Clusters file describing each scheduler endpoint.
    #[arg(long, global = true, default_value = "/etc/jobgate/clusters.toml")]
    clusters: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Acquire or release a job's mutation lock
    Lock {
        #[command(subcommand)]
        action: LockAction,
    },
    /// Start a rolling update
    Update {
        #[command(subcommand)]
        action: UpdateAction,
    },
}

#[derive(Subcommand)]
enum LockAction {
    /// Acquire the lock for cluster/role/environment/name and print it as JSON.
    Acquire {
        /// Job identifier: cluster/role/environment/name
        job: String,
        /// Write the lock to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Release a lock previously printed by `lock acquire`.
    Release {
        /// Cluster that issued the lock.
        #[arg(long)]
        cluster: String,
        /// Lock JSON file, or "-" for stdin.
        lock: PathBuf,
    },
}

#[derive(Subcommand)]
enum UpdateAction {
    /// Translate a job file into an update request and send it.
    Start {
        /// Job file (TOML).
        config: PathBuf,
        /// Print the request instead of sending it.
        #[arg(long)]
        dry_run: bool,
        /// Hold the job's mutation lock while starting the update.
        #[arg(long, conflicts_with = "dry_run")]
        hold_lock: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lock { action } => match action {
            LockAction::Acquire { job, output } => {
                commands::lock::acquire(&cli.clusters, &job, output.as_deref()).await
            }
            LockAction::Release { cluster, lock } => {
                commands::lock::release(&cli.clusters, &cluster, &lock).await
            }
        },
        Commands::Update { action } => match action {
            UpdateAction::Start {
                config,
                dry_run,
                hold_lock,
            } => commands::update::start(&cli.clusters, &config, dry_run, hold_lock).await,
        },
    }
}
