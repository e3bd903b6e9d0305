//! jobgate-client — serialized job mutation against a cluster scheduler.
//!
//! Lets a caller take a job's mutation lock, release it, and start a
//! rolling update, with every input checked locally before the scheduler
//! sees it.
//!
//! # Architecture
//!
//! ```text
//! caller
//!   └── SchedulerClient
//!       ├── validate   → reject malformed job identifiers / locks (no RPC)
//!       ├── translate  → JobConfigProvider → JobUpdateRequest (no RPC)
//!       ├── SchedulerProxy (one RPC per operation)
//!       │   └── HttpSchedulerProxy: POST {scheduler_uri}/api
//!       └── classify   → Response → Ok(result) | ClientError
//! ```
//!
//! The scheduler is the only authority on lock ownership. The client keeps
//! no state between calls and does no local locking, so a single
//! `SchedulerClient` can be cloned into as many tasks as needed.

pub mod auth;
pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod job_file;
pub mod proxy;
pub mod translate;
pub mod validate;

pub use auth::AuthMechanism;
pub use client::SchedulerClient;
pub use config::{Cluster, ClustersConfig};
pub use error::{ClientError, ClientResult, UpdateConfigError};
pub use job_file::JobFile;
pub use proxy::{HttpSchedulerProxy, SchedulerProxy, TransportError, TransportResult};
pub use translate::{JobConfigProvider, UpdateConfig, build_update_request};
pub use validate::{JobKeyArg, LockArg, validate_job_key, validate_lock};
