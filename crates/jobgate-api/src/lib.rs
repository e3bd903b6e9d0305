//! jobgate-api — wire types of the scheduler contract.
//!
//! Everything the scheduler accepts or returns is defined here: job keys,
//! mutation locks, task templates, update requests and settings, responses,
//! and the call envelope used by transports. All types serialize to JSON
//! with camelCase field names.
//!
//! # Identity
//!
//! `JobIdentifier` is the client-side, cluster-qualified job address. It can
//! only be obtained through validation (`JobIdentifier::new`, `FromStr`, or
//! deserialization), so a value of this type is always well formed.
//! `JobKey` is the wire form without the cluster.

pub mod call;
pub mod error;
pub mod job_key;
pub mod lock;
pub mod response;
pub mod task;
pub mod update;

pub use call::SchedulerCall;
pub use error::{KeyError, KeyResult};
pub use job_key::{JobIdentifier, JobKey, validate_component};
pub use lock::{Lock, LockKey, LockValidation};
pub use response::{AcquireLockResult, Response, ResponseCode, ResponseResult, StartJobUpdateResult};
pub use task::{ExecutorConfig, Identity, TaskConfig};
pub use update::{JobUpdateRequest, JobUpdateSettings, UpdateId};
