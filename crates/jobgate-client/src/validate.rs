//! Identity validation — the gate in front of every RPC.
//!
//! Typed callers hand over a `JobIdentifier` or `Lock`, which are well
//! formed by construction. Loosely typed input (raw strings, JSON decoded
//! from a file or a request body) has to pass an explicit
//! validate-then-construct step first. Nothing that fails here ever reaches
//! the scheduler.

use jobgate_api::{JobIdentifier, Lock};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Anything that may stand in for a job identifier at the client boundary.
pub trait JobKeyArg {
    /// Produce a validated identifier or a `TypeMismatch`.
    fn to_job_identifier(&self) -> ClientResult<JobIdentifier>;
}

/// Anything that may stand in for a mutation lock at the client boundary.
pub trait LockArg {
    /// Produce a validated lock or an `InvalidArgument`.
    fn to_lock(&self) -> ClientResult<Lock>;
}

impl JobKeyArg for JobIdentifier {
    fn to_job_identifier(&self) -> ClientResult<JobIdentifier> {
        Ok(self.clone())
    }
}

// A bare string is not a job identifier, even if it looks like one; parse it
// with `JobIdentifier::from_str` first.
impl JobKeyArg for str {
    fn to_job_identifier(&self) -> ClientResult<JobIdentifier> {
        Err(ClientError::TypeMismatch(format!(
            "expected a JobIdentifier, got string {self:?}"
        )))
    }
}

impl JobKeyArg for String {
    fn to_job_identifier(&self) -> ClientResult<JobIdentifier> {
        self.as_str().to_job_identifier()
    }
}

impl JobKeyArg for Value {
    fn to_job_identifier(&self) -> ClientResult<JobIdentifier> {
        validate_job_key(self)
    }
}

impl LockArg for Lock {
    fn to_lock(&self) -> ClientResult<Lock> {
        Ok(self.clone())
    }
}

impl LockArg for str {
    fn to_lock(&self) -> ClientResult<Lock> {
        Err(ClientError::InvalidArgument(format!(
            "expected a Lock, got string {self:?}"
        )))
    }
}

impl LockArg for String {
    fn to_lock(&self) -> ClientResult<Lock> {
        self.as_str().to_lock()
    }
}

impl LockArg for Value {
    fn to_lock(&self) -> ClientResult<Lock> {
        validate_lock(self)
    }
}

/// Accept `value` only if it is a complete, well-formed job identifier
/// object (`cluster`, `role`, `environment`, `name`).
pub fn validate_job_key(value: &Value) -> ClientResult<JobIdentifier> {
    if !value.is_object() {
        return Err(ClientError::TypeMismatch(format!(
            "expected a JobIdentifier object, got {}",
            kind_of(value)
        )));
    }
    JobIdentifier::deserialize(value)
        .map_err(|e| ClientError::TypeMismatch(format!("malformed job identifier: {e}")))
}

/// Accept `value` only if it has exactly the shape of a scheduler lock.
pub fn validate_lock(value: &Value) -> ClientResult<Lock> {
    if !value.is_object() {
        return Err(ClientError::InvalidArgument(format!(
            "expected a Lock object, got {}",
            kind_of(value)
        )));
    }
    Lock::deserialize(value)
        .map_err(|e| ClientError::InvalidArgument(format!("malformed lock: {e}")))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobgate_api::{JobKey, LockKey};
    use serde_json::json;

    #[test]
    fn typed_identifier_passes() {
        let id = JobIdentifier::new("c", "r", "e", "n").unwrap();
        assert_eq!(id.to_job_identifier().unwrap(), id);
    }

    #[test]
    fn string_identifier_is_type_mismatch() {
        let err = "c/r/e/n".to_job_identifier().unwrap_err();
        assert!(matches!(err, ClientError::TypeMismatch(_)));
        let err = String::from("invalid job key").to_job_identifier().unwrap_err();
        assert!(matches!(err, ClientError::TypeMismatch(_)));
    }

    #[test]
    fn json_identifier_shapes() {
        let ok = validate_job_key(&json!({
            "cluster": "c", "role": "r", "environment": "e", "name": "n"
        }))
        .unwrap();
        assert_eq!(ok.to_string(), "c/r/e/n");

        for bad in [
            json!("c/r/e/n"),
            json!(42),
            json!(null),
            json!(["c", "r", "e", "n"]),
            json!({"role": "r", "environment": "e", "name": "n"}),
            json!({"cluster": "c", "role": "", "environment": "e", "name": "n"}),
            json!({"cluster": "c", "role": 7, "environment": "e", "name": "n"}),
        ] {
            let err = validate_job_key(&bad).unwrap_err();
            assert!(matches!(err, ClientError::TypeMismatch(_)), "{bad}");
        }
    }

    #[test]
    fn json_lock_shapes() {
        let lock = Lock::new(LockKey::Job(JobKey::new("r", "e", "n")), "t", "u", 3);
        let value = serde_json::to_value(&lock).unwrap();
        assert_eq!(validate_lock(&value).unwrap(), lock);

        for bad in [
            json!("invalid lock"),
            json!({}),
            json!({"token": "t"}),
            json!({"key": {"job": {"role": "r"}}, "token": "t", "user": "u", "timestampMs": 1}),
        ] {
            let err = validate_lock(&bad).unwrap_err();
            assert!(matches!(err, ClientError::InvalidArgument(_)), "{bad}");
        }
    }

    #[test]
    fn string_lock_is_invalid_argument() {
        let err = "invalid lock".to_lock().unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument(_)));
    }
}
