//! Mutation locks.
//!
//! A `Lock` is handed out by the scheduler on a successful `acquireLock`
//! and must be presented back, unmodified, to release it. The client never
//! inspects the token; it only round-trips it.

use serde::{Deserialize, Serialize};

use crate::job_key::JobKey;

/// Subject of a mutation lock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LockKey {
    Job(JobKey),
}

impl LockKey {
    /// The job this lock key addresses.
    pub fn job(&self) -> &JobKey {
        match self {
            LockKey::Job(key) => key,
        }
    }
}

/// How strictly the scheduler checks a lock presented with a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockValidation {
    /// The lock must match the one the scheduler currently holds.
    Checked,
    /// The lock is accepted without comparison.
    Unchecked,
}

/// Scheduler-issued mutation lock handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Lock {
    key: LockKey,
    token: String,
    user: String,
    timestamp_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl Lock {
    /// Build a lock as the scheduler would issue it.
    pub fn new(key: LockKey, token: &str, user: &str, timestamp_ms: i64) -> Self {
        Self {
            key,
            token: token.to_string(),
            user: user.to_string(),
            timestamp_ms,
            message: None,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn key(&self) -> &LockKey {
        &self.key
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Unix timestamp (milliseconds) when the scheduler granted the lock.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_json_shape() {
        let lock = Lock::new(
            LockKey::Job(JobKey::new("role", "env", "name")),
            "tok-1",
            "alice",
            1_700_000_000_000,
        );
        let json = serde_json::to_value(&lock).unwrap();
        assert_eq!(json["key"]["job"]["role"], "role");
        assert_eq!(json["token"], "tok-1");
        assert_eq!(json["timestampMs"], 1_700_000_000_000i64);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn validation_mode_wire_names() {
        assert_eq!(
            serde_json::to_string(&LockValidation::Checked).unwrap(),
            "\"CHECKED\""
        );
        assert_eq!(
            serde_json::from_str::<LockValidation>("\"UNCHECKED\"").unwrap(),
            LockValidation::Unchecked
        );
    }

    #[test]
    fn lock_rejects_unknown_fields() {
        let json = r#"{"key":{"job":{"role":"r","environment":"e","name":"n"}},
            "token":"t","user":"u","timestampMs":1,"owner":"x"}"#;
        assert!(serde_json::from_str::<Lock>(json).is_err());
    }
}
