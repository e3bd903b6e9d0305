//! Scheduler responses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lock::Lock;
use crate::update::UpdateId;

/// Status code attached to every scheduler response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    InvalidRequest,
    Ok,
    Error,
    Warning,
    AuthFailed,
    LockError,
}

impl ResponseCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::InvalidRequest => "INVALID_REQUEST",
            ResponseCode::Ok => "OK",
            ResponseCode::Error => "ERROR",
            ResponseCode::Warning => "WARNING",
            ResponseCode::AuthFailed => "AUTH_FAILED",
            ResponseCode::LockError => "LOCK_ERROR",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquireLockResult {
    pub lock: Lock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartJobUpdateResult {
    pub update_id: UpdateId,
}

/// Call-specific payload of a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseResult {
    AcquireLockResult(AcquireLockResult),
    StartJobUpdateResult(StartJobUpdateResult),
}

/// Raw result of a scheduler call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub response_code: ResponseCode,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResponseResult>,
}

impl Response {
    /// `OK` response carrying a result.
    pub fn ok(result: ResponseResult) -> Self {
        Self {
            response_code: ResponseCode::Ok,
            message: "OK".to_string(),
            result: Some(result),
        }
    }

    /// `OK` response with no payload.
    pub fn ok_empty() -> Self {
        Self {
            response_code: ResponseCode::Ok,
            message: "OK".to_string(),
            result: None,
        }
    }

    pub fn error(code: ResponseCode, message: &str) -> Self {
        Self {
            response_code: code,
            message: message.to_string(),
            result: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.response_code == ResponseCode::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JobKey, LockKey};

    #[test]
    fn decode_error_response_without_result() {
        let resp: Response =
            serde_json::from_str(r#"{"responseCode":"LOCK_ERROR","message":"held by bob"}"#)
                .unwrap();
        assert_eq!(resp.response_code, ResponseCode::LockError);
        assert_eq!(resp.message, "held by bob");
        assert!(resp.result.is_none());
        assert!(!resp.is_ok());
    }

    #[test]
    fn acquire_result_wire_shape() {
        let lock = Lock::new(LockKey::Job(JobKey::new("r", "e", "n")), "t", "u", 5);
        let resp = Response::ok(ResponseResult::AcquireLockResult(AcquireLockResult { lock }));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["responseCode"], "OK");
        assert_eq!(json["result"]["acquireLockResult"]["lock"]["token"], "t");
    }

    #[test]
    fn code_display_matches_wire() {
        for code in [
            ResponseCode::InvalidRequest,
            ResponseCode::Ok,
            ResponseCode::Error,
            ResponseCode::Warning,
            ResponseCode::AuthFailed,
            ResponseCode::LockError,
        ] {
            let wire = serde_json::to_string(&code).unwrap();
            assert_eq!(wire, format!("\"{code}\""));
        }
    }
}
