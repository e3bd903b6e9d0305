//! Scheduler authentication.
//!
//! The mechanism travels with the cluster configuration and is handed to
//! the transport explicitly; there is no global registry.

use serde::{Deserialize, Serialize};

/// How requests to a cluster's scheduler are authenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mechanism", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthMechanism {
    #[default]
    Unauthenticated,
    Basic { username: String, password: String },
}

impl AuthMechanism {
    /// Attach credentials to an outgoing request.
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            AuthMechanism::Unauthenticated => request,
            AuthMechanism::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AuthMechanism::Unauthenticated => "UNAUTHENTICATED",
            AuthMechanism::Basic { .. } => "BASIC",
        }
    }
}
