//! Job addressing — the wire `JobKey` and the cluster-qualified
//! `JobIdentifier`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KeyError, KeyResult};

/// Check a single identifier component (cluster, role, environment, name).
pub fn validate_component(field: &'static str, value: &str) -> KeyResult<()> {
    if value.is_empty() {
        return Err(KeyError::Empty(field));
    }
    let well_formed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !well_formed {
        return Err(KeyError::InvalidComponent {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Wire form of a job address, scoped to a single cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobKey {
    pub role: String,
    pub environment: String,
    pub name: String,
}

impl JobKey {
    pub fn new(role: &str, environment: &str, name: &str) -> Self {
        Self {
            role: role.to_string(),
            environment: environment.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.role, self.environment, self.name)
    }
}

/// Cluster-qualified job address.
///
/// Fields are private: a `JobIdentifier` only exists once every component
/// has been validated, and it cannot be edited afterwards. Deserialization
/// runs the same checks and rejects unknown fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawJobIdentifier")]
pub struct JobIdentifier {
    cluster: String,
    role: String,
    environment: String,
    name: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawJobIdentifier {
    cluster: String,
    role: String,
    environment: String,
    name: String,
}

impl TryFrom<RawJobIdentifier> for JobIdentifier {
    type Error = KeyError;

    fn try_from(raw: RawJobIdentifier) -> KeyResult<Self> {
        Self::new(&raw.cluster, &raw.role, &raw.environment, &raw.name)
    }
}

impl JobIdentifier {
    /// Validate and build an identifier from its four components.
    pub fn new(cluster: &str, role: &str, environment: &str, name: &str) -> KeyResult<Self> {
        validate_component("cluster", cluster)?;
        validate_component("role", role)?;
        validate_component("environment", environment)?;
        validate_component("name", name)?;
        Ok(Self {
            cluster: cluster.to_string(),
            role: role.to_string(),
            environment: environment.to_string(),
            name: name.to_string(),
        })
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wire key for this job (the cluster is implied by the connection).
    pub fn to_job_key(&self) -> JobKey {
        JobKey::new(&self.role, &self.environment, &self.name)
    }
}

impl FromStr for JobIdentifier {
    type Err = KeyError;

    /// Parse `cluster/role/environment/name`.
    fn from_str(s: &str) -> KeyResult<Self> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [cluster, role, environment, name] => Self::new(cluster, role, environment, name),
            _ => Err(KeyError::Malformed(s.to_string())),
        }
    }
}

impl fmt::Display for JobIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.cluster, self.role, self.environment, self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_path_form() {
        let id: JobIdentifier = "devcluster/www-data/prod/hello".parse().unwrap();
        assert_eq!(id.cluster(), "devcluster");
        assert_eq!(id.role(), "www-data");
        assert_eq!(id.environment(), "prod");
        assert_eq!(id.name(), "hello");
        assert_eq!(id.to_string(), "devcluster/www-data/prod/hello");
    }

    #[test]
    fn parse_rejects_wrong_arity() {
        assert_eq!(
            "role/env/name".parse::<JobIdentifier>(),
            Err(KeyError::Malformed("role/env/name".to_string()))
        );
        assert!("a/b/c/d/e".parse::<JobIdentifier>().is_err());
    }

    #[test]
    fn empty_component_rejected() {
        assert_eq!(
            JobIdentifier::new("devcluster", "", "prod", "hello"),
            Err(KeyError::Empty("role"))
        );
    }

    #[test]
    fn invalid_characters_rejected() {
        let err = JobIdentifier::new("devcluster", "www data", "prod", "hello").unwrap_err();
        assert!(matches!(err, KeyError::InvalidComponent { field: "role", .. }));
    }

    #[test]
    fn to_job_key_drops_cluster() {
        let id = JobIdentifier::new("c", "role", "env", "name").unwrap();
        assert_eq!(id.to_job_key(), JobKey::new("role", "env", "name"));
        assert_eq!(id.to_job_key().to_string(), "role/env/name");
    }

    #[test]
    fn deserialize_validates() {
        let ok: JobIdentifier = serde_json::from_str(
            r#"{"cluster":"c","role":"r","environment":"e","name":"n"}"#,
        )
        .unwrap();
        assert_eq!(ok.name(), "n");

        let bad_chars = serde_json::from_str::<JobIdentifier>(
            r#"{"cluster":"c","role":"r r","environment":"e","name":"n"}"#,
        );
        assert!(bad_chars.is_err());

        let extra = serde_json::from_str::<JobIdentifier>(
            r#"{"cluster":"c","role":"r","environment":"e","name":"n","owner":"x"}"#,
        );
        assert!(extra.is_err());
    }
}
