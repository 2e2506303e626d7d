//! Inventory source boundary.
//!
//! Everything that talks to the cloud account lives behind [`CloudSource`]:
//! the rest of the crate only ever sees typed records or a [`SourceError`].
//! The shipped implementation reads an account snapshot from disk
//! ([`snapshot::SnapshotSource`]); a live API client would implement the same
//! trait.

pub mod collect;
pub mod snapshot;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{domain} is not reachable for project `{project_id}`: {message}")]
    Unreachable {
        domain: &'static str,
        project_id: String,
        message: String,
    },

    #[error("failed to read snapshot `{path}`")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot `{path}`")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One project as listed by the resource manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub project_id: String,
}

/// One compute instance as listed within a project and zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub name: String,
    pub status: String,
    /// May be a full machine-type URL; builders keep only the last segment.
    pub machine_type: String,
}

/// One firewall resource; expands to one inventory row per allowed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallResource {
    pub name: String,
    #[serde(default)]
    pub source_ranges: Vec<String>,
    #[serde(default)]
    pub allowed: Vec<AllowedEntry>,
    #[serde(default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedEntry {
    pub protocol: String,
    #[serde(default)]
    pub ports: Vec<String>,
}

/// One IAM policy binding: a role granted to a set of members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IamBinding {
    pub role: String,
    #[serde(default)]
    pub members: Vec<String>,
}

/// Remote account APIs, one method per inventory kind.
///
/// Any call may fail for one project or zone without affecting the others;
/// callers decide whether a failure is fatal (see `collect`).
pub trait CloudSource {
    fn list_projects(&self) -> Result<Vec<ProjectRecord>, SourceError>;

    fn list_zones(&self, project_id: &str) -> Result<Vec<String>, SourceError>;

    fn list_instances(
        &self,
        project_id: &str,
        zone: &str,
    ) -> Result<Vec<InstanceRecord>, SourceError>;

    fn list_firewalls(&self, project_id: &str) -> Result<Vec<FirewallResource>, SourceError>;

    fn iam_policy(&self, project_id: &str) -> Result<Vec<IamBinding>, SourceError>;
}
