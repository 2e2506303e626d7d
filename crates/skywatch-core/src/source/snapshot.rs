//! Account snapshot source.
//!
//! A snapshot is a JSON export of one cloud account: projects with their
//! access flags, zones, instances per zone, firewall resources and IAM
//! bindings. It stands in for the live compute and resource-manager APIs so
//! a run is offline and reproducible, and it doubles as the access prober
//! (the export records which permission domains answered at capture time).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::access::AccessProber;
use crate::source::{
    CloudSource, FirewallResource, IamBinding, InstanceRecord, ProjectRecord, SourceError,
};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectExport {
    name: String,
    project_id: String,

    #[serde(default = "default_true")]
    compute_access: bool,

    #[serde(default = "default_true")]
    resource_manager_access: bool,

    #[serde(default)]
    zones: Vec<String>,

    /// Instances keyed by zone name.
    #[serde(default)]
    instances: BTreeMap<String, Vec<InstanceRecord>>,

    #[serde(default)]
    firewalls: Vec<FirewallResource>,

    #[serde(default)]
    iam_bindings: Vec<IamBinding>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotDoc {
    projects: Vec<ProjectExport>,
}

#[derive(Debug, Clone)]
pub struct SnapshotSource {
    projects: Vec<ProjectExport>,
}

impl SnapshotSource {
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&text).map_err(|source| SourceError::Malformed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let doc: SnapshotDoc = serde_json::from_str(text)?;
        Ok(Self {
            projects: doc.projects,
        })
    }

    fn project(&self, project_id: &str) -> Option<&ProjectExport> {
        self.projects.iter().find(|p| p.project_id == project_id)
    }

    fn compute_project(&self, project_id: &str) -> Result<&ProjectExport, SourceError> {
        match self.project(project_id) {
            Some(p) if p.compute_access => Ok(p),
            Some(_) => Err(unreachable_err("compute engine", project_id)),
            None => Err(unknown_project("compute engine", project_id)),
        }
    }
}

fn unreachable_err(domain: &'static str, project_id: &str) -> SourceError {
    SourceError::Unreachable {
        domain,
        project_id: project_id.to_string(),
        message: "access was denied at snapshot capture time".into(),
    }
}

fn unknown_project(domain: &'static str, project_id: &str) -> SourceError {
    SourceError::Unreachable {
        domain,
        project_id: project_id.to_string(),
        message: "project is not part of this snapshot".into(),
    }
}

impl CloudSource for SnapshotSource {
    fn list_projects(&self) -> Result<Vec<ProjectRecord>, SourceError> {
        Ok(self
            .projects
            .iter()
            .map(|p| ProjectRecord {
                name: p.name.clone(),
                project_id: p.project_id.clone(),
            })
            .collect())
    }

    fn list_zones(&self, project_id: &str) -> Result<Vec<String>, SourceError> {
        Ok(self.compute_project(project_id)?.zones.clone())
    }

    fn list_instances(
        &self,
        project_id: &str,
        zone: &str,
    ) -> Result<Vec<InstanceRecord>, SourceError> {
        let project = self.compute_project(project_id)?;
        Ok(project.instances.get(zone).cloned().unwrap_or_default())
    }

    fn list_firewalls(&self, project_id: &str) -> Result<Vec<FirewallResource>, SourceError> {
        Ok(self.compute_project(project_id)?.firewalls.clone())
    }

    fn iam_policy(&self, project_id: &str) -> Result<Vec<IamBinding>, SourceError> {
        match self.project(project_id) {
            Some(p) if p.resource_manager_access => Ok(p.iam_bindings.clone()),
            Some(_) => Err(unreachable_err("resource manager", project_id)),
            None => Err(unknown_project("resource manager", project_id)),
        }
    }
}

impl AccessProber for SnapshotSource {
    fn probe_compute(&self, project_id: &str) -> Result<(), SourceError> {
        self.compute_project(project_id).map(|_| ())
    }

    fn probe_resource_manager(&self, project_id: &str) -> Result<(), SourceError> {
        self.iam_policy(project_id).map(|_| ())
    }
}
