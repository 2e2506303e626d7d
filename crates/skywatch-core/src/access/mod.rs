//! Accessibility probing for projects.
//!
//! A project is usable only when both permission domains answer: the compute
//! API (zones, instances, firewalls) and the resource manager (IAM). This
//! module partitions the project list into reachable projects and denied
//! ones with a reason code, so a permission gap degrades into a report table
//! instead of aborting the run.

use serde::{Deserialize, Serialize};

use crate::source::{ProjectRecord, SourceError};

/// The two independently probed permission domains.
pub trait AccessProber {
    fn probe_compute(&self, project_id: &str) -> Result<(), SourceError>;

    fn probe_resource_manager(&self, project_id: &str) -> Result<(), SourceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DenialReason {
    ComputeUnreachable,
    ResourceManagerUnreachable,
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ComputeUnreachable => "compute-unreachable",
            Self::ResourceManagerUnreachable => "resource-manager-unreachable",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeniedProject {
    pub project_id: String,
    pub reason: DenialReason,
}

/// Partition of the project list produced by [`partition`].
#[derive(Debug, Clone)]
pub struct Accessibility {
    pub accessible: Vec<ProjectRecord>,
    pub denied: Vec<DeniedProject>,
}

/// Probe every project, compute domain first.
///
/// A project failing the compute probe is denied with
/// `ComputeUnreachable` and its resource-manager probe is never attempted,
/// so each project lands in at most one denial record. Failures are logged
/// and recorded, never propagated.
pub fn partition(projects: Vec<ProjectRecord>, prober: &dyn AccessProber) -> Accessibility {
    let mut accessible = Vec::new();
    let mut denied = Vec::new();

    for project in projects {
        if let Err(err) = prober.probe_compute(&project.project_id) {
            log::warn!(
                "compute engine is not configured for `{}` or access is denied: {err}",
                project.project_id
            );
            denied.push(DeniedProject {
                project_id: project.project_id,
                reason: DenialReason::ComputeUnreachable,
            });
            continue;
        }

        if let Err(err) = prober.probe_resource_manager(&project.project_id) {
            log::warn!(
                "resource manager is not configured for `{}` or access is denied: {err}",
                project.project_id
            );
            denied.push(DeniedProject {
                project_id: project.project_id,
                reason: DenialReason::ResourceManagerUnreachable,
            });
            continue;
        }

        accessible.push(project);
    }

    Accessibility { accessible, denied }
}
