//! Fetch orchestration across projects and zones.
//!
//! Each helper walks the accessible projects (and zones, for instances) and
//! tolerates per-resource failures: a project or zone that cannot be listed
//! is logged and skipped, the rest of the sweep continues. Results keep
//! source order (projects in discovery order, zones in surviving order), so
//! downstream evaluation is deterministic.

use crate::inventory::build::{self, FirewallRow, IamMemberRow, InstanceRow};
use crate::source::CloudSource;

/// Zones as seen from the first listed project. Projects share the zone
/// catalog, so one answer is enough; with no project or a failing call the
/// sweep degrades to an empty zone list.
pub fn zones(source: &dyn CloudSource, project_ids: &[String]) -> Vec<String> {
    let Some(first) = project_ids.first() else {
        return Vec::new();
    };

    match source.list_zones(first) {
        Ok(zones) => zones,
        Err(err) => {
            log::warn!("failed to list zones via `{first}`: {err}");
            Vec::new()
        }
    }
}

/// Instances across the projects x zones cross-product.
pub fn instances(
    source: &dyn CloudSource,
    project_ids: &[String],
    zones: &[String],
) -> Vec<InstanceRow> {
    let mut rows = Vec::new();

    for project_id in project_ids {
        for zone in zones {
            match source.list_instances(project_id, zone) {
                Ok(records) => {
                    rows.extend(
                        records
                            .iter()
                            .map(|r| InstanceRow::from_record(r, project_id, zone)),
                    );
                }
                Err(err) => {
                    log::warn!("failed to list instances in `{project_id}/{zone}`: {err}");
                }
            }
        }
    }

    rows
}

/// Firewall rule rows per project, expanded per allowed entry.
pub fn firewalls(source: &dyn CloudSource, project_ids: &[String]) -> Vec<FirewallRow> {
    let mut rows = Vec::new();

    for project_id in project_ids {
        match source.list_firewalls(project_id) {
            Ok(resources) => rows.extend(build::firewall_rows(project_id, &resources)),
            Err(err) => {
                log::warn!("failed to list firewalls for `{project_id}`: {err}");
            }
        }
    }

    rows
}

/// IAM member rows per project, exploded per (member, role) grant.
pub fn iam_members(source: &dyn CloudSource, project_ids: &[String]) -> Vec<IamMemberRow> {
    let mut rows = Vec::new();

    for project_id in project_ids {
        match source.iam_policy(project_id) {
            Ok(bindings) => rows.extend(build::iam_member_rows(project_id, &bindings)),
            Err(err) => {
                log::warn!("failed to fetch the IAM policy of `{project_id}`: {err}");
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{
        FirewallResource, IamBinding, InstanceRecord, ProjectRecord, SourceError,
    };

    /// Source where everything about project `bad` fails.
    struct Flaky;

    fn fail(project_id: &str) -> Result<(), SourceError> {
        if project_id == "bad" {
            Err(SourceError::Unreachable {
                domain: "compute engine",
                project_id: project_id.to_string(),
                message: "boom".into(),
            })
        } else {
            Ok(())
        }
    }

    impl CloudSource for Flaky {
        fn list_projects(&self) -> Result<Vec<ProjectRecord>, SourceError> {
            Ok(vec![])
        }

        fn list_zones(&self, project_id: &str) -> Result<Vec<String>, SourceError> {
            fail(project_id)?;
            Ok(vec!["zone-a".into(), "zone-b".into()])
        }

        fn list_instances(
            &self,
            project_id: &str,
            zone: &str,
        ) -> Result<Vec<InstanceRecord>, SourceError> {
            fail(project_id)?;
            Ok(vec![InstanceRecord {
                name: format!("{project_id}-{zone}"),
                status: "RUNNING".into(),
                machine_type: "n1-standard-1".into(),
            }])
        }

        fn list_firewalls(
            &self,
            project_id: &str,
        ) -> Result<Vec<FirewallResource>, SourceError> {
            fail(project_id)?;
            Ok(vec![])
        }

        fn iam_policy(&self, project_id: &str) -> Result<Vec<IamBinding>, SourceError> {
            fail(project_id)?;
            Ok(vec![IamBinding {
                role: "roles/viewer".into(),
                members: vec!["user:a@b.com".into()],
            }])
        }
    }

    #[test]
    fn zones_come_from_the_first_project() {
        let zones = zones(&Flaky, &["good".into(), "bad".into()]);
        assert_eq!(zones, vec!["zone-a", "zone-b"]);
    }

    #[test]
    fn zones_degrade_to_empty_on_failure() {
        assert!(zones(&Flaky, &["bad".into()]).is_empty());
        assert!(zones(&Flaky, &[]).is_empty());
    }

    #[test]
    fn instance_sweep_skips_failing_projects() {
        let rows = instances(
            &Flaky,
            &["good".into(), "bad".into(), "other".into()],
            &["zone-a".into()],
        );

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["good-zone-a", "other-zone-a"]);
    }

    #[test]
    fn instance_sweep_order_is_project_major() {
        let rows = instances(
            &Flaky,
            &["p1".into(), "p2".into()],
            &["zone-a".into(), "zone-b".into()],
        );

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["p1-zone-a", "p1-zone-b", "p2-zone-a", "p2-zone-b"]
        );
    }

    #[test]
    fn iam_sweep_skips_failing_projects() {
        let rows = iam_members(&Flaky, &["bad".into(), "good".into()]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].project_id, "good");
    }
}
