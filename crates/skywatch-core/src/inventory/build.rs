//! Builders turning raw source records into tabular inventories.
//!
//! Pure structural mapping, no policy: member strings are parsed, firewall
//! resources are expanded per allowed entry, IAM rows are grouped with their
//! roles collected in order. Interpretation of the resulting tables happens
//! in `policy::evaluate`.

use crate::inventory::kinds::columns;
use crate::inventory::model::Inventory;
use crate::source::{FirewallResource, IamBinding, InstanceRecord, ProjectRecord};

pub fn projects(records: &[ProjectRecord]) -> Inventory {
    let mut inv = Inventory::new(&[columns::NAME, columns::PROJECT_ID]);
    for r in records {
        inv.push(vec![r.name.clone(), r.project_id.clone()]);
    }
    inv
}

pub fn zones(names: &[String]) -> Inventory {
    let mut inv = Inventory::new(&[columns::NAME]);
    for name in names {
        inv.push(vec![name.clone()]);
    }
    inv
}

/// One instance row, already tagged with its project and zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRow {
    pub name: String,
    pub status: String,
    pub machine_type: String,
    pub project_id: String,
    pub zone: String,
}

impl InstanceRow {
    pub fn from_record(record: &InstanceRecord, project_id: &str, zone: &str) -> Self {
        // Machine types arrive as full resource URLs; only the type name matters.
        let machine_type = record
            .machine_type
            .rsplit('/')
            .next()
            .unwrap_or(record.machine_type.as_str())
            .to_string();

        Self {
            name: record.name.clone(),
            status: record.status.clone(),
            machine_type,
            project_id: project_id.to_string(),
            zone: zone.to_string(),
        }
    }
}

pub fn instances(rows: &[InstanceRow]) -> Inventory {
    let mut inv = Inventory::new(&[
        columns::INSTANCE,
        columns::STATUS,
        columns::MACHINE_TYPE,
        columns::PROJECT_ID,
        columns::ZONE,
    ]);
    for r in rows {
        inv.push(vec![
            r.name.clone(),
            r.status.clone(),
            r.machine_type.clone(),
            r.project_id.clone(),
            r.zone.clone(),
        ]);
    }
    inv
}

/// One IAM grant: a single member holding a single role in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IamMemberRow {
    pub project_id: String,
    pub name: String,
    pub email: String,
    pub email_domain: String,
    pub account_type: String,
    pub role: String,
}

/// Explode policy bindings into one row per (member, role) grant.
///
/// Members have the form `<account-type>:<email>`. The display name is the
/// email local part with dots as spaces; the `roles/` prefix is stripped.
/// Members without that form are skipped with a diagnostic.
pub fn iam_member_rows(project_id: &str, bindings: &[IamBinding]) -> Vec<IamMemberRow> {
    let mut rows = Vec::new();

    for binding in bindings {
        let role = binding
            .role
            .strip_prefix("roles/")
            .unwrap_or(binding.role.as_str());

        for member in &binding.members {
            let Some((account_type, email)) = member.split_once(':') else {
                log::warn!("skipping malformed IAM member `{member}` in project `{project_id}`");
                continue;
            };

            let (local, domain) = email.split_once('@').unwrap_or((email, ""));

            rows.push(IamMemberRow {
                project_id: project_id.to_string(),
                name: local.replace('.', " "),
                email: email.to_string(),
                email_domain: domain.to_string(),
                account_type: account_type.to_string(),
                role: role.to_string(),
            });
        }
    }

    rows
}

/// Group member rows by (project, name, email, domain, account type),
/// collecting roles into one comma-joined cell per group. First-seen group
/// order is preserved.
pub fn iam_bindings(rows: &[IamMemberRow]) -> Inventory {
    let mut groups: Vec<(IamMemberRow, Vec<String>)> = Vec::new();

    for row in rows {
        let existing = groups.iter_mut().find(|(head, _)| {
            head.project_id == row.project_id
                && head.name == row.name
                && head.email == row.email
                && head.email_domain == row.email_domain
                && head.account_type == row.account_type
        });

        match existing {
            Some((_, roles)) => roles.push(row.role.clone()),
            None => groups.push((row.clone(), vec![row.role.clone()])),
        }
    }

    let mut inv = Inventory::new(&[
        columns::PROJECT_ID,
        columns::NAME,
        columns::EMAIL,
        columns::EMAIL_DOMAIN,
        columns::ACCOUNT_TYPE,
        columns::ROLE,
    ]);
    for (head, roles) in groups {
        inv.push(vec![
            head.project_id,
            head.name,
            head.email,
            head.email_domain,
            head.account_type,
            roles.join(", "),
        ]);
    }
    inv
}

/// One firewall rule row, one per allowed entry of a firewall resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirewallRow {
    pub project_id: String,
    pub name: String,
    pub range: String,
    pub protocol: String,
    pub port: String,
    pub kind: String,
}

/// Expand firewall resources: one row per allowed entry, carrying the first
/// source range and the first port (empty when absent).
pub fn firewall_rows(project_id: &str, resources: &[FirewallResource]) -> Vec<FirewallRow> {
    let mut rows = Vec::new();

    for resource in resources {
        for allowed in &resource.allowed {
            rows.push(FirewallRow {
                project_id: project_id.to_string(),
                name: resource.name.clone(),
                range: resource.source_ranges.first().cloned().unwrap_or_default(),
                protocol: allowed.protocol.clone(),
                port: allowed.ports.first().cloned().unwrap_or_default(),
                kind: resource.kind.clone(),
            });
        }
    }

    rows
}

pub fn firewall_rules(rows: &[FirewallRow]) -> Inventory {
    let mut inv = Inventory::new(&[
        columns::PROJECT_ID,
        columns::RULE_NAME,
        columns::RANGE,
        columns::PROTOCOL,
        columns::PORT,
        columns::FIREWALL_KIND,
    ]);
    for r in rows {
        inv.push(vec![
            r.project_id.clone(),
            r.name.clone(),
            r.range.clone(),
            r.protocol.clone(),
            r.port.clone(),
            r.kind.clone(),
        ]);
    }
    inv
}
