//! End-to-end report pipeline.
//!
//! Wires the boundaries together in the fixed batch order: list projects,
//! probe accessibility, filter projects and zones, sweep the reporting
//! inventories, evaluate each against its rule set and assemble the report.
//! Source failures inside the sweeps degrade to diagnostics; only a failing
//! project listing (nothing to report on) and configuration problems
//! (already rejected at load) abort a run.

use anyhow::{Context, Result};

use crate::access::{self, AccessProber};
use crate::config::Config;
use crate::inventory::kinds::columns;
use crate::inventory::{EntityKind, build};
use crate::policy::evaluate;
use crate::report::{Report, Section, ToolInfo};
use crate::source::{CloudSource, collect};

/// Produce the full report for one account.
pub fn run_report<S>(config: &Config, source: &S, tool: ToolInfo) -> Result<Report>
where
    S: CloudSource + AccessProber,
{
    let records = source
        .list_projects()
        .context("failed to list the account's projects")?;
    log::info!("discovered {} projects", records.len());

    let accessibility = access::partition(records, source);

    let projects = evaluate(
        build::projects(&accessibility.accessible),
        &EntityKind::Projects.field_map(),
        &config.general.project_rules(),
        EntityKind::Projects.supports_alert(),
    )?;
    let project_ids = projects.inventory.column_values(columns::PROJECT_ID);

    let zones = evaluate(
        build::zones(&collect::zones(source, &project_ids)),
        &EntityKind::Zones.field_map(),
        &config.general.zone_rules(),
        EntityKind::Zones.supports_alert(),
    )?;
    let zone_names = zones.inventory.column_values(columns::NAME);

    let mut sections = vec![Section::denied_projects(&accessibility.denied)];

    if config.compute.enabled {
        let rows = collect::instances(source, &project_ids, &zone_names);
        let instances = evaluate(
            build::instances(&rows),
            &EntityKind::Instances.field_map(),
            &config.compute.rule_set(),
            EntityKind::Instances.supports_alert(),
        )?;
        sections.push(Section::from_evaluation("Instances", instances));
    }

    if config.iam.enabled {
        let rows = collect::iam_members(source, &project_ids);
        let iam = evaluate(
            build::iam_bindings(&rows),
            &EntityKind::IamBindings.field_map(),
            &config.iam.rule_set(),
            EntityKind::IamBindings.supports_alert(),
        )?;
        sections.push(Section::from_evaluation("IAM", iam));
    }

    if config.firewall.enabled {
        let rows = collect::firewalls(source, &project_ids);
        let mut evaluation = evaluate(
            build::firewall_rules(&rows),
            &EntityKind::FirewallRules.field_map(),
            &config.firewall.rule_set(),
            EntityKind::FirewallRules.supports_alert(),
        )?;
        // The resource kind column is source metadata, not report content.
        evaluation.inventory.drop_column(columns::FIREWALL_KIND);
        sections.push(Section::from_evaluation("Firewalls", evaluation));
    }

    Ok(Report::new(
        tool,
        config.general.report_title.clone(),
        sections,
    ))
}
