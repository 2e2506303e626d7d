//! Entity kinds and their rule-key tables.
//!
//! Each inventory kind exposes a fixed `FieldMap` from the logical keys the
//! rule language uses (`name`, `status`, `role`, ...) to the concrete column
//! carrying that value. The tables here are the single source of truth for
//! which keys a configuration may reference per kind, and whether the kind
//! participates in alert highlighting.

use crate::policy::FieldMap;

/// Column names shared between inventory builders, field maps and rendering.
pub mod columns {
    pub const NAME: &str = "Name";
    pub const PROJECT_ID: &str = "Project ID";
    pub const REASON: &str = "Reason";

    pub const INSTANCE: &str = "Instance";
    pub const STATUS: &str = "Status";
    pub const MACHINE_TYPE: &str = "Machine type";
    pub const ZONE: &str = "Zone";

    pub const EMAIL: &str = "Email";
    pub const EMAIL_DOMAIN: &str = "Email domain";
    pub const ACCOUNT_TYPE: &str = "Account type";
    pub const ROLE: &str = "Role";

    pub const RULE_NAME: &str = "Rule name";
    pub const RANGE: &str = "Range";
    pub const PROTOCOL: &str = "Protocol";
    pub const PORT: &str = "Port";
    pub const FIREWALL_KIND: &str = "Kind";
}

const PROJECT_FIELDS: FieldMap = FieldMap::new(&[
    ("name", columns::NAME),
    ("project-id", columns::PROJECT_ID),
]);

const ZONE_FIELDS: FieldMap = FieldMap::new(&[("name", columns::NAME)]);

const INSTANCE_FIELDS: FieldMap = FieldMap::new(&[
    ("status", columns::STATUS),
    ("machine-type", columns::MACHINE_TYPE),
    ("name", columns::INSTANCE),
]);

const IAM_FIELDS: FieldMap = FieldMap::new(&[
    ("name", columns::NAME),
    ("email", columns::EMAIL),
    ("account-type", columns::ACCOUNT_TYPE),
    ("role", columns::ROLE),
]);

const FIREWALL_FIELDS: FieldMap = FieldMap::new(&[
    ("name", columns::RULE_NAME),
    ("range", columns::RANGE),
    ("protocol", columns::PROTOCOL),
    ("port", columns::PORT),
]);

/// The five inventory kinds the watchdog evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Projects,
    Zones,
    Instances,
    IamBindings,
    FirewallRules,
}

impl EntityKind {
    pub const fn field_map(self) -> FieldMap {
        match self {
            Self::Projects => PROJECT_FIELDS,
            Self::Zones => ZONE_FIELDS,
            Self::Instances => INSTANCE_FIELDS,
            Self::IamBindings => IAM_FIELDS,
            Self::FirewallRules => FIREWALL_FIELDS,
        }
    }

    /// Projects and zones are pure filters; only reporting kinds highlight.
    pub const fn supports_alert(self) -> bool {
        match self {
            Self::Projects | Self::Zones => false,
            Self::Instances | Self::IamBindings | Self::FirewallRules => true,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Zones => "zones",
            Self::Instances => "instances",
            Self::IamBindings => "IAM bindings",
            Self::FirewallRules => "firewall rules",
        }
    }
}
