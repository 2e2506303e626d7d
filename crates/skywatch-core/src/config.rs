//! Watchdog configuration.
//!
//! The configuration is one YAML document: a `general` section (report
//! title, mail addresses, project and zone filter rules) plus one section
//! per reporting kind (`compute`, `iam`, `firewall`) carrying ignore,
//! notify and alert rule maps keyed by logical field name.
//!
//! Pattern lists come in several shapes, all equivalent:
//!
//! ```yaml
//! ignore-rules:
//!   name: test                 # single pattern
//!   status:                    # sequence of patterns
//!     - STOPPED
//!     - string: TERMINATED     # legacy mapping form
//!   machine-type: ~            # null disables the rule entirely
//! ```
//!
//! A null pattern, whether the whole value or one sequence entry, disables
//! the rule. It does not mean "match nothing" or "match everything".
//!
//! Everything is validated once at load time: unknown structural keys and
//! rule keys that no field map defines are configuration errors, reported
//! before any filtering starts.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::inventory::EntityKind;
use crate::policy::{PatternRule, RuleSet};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration `{path}`")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(
        "unknown rule key `{key}` in `{section}` ({kind} rules accept: {expected})"
    )]
    UnknownRuleKey {
        section: &'static str,
        key: String,
        kind: &'static str,
        expected: String,
    },
}

/// Rule maps as written in configuration: logical key to pattern list.
pub type RuleMap = BTreeMap<String, PatternList>;

/// A pattern list in any of its configuration shapes. `None` marks a rule
/// explicitly disabled via a null entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawPatterns")]
pub struct PatternList(Option<Vec<String>>);

impl PatternList {
    pub fn patterns(&self) -> Option<&[String]> {
        self.0.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawPattern {
    /// Legacy `- string: foo` mapping entries.
    Tagged { string: Option<String> },
    Plain(Option<String>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawPatterns {
    One(Option<String>),
    Many(Vec<RawPattern>),
}

impl From<RawPatterns> for PatternList {
    fn from(raw: RawPatterns) -> Self {
        let entries: Vec<Option<String>> = match raw {
            RawPatterns::One(entry) => vec![entry],
            RawPatterns::Many(items) => items
                .into_iter()
                .map(|item| match item {
                    RawPattern::Tagged { string } => string,
                    RawPattern::Plain(value) => value,
                })
                .collect(),
        };

        // One null entry disables the whole rule.
        if entries.iter().any(Option::is_none) {
            return Self(None);
        }

        Self(Some(entries.into_iter().flatten().collect()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    #[serde(rename = "report-title")]
    pub report_title: String,

    #[serde(rename = "sender-email")]
    pub sender_email: String,

    #[serde(rename = "receiver-email", default)]
    pub receiver_emails: ReceiverList,

    #[serde(rename = "ignore-projects", default)]
    pub ignore_projects: RuleMap,

    #[serde(rename = "notify-projects", default)]
    pub notify_projects: RuleMap,

    #[serde(rename = "ignore-zones", default)]
    pub ignore_zones: RuleMap,

    #[serde(rename = "notify-zones", default)]
    pub notify_zones: RuleMap,
}

/// Receiver addresses, as plain strings or legacy `- email: x` mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<RawReceiver>")]
pub struct ReceiverList(pub Vec<String>);

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawReceiver {
    Tagged { email: String },
    Plain(String),
}

impl From<Vec<RawReceiver>> for ReceiverList {
    fn from(raw: Vec<RawReceiver>) -> Self {
        Self(
            raw.into_iter()
                .map(|r| match r {
                    RawReceiver::Tagged { email } => email,
                    RawReceiver::Plain(email) => email,
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(rename = "ignore-rules", default)]
    pub ignore_rules: RuleMap,

    #[serde(rename = "notify-rules", default)]
    pub notify_rules: RuleMap,

    #[serde(rename = "alert-rules", default)]
    pub alert_rules: RuleMap,
}

const fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub general: GeneralConfig,
    pub compute: SectionConfig,
    pub iam: SectionConfig,
    pub firewall: SectionConfig,
}

fn to_rules(map: &RuleMap) -> Vec<PatternRule> {
    map.iter()
        .map(|(key, list)| PatternRule {
            key: key.clone(),
            patterns: list.patterns().map(<[String]>::to_vec),
        })
        .collect()
}

impl GeneralConfig {
    /// Ignore/notify rules for the project inventory. Projects never alert.
    pub fn project_rules(&self) -> RuleSet {
        RuleSet {
            ignore: to_rules(&self.ignore_projects),
            notify: to_rules(&self.notify_projects),
            alert: Vec::new(),
        }
    }

    pub fn zone_rules(&self) -> RuleSet {
        RuleSet {
            ignore: to_rules(&self.ignore_zones),
            notify: to_rules(&self.notify_zones),
            alert: Vec::new(),
        }
    }
}

impl SectionConfig {
    pub fn rule_set(&self) -> RuleSet {
        RuleSet {
            ignore: to_rules(&self.ignore_rules),
            notify: to_rules(&self.notify_rules),
            alert: to_rules(&self.alert_rules),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self =
            serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject rule keys that no field map defines for their entity kind,
    /// so a typo fails the run before any filtering happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, &RuleMap, EntityKind); 13] = [
            ("general.ignore-projects", &self.general.ignore_projects, EntityKind::Projects),
            ("general.notify-projects", &self.general.notify_projects, EntityKind::Projects),
            ("general.ignore-zones", &self.general.ignore_zones, EntityKind::Zones),
            ("general.notify-zones", &self.general.notify_zones, EntityKind::Zones),
            ("compute.ignore-rules", &self.compute.ignore_rules, EntityKind::Instances),
            ("compute.notify-rules", &self.compute.notify_rules, EntityKind::Instances),
            ("compute.alert-rules", &self.compute.alert_rules, EntityKind::Instances),
            ("iam.ignore-rules", &self.iam.ignore_rules, EntityKind::IamBindings),
            ("iam.notify-rules", &self.iam.notify_rules, EntityKind::IamBindings),
            ("iam.alert-rules", &self.iam.alert_rules, EntityKind::IamBindings),
            ("firewall.ignore-rules", &self.firewall.ignore_rules, EntityKind::FirewallRules),
            ("firewall.notify-rules", &self.firewall.notify_rules, EntityKind::FirewallRules),
            ("firewall.alert-rules", &self.firewall.alert_rules, EntityKind::FirewallRules),
        ];

        for (section, map, kind) in checks {
            validate_keys(section, map, kind)?;
        }

        Ok(())
    }
}

fn validate_keys(
    section: &'static str,
    map: &RuleMap,
    kind: EntityKind,
) -> Result<(), ConfigError> {
    let field_map = kind.field_map();
    for key in map.keys() {
        if !field_map.contains_key(key) {
            return Err(ConfigError::UnknownRuleKey {
                section,
                key: key.clone(),
                kind: kind.label(),
                expected: field_map.keys().collect::<Vec<_>>().join(", "),
            });
        }
    }
    Ok(())
}
