//! Policy evaluation engine.
//!
//! Applies one entity kind's rule set to a tabular inventory in a fixed,
//! non-configurable order:
//!
//!   1. ignore pass  - every ignore rule removes its matching rows
//!   2. notify pass  - every notify rule keeps only its matching rows
//!   3. index reset  - survivors are renumbered 1..N in surviving order
//!   4. alert pass   - alert rules mark positions, never remove rows
//!
//! Rules within the ignore and notify passes compose conjunctively: the
//! passes apply rules sequentially, each shrinking the inventory, so a row
//! survives only by passing every configured rule. For notify rules this is
//! intersective on purpose, not a union of the individual rule matches.
//!
//! Responsibilities:
//! - Rule precedence and composition
//! - Stable post-filter numbering used for highlighting
//!
//! Non-responsibilities:
//! - Building inventories (handled in `inventory::build`)
//! - Validating rule configuration (handled in `config`, before any
//!   filtering; an unmapped key reaching this module is simply a no-op)
//! - Rendering (a `HighlightSet` is the only presentation-facing output)

use thiserror::Error;

use crate::inventory::model::Inventory;
use crate::policy::matcher::PatternMatcher;
use crate::policy::ruleset::{FieldMap, HighlightSet, PatternRule, RuleSet};

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid pattern for rule key `{key}`")]
    InvalidPattern {
        key: String,
        #[source]
        source: regex::Error,
    },
}

/// Filtered inventory plus the alert marks for its surviving rows.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub inventory: Inventory,
    pub highlights: HighlightSet,
}

/// A rule resolved against a concrete inventory: column index + matcher.
/// `None` when the rule is disabled, its key is unmapped, or the mapped
/// column is absent from this inventory.
fn applicable(
    rule: &PatternRule,
    field_map: &FieldMap,
    inventory: &Inventory,
) -> Result<Option<(usize, PatternMatcher)>, PolicyError> {
    let Some(patterns) = rule.enabled_patterns() else {
        return Ok(None);
    };
    let Some(column) = field_map.resolve(&rule.key) else {
        return Ok(None);
    };
    let Some(index) = inventory.column_index(column) else {
        return Ok(None);
    };

    let matcher = PatternMatcher::new(patterns).map_err(|source| PolicyError::InvalidPattern {
        key: rule.key.clone(),
        source,
    })?;

    Ok(Some((index, matcher)))
}

/// Evaluate one inventory against its rule set.
///
/// Returns the filtered inventory and, when `supports_alert` is set, the
/// 1-based positions (in the returned inventory's order) matched by at least
/// one alert rule. The alert pass never changes the inventory size.
pub fn evaluate(
    mut inventory: Inventory,
    field_map: &FieldMap,
    rules: &RuleSet,
    supports_alert: bool,
) -> Result<Evaluation, PolicyError> {
    for rule in &rules.ignore {
        if let Some((index, matcher)) = applicable(rule, field_map, &inventory)? {
            inventory.retain(|row| !row.get(index).is_some_and(|v| matcher.is_match(v)));
        }
    }

    for rule in &rules.notify {
        if let Some((index, matcher)) = applicable(rule, field_map, &inventory)? {
            inventory.retain(|row| row.get(index).is_some_and(|v| matcher.is_match(v)));
        }
    }

    // Surviving rows now carry their stable 1-based positions implicitly:
    // position i is rows()[i - 1]. Alert marks are expressed against this
    // numbering and stay valid for rendering.
    let mut highlights = HighlightSet::default();

    if supports_alert {
        for rule in &rules.alert {
            if let Some((index, matcher)) = applicable(rule, field_map, &inventory)? {
                for (i, row) in inventory.rows().iter().enumerate() {
                    if row.get(index).is_some_and(|v| matcher.is_match(v)) {
                        highlights.insert(i + 1);
                    }
                }
            }
        }
    }

    Ok(Evaluation {
        inventory,
        highlights,
    })
}
