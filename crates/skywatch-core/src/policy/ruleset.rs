use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Mapping from logical rule keys to concrete inventory columns for one
/// entity kind. A key absent from the map makes any rule using it
/// inapplicable for that kind.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldMap {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn resolve(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, column)| *column)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.resolve(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
}

/// OR-combined substring patterns tested against one logical field.
///
/// `patterns: None` means the rule appears in configuration but is disabled
/// (a null pattern entry disables the whole rule, it does not mean "match
/// nothing" or "match everything"). An empty list is likewise skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    pub key: String,
    pub patterns: Option<Vec<String>>,
}

impl PatternRule {
    pub fn new(key: impl Into<String>, patterns: Vec<String>) -> Self {
        Self {
            key: key.into(),
            patterns: Some(patterns),
        }
    }

    pub fn disabled(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            patterns: None,
        }
    }

    /// The patterns to match, or `None` when the rule is not configured.
    pub fn enabled_patterns(&self) -> Option<&[String]> {
        match self.patterns.as_deref() {
            Some([]) | None => None,
            Some(patterns) => Some(patterns),
        }
    }
}

/// Ignore, notify and alert rules for one entity kind.
///
/// Rules within each group compose conjunctively: every ignore rule removes
/// its matches, every notify rule keeps only its matches. Alert rules never
/// remove rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub ignore: Vec<PatternRule>,
    pub notify: Vec<PatternRule>,
    pub alert: Vec<PatternRule>,
}

impl RuleSet {
    pub fn is_empty(&self) -> bool {
        self.ignore.is_empty() && self.notify.is_empty() && self.alert.is_empty()
    }
}

/// Stable 1-based positions of rows matched by at least one alert rule.
///
/// Positions refer to the post-filter numbering and exist purely for
/// presentational emphasis; membership never affects filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSet(BTreeSet<usize>);

impl HighlightSet {
    pub fn insert(&mut self, position: usize) {
        let _ = self.0.insert(position);
    }

    pub fn contains(&self, position: usize) -> bool {
        self.0.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Positions in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for HighlightSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
