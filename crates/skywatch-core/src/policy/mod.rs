pub mod engine;
pub mod matcher;
pub mod ruleset;

pub use engine::{Evaluation, PolicyError, evaluate};
pub use ruleset::{FieldMap, HighlightSet, PatternRule, RuleSet};
