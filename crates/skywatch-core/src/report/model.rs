use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;
use crate::access::DeniedProject;
use crate::inventory::model::Inventory;
use crate::policy::{Evaluation, HighlightSet};

/// Top-level watchdog report.
///
/// The serialized form is the stable JSON contract of a run. Section order
/// is fixed: inaccessible projects first, then each enabled reporting kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn new(tool: ToolInfo, title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            title: title.into(),
            generated_at: Utc::now(),
            sections,
        }
    }

    /// Title with the generation timestamp, as shown in rendered output.
    pub fn display_title(&self) -> String {
        format!(
            "{}  {}",
            self.title,
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// One rendered table: columns, 1-indexed rows and highlight positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub highlights: HighlightSet,
}

impl Section {
    /// Section for an evaluated inventory; positions in the highlight set
    /// already refer to the inventory's post-filter numbering.
    pub fn from_evaluation(title: impl Into<String>, evaluation: Evaluation) -> Self {
        Self::from_inventory(title, evaluation.inventory, evaluation.highlights)
    }

    pub fn from_inventory(
        title: impl Into<String>,
        inventory: Inventory,
        highlights: HighlightSet,
    ) -> Self {
        Self {
            title: title.into(),
            columns: inventory.columns().to_vec(),
            rows: inventory.rows().iter().map(|r| r.0.clone()).collect(),
            highlights,
        }
    }

    /// The inaccessible-projects table. Every row is highlighted; a denied
    /// project always deserves attention.
    pub fn denied_projects(denied: &[DeniedProject]) -> Self {
        let rows: Vec<Vec<String>> = denied
            .iter()
            .map(|d| vec![d.project_id.clone(), d.reason.to_string()])
            .collect();
        let highlights = (1..=rows.len()).collect();

        Self {
            title: "Inaccessible Projects".to_string(),
            columns: vec!["Project ID".to_string(), "Reason".to_string()],
            rows,
            highlights,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
