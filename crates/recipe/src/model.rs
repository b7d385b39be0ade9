use serde::{Deserialize, Serialize};

/// Recipe data as exposed to the meal-planning feature.
///
/// This is the lookup-facing projection, not a full recipe editor model:
/// the planner only needs protein content, the advance-prep flag, and
/// display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,

    /// Protein grams per serving, when known.
    #[serde(default)]
    pub protein: Option<f64>,

    /// Whether the dish needs work the day before it is served.
    #[serde(default)]
    pub requires_prep: bool,

    /// What the advance work is, shown on the prep schedule.
    #[serde(default)]
    pub prep_instructions: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl Recipe {
    pub fn named(name: impl Into<String>) -> Self {
        Recipe {
            name: name.into(),
            protein: None,
            requires_prep: false,
            prep_instructions: None,
            icon: None,
            tags: Vec::new(),
        }
    }
}
