use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Meal type enum
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snacks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snacks => "snacks",
        }
    }

    /// Resolve the loose spellings accepted by the weekly import grammar.
    pub fn parse_alias(s: &str) -> Option<MealType> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" | "bfast" | "morning" => Some(MealType::Breakfast),
            "lunch" | "afternoon" => Some(MealType::Lunch),
            "dinner" | "supper" | "evening" => Some(MealType::Dinner),
            "snacks" | "snack" => Some(MealType::Snacks),
            _ => None,
        }
    }
}

/// Independent meal tracks for the same date.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    Adult,
    Kids,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Adult, Variant::Kids];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Adult => "adult",
            Variant::Kids => "kids",
        }
    }
}

/// One meal assignment for a date, variant, and meal type.
///
/// `items` order is display-significant and duplicates are allowed in the
/// stored data; de-duplication only happens on the explicit-add path
/// ([`MealSlot::add_item`]). `completed` is meaningful only while the slot
/// has items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSlot {
    #[serde(default)]
    pub items: Vec<String>,

    /// Manual protein override in grams; when absent, protein is derived
    /// from recipe lookups per item.
    #[serde(default)]
    pub protein: Option<f64>,

    #[serde(default)]
    pub completed: bool,

    /// Free text describing advance prep required for this meal.
    #[serde(default)]
    pub prep_notes: Option<String>,
}

impl MealSlot {
    pub fn from_items(items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        MealSlot {
            items: items.into_iter().map(Into::into).collect(),
            ..MealSlot::default()
        }
    }

    /// Push an item unless an identical one is already present.
    /// Returns whether the slot changed.
    pub fn add_item(&mut self, item: &str) -> bool {
        if self.items.iter().any(|existing| existing == item) {
            return false;
        }
        self.items.push(item.to_string());
        true
    }

    /// `completed` is only valid with a non-empty item list.
    pub fn enforce_completion_invariant(&mut self) {
        if self.items.is_empty() {
            self.completed = false;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.protein.is_none() && self.prep_notes.is_none()
    }
}

/// A variant's meals for one date; an absent key means "not planned".
pub type VariantPlan = BTreeMap<MealType, MealSlot>;

/// A date's meals, partitioned by variant. Both tracks empty is a valid
/// state equivalent to "no plan for this date".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub adult: VariantPlan,

    #[serde(default)]
    pub kids: VariantPlan,
}

impl DayPlan {
    pub fn variant(&self, variant: Variant) -> &VariantPlan {
        match variant {
            Variant::Adult => &self.adult,
            Variant::Kids => &self.kids,
        }
    }

    pub fn variant_mut(&mut self, variant: Variant) -> &mut VariantPlan {
        match variant {
            Variant::Adult => &mut self.adult,
            Variant::Kids => &mut self.kids,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.adult.is_empty() && self.kids.is_empty()
    }

    /// Structural clone with every completion flag stripped; copying a day
    /// copies the plan, not its progress.
    pub fn cleared_completion(&self) -> DayPlan {
        let strip = |plan: &VariantPlan| {
            plan.iter()
                .map(|(meal_type, slot)| {
                    let mut slot = slot.clone();
                    slot.completed = false;
                    (*meal_type, slot)
                })
                .collect()
        };
        DayPlan {
            adult: strip(&self.adult),
            kids: strip(&self.kids),
        }
    }
}

/// Mapping from date to day plan; dates are unique by construction.
pub type WeeklyPlan = BTreeMap<NaiveDate, DayPlan>;

/// The full persisted value under the `meal-plan` widget key.
///
/// `prep_completed` maps `"<prep-date>:<recipeName>"` to true; absence
/// means not completed. Key shape and camelCase field names are kept
/// byte-compatible with documents written by earlier front ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    #[serde(default)]
    pub weekly_plan: WeeklyPlan,

    #[serde(default)]
    pub prep_completed: BTreeMap<String, bool>,
}
