//! Normalization of persisted meal-plan shapes.
//!
//! The plan document has been stored in several shapes over its lifetime:
//! a slot was once a single dish string, then a string array, and is now an
//! object; a day was once a flat map of meal-type keys and is now
//! partitioned into `{adult, kids}` variants. Everything read from storage
//! passes through here and comes out in the one canonical shape, with no
//! data loss and no errors; unrecognized input degrades to an empty
//! default.
//!
//! Every function in this module is total and idempotent: normalizing
//! already-canonical data returns an equal value, and no input panics.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::types::{DayPlan, MealSlot, MealType, PlanDocument, VariantPlan, WeeklyPlan};

/// Every slot representation that has ever been persisted.
#[derive(Debug)]
pub enum StoredSlot<'a> {
    /// Nothing stored, or a shape with no usable interpretation.
    Missing,
    /// Oldest shape: the dish name itself.
    LegacyText(&'a str),
    /// Later shape: a bare list of dish names.
    LegacyList(&'a [Value]),
    /// Current shape: an object carrying `items` plus slot metadata.
    Table(&'a Map<String, Value>),
}

impl<'a> StoredSlot<'a> {
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => StoredSlot::Missing,
            Some(Value::String(text)) => StoredSlot::LegacyText(text),
            Some(Value::Array(values)) => StoredSlot::LegacyList(values),
            Some(Value::Object(map)) => StoredSlot::Table(map),
            Some(other) => {
                tracing::debug!(shape = ?other, "unrecognized slot shape, treating as empty");
                StoredSlot::Missing
            }
        }
    }
}

/// Every day representation that has ever been persisted.
#[derive(Debug)]
pub enum StoredDay<'a> {
    Missing,
    /// Current shape: `{adult: {...}, kids: {...}}`.
    VariantKeyed(&'a Map<String, Value>),
    /// Legacy shape: meal-type keys directly on the day object. Predates
    /// the kids variant, so its slots all belong to the adult track.
    LegacyFlat(&'a Map<String, Value>),
}

impl<'a> StoredDay<'a> {
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => StoredDay::Missing,
            Some(Value::Object(map)) => {
                if map.contains_key("adult") || map.contains_key("kids") {
                    StoredDay::VariantKeyed(map)
                } else {
                    StoredDay::LegacyFlat(map)
                }
            }
            Some(other) => {
                tracing::debug!(shape = ?other, "unrecognized day shape, treating as empty");
                StoredDay::Missing
            }
        }
    }
}

/// Convert any stored slot value into a canonical [`MealSlot`].
pub fn normalize_slot(value: Option<&Value>) -> MealSlot {
    match StoredSlot::classify(value) {
        StoredSlot::Missing => MealSlot::default(),
        StoredSlot::LegacyText(text) => MealSlot {
            items: vec![text.to_string()],
            ..MealSlot::default()
        },
        StoredSlot::LegacyList(values) => MealSlot {
            items: string_items(values),
            ..MealSlot::default()
        },
        StoredSlot::Table(map) => {
            let items = map
                .get("items")
                .and_then(Value::as_array)
                .map(|values| string_items(values))
                .unwrap_or_default();
            let protein = map
                .get("protein")
                .and_then(Value::as_f64)
                .filter(|grams| *grams >= 0.0);
            // completed is only meaningful with items
            let completed =
                map.get("completed").and_then(Value::as_bool).unwrap_or(false) && !items.is_empty();
            let prep_notes = map
                .get("prepNotes")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|notes| !notes.is_empty())
                .map(String::from);
            MealSlot {
                items,
                protein,
                completed,
                prep_notes,
            }
        }
    }
}

/// Convert any stored day value into a canonical [`DayPlan`].
///
/// The legacy flat shape migrates one way: its slots land on the adult
/// track and the kids track starts empty. Kids data is never
/// reconstructed from legacy input.
pub fn normalize_day(value: Option<&Value>) -> DayPlan {
    match StoredDay::classify(value) {
        StoredDay::Missing => DayPlan::default(),
        StoredDay::VariantKeyed(map) => DayPlan {
            adult: normalize_variant(map.get("adult")),
            kids: normalize_variant(map.get("kids")),
        },
        StoredDay::LegacyFlat(map) => DayPlan {
            adult: slots_from(map),
            kids: VariantPlan::new(),
        },
    }
}

/// Convert a stored weekly plan object, skipping keys that are not dates.
pub fn normalize_week(value: Option<&Value>) -> WeeklyPlan {
    let Some(Value::Object(map)) = value else {
        return WeeklyPlan::new();
    };
    let mut week = WeeklyPlan::new();
    for (key, day) in map {
        match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
            Ok(date) => {
                week.insert(date, normalize_day(Some(day)));
            }
            Err(_) => tracing::debug!(%key, "skipping weekly plan entry with non-date key"),
        }
    }
    week
}

/// Convert the raw widget value into a [`PlanDocument`]. An absent value
/// is an empty document; `prepCompleted` keeps only entries that are
/// literally `true`.
pub fn normalize_document(value: Option<&Value>) -> PlanDocument {
    let Some(Value::Object(map)) = value else {
        return PlanDocument::default();
    };
    let weekly_plan = normalize_week(map.get("weeklyPlan"));
    let mut prep_completed = BTreeMap::new();
    if let Some(Value::Object(entries)) = map.get("prepCompleted") {
        for (key, flag) in entries {
            if flag.as_bool() == Some(true) {
                prep_completed.insert(key.clone(), true);
            }
        }
    }
    PlanDocument {
        weekly_plan,
        prep_completed,
    }
}

fn normalize_variant(value: Option<&Value>) -> VariantPlan {
    match value {
        Some(Value::Object(map)) => slots_from(map),
        _ => VariantPlan::new(),
    }
}

/// Collect recognized meal-type keys off a day or variant object.
fn slots_from(map: &Map<String, Value>) -> VariantPlan {
    let mut plan = VariantPlan::new();
    for meal_type in MealType::ALL {
        if let Some(slot) = map.get(meal_type.as_str()) {
            if !slot.is_null() {
                plan.insert(meal_type, normalize_slot(Some(slot)));
            }
        }
    }
    plan
}

fn string_items(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(String::from)
        .collect()
}
