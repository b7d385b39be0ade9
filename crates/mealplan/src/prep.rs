//! "Prep the day before" schedule derivation.
//!
//! Walks a calendar week of day plans and shifts every advance-prep demand
//! backward one day: what day *i* needs prepared shows up under day
//! *i − 1*'s date. The first day of the week has no predecessor inside the
//! week, so its demands land in a `before-week` bucket.
//!
//! Two independent sources feed the schedule: free-text prep notes on a
//! slot, and recipes flagged `requires_prep` among the slot's items. A
//! bucket de-duplicates by [`PrepItem::unique_key`], so the same flagged
//! recipe appearing in both variants yields one entry while a note and a
//! recipe item for the same meal coexist.
//!
//! Pure derivation: nothing here mutates the plan or reads completion
//! state.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use recipe::RecipeIndex;

use crate::types::{DayPlan, MealType, Variant};

/// Shown when a recipe is flagged for prep but carries no instructions.
const DEFAULT_PREP_INSTRUCTIONS: &str = "Prepare ahead";

/// The date advance preparation happens on. `BeforeWeek` labels work due
/// before the week under derivation starts; it orders before any date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrepDate {
    BeforeWeek,
    Day(NaiveDate),
}

impl PrepDate {
    /// Concrete calendar date of this bucket, given the week's start date.
    pub fn resolve(self, week_start: NaiveDate) -> Option<NaiveDate> {
        match self {
            PrepDate::BeforeWeek => week_start.pred_opt(),
            PrepDate::Day(date) => Some(date),
        }
    }
}

impl fmt::Display for PrepDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepDate::BeforeWeek => f.write_str("before-week"),
            PrepDate::Day(date) => write!(f, "{date}"),
        }
    }
}

/// One derived prep task.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepItem {
    /// Dish name for recipe-driven items; for note-driven items, the joined
    /// item names (or the meal-type name while the slot has no items yet).
    pub recipe_name: String,
    pub prep_instructions: String,
    pub for_meal_type: MealType,
    pub variant: Variant,
    pub is_custom_note: bool,
    /// De-duplication key within one prep-date bucket:
    /// `custom:<mealDate>:<mealType>:<variant>` or `recipe:<itemName>`.
    pub unique_key: String,
}

/// One prep-date bucket. `for_date` is the meal date the bucket prepares
/// for; with consecutive week days each bucket serves exactly one date.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepDay {
    pub for_date: NaiveDate,
    pub items: Vec<PrepItem>,
}

pub type PrepSchedule = BTreeMap<PrepDate, PrepDay>;

/// Derive the prep schedule for an ordered week of `(date, plan)` entries.
pub fn derive_prep_schedule(
    week: &[(NaiveDate, DayPlan)],
    recipes: &RecipeIndex,
) -> PrepSchedule {
    let mut schedule = PrepSchedule::new();

    for (index, (date, plan)) in week.iter().enumerate() {
        let prep_date = if index == 0 {
            PrepDate::BeforeWeek
        } else {
            PrepDate::Day(week[index - 1].0)
        };

        for variant in Variant::ALL {
            for (meal_type, slot) in plan.variant(variant) {
                if let Some(notes) = slot
                    .prep_notes
                    .as_deref()
                    .map(str::trim)
                    .filter(|notes| !notes.is_empty())
                {
                    let label = if slot.items.is_empty() {
                        meal_type.as_str().to_string()
                    } else {
                        slot.items.join(", ")
                    };
                    push_item(
                        &mut schedule,
                        prep_date,
                        *date,
                        PrepItem {
                            recipe_name: label,
                            prep_instructions: notes.to_string(),
                            for_meal_type: *meal_type,
                            variant,
                            is_custom_note: true,
                            unique_key: format!("custom:{date}:{meal_type}:{variant}"),
                        },
                    );
                }

                for item in &slot.items {
                    let Some(recipe) = recipes.get(item) else {
                        continue;
                    };
                    if !recipe.requires_prep {
                        continue;
                    }
                    push_item(
                        &mut schedule,
                        prep_date,
                        *date,
                        PrepItem {
                            recipe_name: item.clone(),
                            prep_instructions: recipe
                                .prep_instructions
                                .clone()
                                .unwrap_or_else(|| DEFAULT_PREP_INSTRUCTIONS.to_string()),
                            for_meal_type: *meal_type,
                            variant,
                            is_custom_note: false,
                            unique_key: format!("recipe:{item}"),
                        },
                    );
                }
            }
        }
    }

    schedule
}

fn push_item(schedule: &mut PrepSchedule, prep_date: PrepDate, for_date: NaiveDate, item: PrepItem) {
    let bucket = schedule.entry(prep_date).or_insert_with(|| PrepDay {
        for_date,
        items: Vec::new(),
    });
    if bucket
        .items
        .iter()
        .any(|existing| existing.unique_key == item.unique_key)
    {
        return;
    }
    bucket.items.push(item);
}
