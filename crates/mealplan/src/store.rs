//! Plan store adapter.
//!
//! The one component with side effects: it owns the persisted
//! [`PlanDocument`] for a member and is the only writer. Every public
//! operation reads the whole document, computes the new value, and writes
//! the whole document back before returning. With a single UI thread and
//! no concurrent writers, that is the entire consistency story.
//!
//! The correctness-critical rule lives here: prep for a meal on day *d*
//! happens on *d − 1*, so any change to a date's plan invalidates the prep
//! completions recorded for the evening before it. Stale completions for
//! meals that no longer exist are a bug, not cosmetics.

use chrono::{Days, NaiveDate};
use storage::WidgetStore;

use crate::error::PlanError;
use crate::import::ParsedDay;
use crate::normalize::normalize_document;
use crate::types::{DayPlan, MealSlot, MealType, PlanDocument, Variant, WeeklyPlan};

/// Widget key the plan document lives under.
const WIDGET_KEY: &str = "meal-plan";

pub struct PlanStore<S> {
    member_id: String,
    store: S,
}

impl<S: WidgetStore> PlanStore<S> {
    pub fn new(member_id: impl Into<String>, store: S) -> Self {
        PlanStore {
            member_id: member_id.into(),
            store,
        }
    }

    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    /// Read the current document. Absent or corrupt storage values come
    /// back as an empty document, never an error.
    pub fn load(&self) -> Result<PlanDocument, PlanError> {
        let value = self.store.get_widget_data(&self.member_id, WIDGET_KEY)?;
        Ok(normalize_document(value.as_ref()))
    }

    pub fn save(&self, document: &PlanDocument) -> Result<(), PlanError> {
        let value = serde_json::to_value(document)?;
        self.store
            .set_widget_data(&self.member_id, WIDGET_KEY, value)?;
        Ok(())
    }

    pub fn week_plan(&self) -> Result<WeeklyPlan, PlanError> {
        Ok(self.load()?.weekly_plan)
    }

    pub fn day_plan(&self, date: NaiveDate) -> Result<DayPlan, PlanError> {
        let mut document = self.load()?;
        Ok(document.weekly_plan.remove(&date).unwrap_or_default())
    }

    /// Assign or clear (`None`) one slot. Any change to a date's plan
    /// invalidates prep completions for the evening before it.
    pub fn set_slot(
        &self,
        date: NaiveDate,
        variant: Variant,
        meal_type: MealType,
        slot: Option<MealSlot>,
    ) -> Result<(), PlanError> {
        let mut document = self.load()?;
        apply_slot(&mut document, date, variant, meal_type, slot);
        invalidate_in(&mut document, date.pred_opt());
        self.save(&document)?;
        tracing::debug!(member_id = %self.member_id, %date, %variant, %meal_type, "slot updated");
        Ok(())
    }

    /// Flip a slot's completed flag and return the new state. A missing
    /// slot or one with no items is a no-op returning false.
    pub fn toggle_completion(
        &self,
        date: NaiveDate,
        variant: Variant,
        meal_type: MealType,
    ) -> Result<bool, PlanError> {
        let mut document = self.load()?;
        let slot = document
            .weekly_plan
            .get_mut(&date)
            .and_then(|day| day.variant_mut(variant).get_mut(&meal_type));
        let Some(slot) = slot else {
            return Ok(false);
        };
        if slot.items.is_empty() {
            return Ok(false);
        }
        slot.completed = !slot.completed;
        let completed = slot.completed;
        self.save(&document)?;
        Ok(completed)
    }

    /// Replace the target date's plan with a copy of the source date's,
    /// with completion flags stripped.
    pub fn copy_day(&self, source: NaiveDate, target: NaiveDate) -> Result<(), PlanError> {
        let mut document = self.load()?;
        copy_day_in(&mut document, source, target);
        self.save(&document)
    }

    /// Copy seven consecutive days in one document write, typically used
    /// to seed a week from the previous one.
    pub fn copy_week(
        &self,
        source_start: NaiveDate,
        target_start: NaiveDate,
    ) -> Result<(), PlanError> {
        let mut document = self.load()?;
        for offset in 0..7 {
            let (Some(source), Some(target)) = (
                source_start.checked_add_days(Days::new(offset)),
                target_start.checked_add_days(Days::new(offset)),
            ) else {
                continue;
            };
            copy_day_in(&mut document, source, target);
        }
        self.save(&document)?;
        tracing::info!(member_id = %self.member_id, %source_start, %target_start, "week copied");
        Ok(())
    }

    /// Remove every prep completion recorded for the given prep date.
    pub fn invalidate_prep_completions(&self, prep_date: NaiveDate) -> Result<(), PlanError> {
        let mut document = self.load()?;
        invalidate_in(&mut document, Some(prep_date));
        self.save(&document)
    }

    /// Check off (or un-check) a prep item; returns the new state.
    pub fn toggle_prep_item(
        &self,
        prep_date: NaiveDate,
        recipe_name: &str,
    ) -> Result<bool, PlanError> {
        let mut document = self.load()?;
        let key = completion_key(prep_date, recipe_name);
        let completed = if document.prep_completed.remove(&key).is_some() {
            false
        } else {
            document.prep_completed.insert(key, true);
            true
        };
        self.save(&document)?;
        Ok(completed)
    }

    pub fn is_prep_completed(
        &self,
        prep_date: NaiveDate,
        recipe_name: &str,
    ) -> Result<bool, PlanError> {
        let document = self.load()?;
        Ok(document
            .prep_completed
            .contains_key(&completion_key(prep_date, recipe_name)))
    }

    /// Apply a parsed paste onto the week starting at `week_start` (a
    /// Sunday; parsed day indices count from Sunday = 0). Entries merge
    /// into existing slots through the explicit-add path, so re-importing
    /// the same paste changes nothing. Returns the number of days that
    /// changed.
    pub fn import_week(
        &self,
        week_start: NaiveDate,
        days: &[ParsedDay],
    ) -> Result<usize, PlanError> {
        let mut document = self.load()?;
        let mut touched = 0;

        for parsed in days {
            let Some(date) = week_start.checked_add_days(Days::new(parsed.day_index as u64)) else {
                continue;
            };
            let day = document.weekly_plan.entry(date).or_default();
            let mut changed = false;
            for (meal_type, entries) in &parsed.meals {
                for entry in entries {
                    for variant in entry.variant.targets() {
                        let slot = day.variant_mut(*variant).entry(*meal_type).or_default();
                        for item in &entry.items {
                            if slot.add_item(item) {
                                changed = true;
                            }
                        }
                    }
                }
            }
            let day_empty = day.is_empty();
            if changed {
                touched += 1;
                invalidate_in(&mut document, date.pred_opt());
            } else if day_empty {
                // a parse with no entries must not leave an empty day behind
                document.weekly_plan.remove(&date);
            }
        }

        if touched > 0 {
            self.save(&document)?;
            tracing::info!(member_id = %self.member_id, days = touched, "weekly plan imported");
        }
        Ok(touched)
    }

    /// Flattened slot items across both variants for the given dates, in
    /// plan order, handed verbatim to the grocery feature, which owns its
    /// own ingredient parsing.
    pub fn shopping_items(&self, dates: &[NaiveDate]) -> Result<Vec<String>, PlanError> {
        let document = self.load()?;
        let mut items = Vec::new();
        for date in dates {
            let Some(day) = document.weekly_plan.get(date) else {
                continue;
            };
            for variant in Variant::ALL {
                for slot in day.variant(variant).values() {
                    items.extend(slot.items.iter().cloned());
                }
            }
        }
        Ok(items)
    }
}

fn apply_slot(
    document: &mut PlanDocument,
    date: NaiveDate,
    variant: Variant,
    meal_type: MealType,
    slot: Option<MealSlot>,
) {
    match slot {
        Some(mut slot) => {
            slot.enforce_completion_invariant();
            document
                .weekly_plan
                .entry(date)
                .or_default()
                .variant_mut(variant)
                .insert(meal_type, slot);
        }
        None => {
            if let Some(day) = document.weekly_plan.get_mut(&date) {
                day.variant_mut(variant).remove(&meal_type);
                if day.is_empty() {
                    document.weekly_plan.remove(&date);
                }
            }
        }
    }
}

fn copy_day_in(document: &mut PlanDocument, source: NaiveDate, target: NaiveDate) {
    let copied = document
        .weekly_plan
        .get(&source)
        .map(DayPlan::cleared_completion)
        .unwrap_or_default();
    if copied.is_empty() {
        document.weekly_plan.remove(&target);
    } else {
        document.weekly_plan.insert(target, copied);
    }
    invalidate_in(document, target.pred_opt());
}

/// Drop every completion whose prep date matches. Keys are
/// `"<prep-date>:<recipeName>"`.
fn invalidate_in(document: &mut PlanDocument, prep_date: Option<NaiveDate>) {
    let Some(prep_date) = prep_date else {
        return;
    };
    let prefix = format!("{prep_date}:");
    let before = document.prep_completed.len();
    document
        .prep_completed
        .retain(|key, _| !key.starts_with(&prefix));
    let removed = before - document.prep_completed.len();
    if removed > 0 {
        tracing::debug!(%prep_date, removed, "prep completions invalidated");
    }
}

fn completion_key(prep_date: NaiveDate, recipe_name: &str) -> String {
    format!("{prep_date}:{recipe_name}")
}
