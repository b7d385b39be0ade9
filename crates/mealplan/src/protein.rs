//! Per-day protein totals for the adult plan.

use recipe::RecipeIndex;

use crate::types::{MealSlot, VariantPlan};

/// Protein grams for one slot: the manual override when set, otherwise the
/// sum of recipe protein over the slot's items. Items without a matching
/// recipe contribute nothing. Overrides never carry across meal types.
pub fn slot_protein(slot: &MealSlot, recipes: &RecipeIndex) -> f64 {
    if let Some(grams) = slot.protein {
        return grams;
    }
    slot.items
        .iter()
        .filter_map(|item| recipes.protein_for(item))
        .sum()
}

/// Day total in whole grams over a variant's meal slots.
pub fn day_protein(plan: &VariantPlan, recipes: &RecipeIndex) -> u32 {
    let total: f64 = plan
        .values()
        .map(|slot| slot_protein(slot, recipes))
        .sum();
    total.round() as u32
}
