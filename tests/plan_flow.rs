//! End-to-end flow against a file-backed store: import a pasted week,
//! derive its prep schedule, check items off, and verify that editing the
//! plan invalidates the right completions across process-style reloads.

use chrono::NaiveDate;
use mealplan::types::{DayPlan, MealSlot, MealType, Variant};
use mealplan::{derive_prep_schedule, parse_weekly_plan, PlanStore, PrepDate};
use recipe::{Recipe, RecipeIndex};
use storage::FileStore;
use temp_dir::TempDir;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

fn recipes() -> RecipeIndex {
    RecipeIndex::new([
        Recipe {
            requires_prep: true,
            prep_instructions: Some("Marinate overnight".to_string()),
            protein: Some(28.0),
            ..Recipe::named("Bulgogi")
        },
        Recipe {
            protein: Some(12.0),
            ..Recipe::named("Oatmeal")
        },
    ])
}

#[test]
fn test_import_prep_and_invalidation_flow() {
    let dir = TempDir::new().unwrap();

    // import a pasted week (Sunday March 1)
    {
        let store = PlanStore::new("fam", FileStore::new(dir.path()));
        let parsed = parse_weekly_plan("Monday\nBreakfast: Oatmeal\nAdult Dinner: Bulgogi");
        assert_eq!(store.import_week(date(1), &parsed).unwrap(), 1);
    }

    // a fresh store over the same directory sees the same document
    let store = PlanStore::new("fam", FileStore::new(dir.path()));
    let plan = store.week_plan().unwrap();
    assert_eq!(plan[&date(2)].adult[&MealType::Dinner].items, vec!["Bulgogi"]);

    // Bulgogi on Monday the 2nd means prep on Sunday the 1st
    let week: Vec<(NaiveDate, DayPlan)> = (1..=7)
        .map(|day| (date(day), plan.get(&date(day)).cloned().unwrap_or_default()))
        .collect();
    let schedule = derive_prep_schedule(&week, &recipes());
    let bucket = &schedule[&PrepDate::Day(date(1))];
    assert_eq!(bucket.for_date, date(2));
    assert_eq!(bucket.items[0].recipe_name, "Bulgogi");

    // check it off, then change Monday's dinner: the completion must go
    assert!(store.toggle_prep_item(date(1), "Bulgogi").unwrap());
    store
        .set_slot(
            date(2),
            Variant::Adult,
            MealType::Dinner,
            Some(MealSlot::from_items(["Soup"])),
        )
        .unwrap();
    assert!(!store.is_prep_completed(date(1), "Bulgogi").unwrap());
}

#[test]
fn test_members_have_independent_documents() {
    let dir = TempDir::new().unwrap();
    let ours = PlanStore::new("fam", FileStore::new(dir.path()));
    let theirs = PlanStore::new("neighbors", FileStore::new(dir.path()));

    ours.set_slot(
        date(2),
        Variant::Adult,
        MealType::Dinner,
        Some(MealSlot::from_items(["Tacos"])),
    )
    .unwrap();

    assert!(theirs.week_plan().unwrap().is_empty());
}
