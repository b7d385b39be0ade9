use chrono::NaiveDate;
use mealplan::types::{DayPlan, MealSlot, MealType};
use mealplan::{derive_prep_schedule, PrepDate};
use recipe::{Recipe, RecipeIndex};

fn date(day: u32) -> NaiveDate {
    // March 2026: the 1st is a Sunday
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

fn empty_week() -> Vec<(NaiveDate, DayPlan)> {
    (1..=7).map(|day| (date(day), DayPlan::default())).collect()
}

fn recipes() -> RecipeIndex {
    RecipeIndex::new([
        Recipe {
            requires_prep: true,
            prep_instructions: Some("Marinate overnight".to_string()),
            ..Recipe::named("Bulgogi")
        },
        Recipe {
            requires_prep: true,
            ..Recipe::named("Lasagna")
        },
        Recipe::named("Toast"),
    ])
}

#[test]
fn test_empty_week_has_no_prep() {
    let schedule = derive_prep_schedule(&empty_week(), &recipes());
    assert!(schedule.is_empty());
}

#[test]
fn test_prep_lands_on_previous_day() {
    let mut week = empty_week();
    week[3]
        .1
        .adult
        .insert(MealType::Dinner, MealSlot::from_items(["Bulgogi"]));

    let schedule = derive_prep_schedule(&week, &recipes());
    assert_eq!(schedule.len(), 1);

    let bucket = &schedule[&PrepDate::Day(date(3))];
    assert_eq!(bucket.for_date, date(4));
    assert_eq!(bucket.items.len(), 1);
    assert_eq!(bucket.items[0].recipe_name, "Bulgogi");
    assert_eq!(bucket.items[0].prep_instructions, "Marinate overnight");
    assert!(!bucket.items[0].is_custom_note);
}

#[test]
fn test_first_day_preps_before_the_week() {
    let mut week = empty_week();
    week[0]
        .1
        .adult
        .insert(MealType::Lunch, MealSlot::from_items(["Bulgogi"]));

    let schedule = derive_prep_schedule(&week, &recipes());
    let bucket = &schedule[&PrepDate::BeforeWeek];
    assert_eq!(bucket.for_date, date(1));
    assert_eq!(bucket.items[0].recipe_name, "Bulgogi");
}

#[test]
fn test_note_and_flagged_recipe_coexist() {
    let mut week = empty_week();
    week[2].1.adult.insert(
        MealType::Dinner,
        MealSlot {
            prep_notes: Some("Soak the beans".to_string()),
            ..MealSlot::from_items(["Bulgogi", "Toast"])
        },
    );

    let schedule = derive_prep_schedule(&week, &recipes());
    let bucket = &schedule[&PrepDate::Day(date(2))];
    assert_eq!(bucket.items.len(), 2);

    let keys: Vec<&str> = bucket
        .items
        .iter()
        .map(|item| item.unique_key.as_str())
        .collect();
    assert!(keys.contains(&"custom:2026-03-03:dinner:adult"));
    assert!(keys.contains(&"recipe:Bulgogi"));

    let note = bucket.items.iter().find(|item| item.is_custom_note).unwrap();
    assert_eq!(note.recipe_name, "Bulgogi, Toast");
    assert_eq!(note.prep_instructions, "Soak the beans");
}

#[test]
fn test_same_recipe_in_both_variants_dedupes() {
    let mut week = empty_week();
    week[2]
        .1
        .adult
        .insert(MealType::Dinner, MealSlot::from_items(["Bulgogi"]));
    week[2]
        .1
        .kids
        .insert(MealType::Dinner, MealSlot::from_items(["Bulgogi"]));

    let schedule = derive_prep_schedule(&week, &recipes());
    let bucket = &schedule[&PrepDate::Day(date(2))];
    assert_eq!(bucket.items.len(), 1);
}

#[test]
fn test_note_label_falls_back_to_meal_type() {
    let mut week = empty_week();
    week[1].1.kids.insert(
        MealType::Snacks,
        MealSlot {
            prep_notes: Some("Cut fruit".to_string()),
            ..MealSlot::default()
        },
    );

    let schedule = derive_prep_schedule(&week, &recipes());
    let bucket = &schedule[&PrepDate::Day(date(1))];
    assert_eq!(bucket.items[0].recipe_name, "snacks");
    assert!(bucket.items[0].is_custom_note);
}

#[test]
fn test_missing_instructions_get_a_default() {
    let mut week = empty_week();
    week[5]
        .1
        .adult
        .insert(MealType::Dinner, MealSlot::from_items(["Lasagna"]));

    let schedule = derive_prep_schedule(&week, &recipes());
    let bucket = &schedule[&PrepDate::Day(date(5))];
    assert_eq!(bucket.items[0].prep_instructions, "Prepare ahead");
}

#[test]
fn test_unflagged_recipes_do_not_prep() {
    let mut week = empty_week();
    week[4]
        .1
        .adult
        .insert(MealType::Breakfast, MealSlot::from_items(["Toast"]));

    let schedule = derive_prep_schedule(&week, &recipes());
    assert!(schedule.is_empty());
}

#[test]
fn test_notes_emit_per_variant() {
    // distinct variant components in the key keep notes from colliding
    let mut week = empty_week();
    for (track, note) in [("adult", "Thaw roast"), ("kids", "Make sandwiches")] {
        let slot = MealSlot {
            prep_notes: Some(note.to_string()),
            ..MealSlot::from_items(["Picnic"])
        };
        if track == "adult" {
            week[3].1.adult.insert(MealType::Lunch, slot);
        } else {
            week[3].1.kids.insert(MealType::Lunch, slot);
        }
    }

    let schedule = derive_prep_schedule(&week, &recipes());
    let bucket = &schedule[&PrepDate::Day(date(3))];
    assert_eq!(bucket.items.len(), 2);
}
