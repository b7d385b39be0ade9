use mealplan::types::MealType;
use mealplan::{normalize_day, normalize_document, normalize_slot, normalize_week};
use serde_json::{json, Value};

#[test]
fn test_slot_totality() {
    // none of these shapes may panic
    let junk = [
        Value::Null,
        json!({}),
        json!([]),
        json!(42),
        json!(true),
        json!({"items": "not an array"}),
        json!({"items": [1, 2, {"nested": true}]}),
        json!({"protein": "lots"}),
    ];
    for value in &junk {
        let slot = normalize_slot(Some(value));
        assert!(!slot.completed);
    }
    normalize_slot(None);
}

#[test]
fn test_day_totality() {
    for value in [Value::Null, json!({}), json!([]), json!("dinner"), json!(7)] {
        let day = normalize_day(Some(&value));
        assert!(day.kids.is_empty());
    }
    assert!(normalize_day(None).is_empty());
}

#[test]
fn test_slot_idempotence() {
    let inputs = [
        json!("Oatmeal"),
        json!(["Oatmeal", "Toast"]),
        json!({"items": ["Stew"], "protein": 25, "completed": true, "prepNotes": "chop veg"}),
        json!({"items": []}),
    ];
    for input in &inputs {
        let once = normalize_slot(Some(input));
        let serialized = serde_json::to_value(&once).unwrap();
        let twice = normalize_slot(Some(&serialized));
        assert_eq!(once, twice, "normalizing {input} was not idempotent");
    }
}

#[test]
fn test_day_idempotence() {
    let inputs = [
        json!({"breakfast": "Oatmeal", "dinner": ["Stew", "Bread"]}),
        json!({"adult": {"lunch": {"items": ["Wrap"], "protein": 30}}, "kids": {"lunch": "Nuggets"}}),
        json!({}),
    ];
    for input in &inputs {
        let once = normalize_day(Some(input));
        let serialized = serde_json::to_value(&once).unwrap();
        let twice = normalize_day(Some(&serialized));
        assert_eq!(once, twice, "normalizing {input} was not idempotent");
    }
}

#[test]
fn test_legacy_flat_day_migrates_to_adult() {
    let day = normalize_day(Some(&json!({"breakfast": "Oatmeal"})));

    let slot = &day.adult[&MealType::Breakfast];
    assert_eq!(slot.items, vec!["Oatmeal"]);
    assert_eq!(slot.protein, None);
    assert!(!slot.completed);
    assert_eq!(slot.prep_notes, None);
    assert!(day.kids.is_empty());
}

#[test]
fn test_variant_keyed_day_passes_through() {
    let day = normalize_day(Some(&json!({
        "adult": {"dinner": {"items": ["Stew"], "completed": true}},
        "kids": {"dinner": ["Pasta"]}
    })));

    assert!(day.adult[&MealType::Dinner].completed);
    assert_eq!(day.kids[&MealType::Dinner].items, vec!["Pasta"]);
}

#[test]
fn test_variant_keyed_day_with_one_variant() {
    let day = normalize_day(Some(&json!({"kids": {"snacks": "Apple"}})));
    assert!(day.adult.is_empty());
    assert_eq!(day.kids[&MealType::Snacks].items, vec!["Apple"]);
}

#[test]
fn test_blank_prep_notes_dropped() {
    let slot = normalize_slot(Some(&json!({"items": ["Stew"], "prepNotes": "   "})));
    assert_eq!(slot.prep_notes, None);
}

#[test]
fn test_non_string_items_dropped() {
    let slot = normalize_slot(Some(&json!({"items": ["Stew", 4, null, "Bread"]})));
    assert_eq!(slot.items, vec!["Stew", "Bread"]);
}

#[test]
fn test_week_skips_non_date_keys() {
    let week = normalize_week(Some(&json!({
        "2026-03-02": {"breakfast": "Oatmeal"},
        "not-a-date": {"breakfast": "Ghost"},
    })));
    assert_eq!(week.len(), 1);
}

#[test]
fn test_document_from_nothing() {
    let document = normalize_document(None);
    assert!(document.weekly_plan.is_empty());
    assert!(document.prep_completed.is_empty());
}

#[test]
fn test_document_keeps_only_true_completions() {
    let document = normalize_document(Some(&json!({
        "weeklyPlan": {},
        "prepCompleted": {
            "2026-03-02:Bulgogi": true,
            "2026-03-02:Stew": false,
            "2026-03-03:Soup": "yes",
        }
    })));
    assert_eq!(document.prep_completed.len(), 1);
    assert!(document.prep_completed.contains_key("2026-03-02:Bulgogi"));
}
