//! Free-text weekly plan import.
//!
//! Users paste whole weeks in whatever shape their notes app produced.
//! The grammar is line-oriented and best-effort: a weekday name opens a
//! day, `adult:`/`kids:` lines steer subsequent entries at one variant,
//! meal headers (with loose aliases like `bfast` or `supper`) open a meal
//! and may carry items inline, and any other line continues the current
//! meal. Nothing here errors: text that matches no rule is dropped, and
//! the worst outcome of a hopeless paste is an empty result the caller
//! reports as "nothing to import".
//!
//! The parser is an explicit state machine: one [`ParserState`] record
//! transitioned by a fixed sequence of line matchers, so each grammar rule
//! stays independently testable.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{MealType, Variant};

/// Who a parsed entry is for. Unlabeled entries default to both tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportVariant {
    Adult,
    Kids,
    #[default]
    Both,
}

impl ImportVariant {
    pub fn targets(self) -> &'static [Variant] {
        match self {
            ImportVariant::Adult => &[Variant::Adult],
            ImportVariant::Kids => &[Variant::Kids],
            ImportVariant::Both => &[Variant::Adult, Variant::Kids],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMeal {
    pub variant: ImportVariant,
    pub items: Vec<String>,
}

/// One imported day. `day_index` is 0–6 with Sunday = 0; the caller maps
/// indices onto concrete dates.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDay {
    pub day_index: u32,
    pub meals: BTreeMap<MealType, Vec<ParsedMeal>>,
}

impl ParsedDay {
    fn new(day_index: u32) -> Self {
        ParsedDay {
            day_index,
            meals: BTreeMap::new(),
        }
    }
}

static DAY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(sunday|monday|tuesday|wednesday|thursday|friday|saturday)\b").unwrap()
});

static VARIANT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(adult|kids?)\s*[:\-]").unwrap());

static MEAL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(adult|kids?)\s+)?(breakfast|bfast|morning|lunch|afternoon|dinner|supper|evening|snacks?)\b\s*[:\s\-]*(.*)$",
    )
    .unwrap()
});

/// Context carried between lines.
#[derive(Debug, Default)]
struct ParserState {
    current_variant: ImportVariant,
    current_meal: Option<MealType>,
}

/// Parse pasted weekly plan text. Never errors; unparseable input yields
/// an empty or partial result.
pub fn parse_weekly_plan(text: &str) -> Vec<ParsedDay> {
    let mut days: Vec<ParsedDay> = Vec::new();
    let mut state = ParserState::default();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        // week separator
        if line.len() >= 3 && line.chars().all(|c| c == '-') {
            continue;
        }

        if let Some(captures) = DAY_HEADER.captures(line) {
            days.push(ParsedDay::new(day_index(&captures[1])));
            state.current_meal = None;
            continue;
        }

        if let Some(captures) = VARIANT_LINE.captures(line) {
            state.current_variant = if captures[1].eq_ignore_ascii_case("adult") {
                ImportVariant::Adult
            } else {
                ImportVariant::Kids
            };
            continue;
        }

        // everything below needs an open day; preamble lines are dropped
        let Some(day) = days.last_mut() else {
            continue;
        };

        if let Some(captures) = MEAL_LINE.captures(line) {
            if let Some(meal_type) = MealType::parse_alias(&captures[2]) {
                state.current_meal = Some(meal_type);
                let variant = match captures.get(1) {
                    Some(prefix) if prefix.as_str().eq_ignore_ascii_case("adult") => {
                        ImportVariant::Adult
                    }
                    Some(_) => ImportVariant::Kids,
                    None => state.current_variant,
                };
                let items = split_items(captures[3].trim());
                if !items.is_empty() {
                    record(day, meal_type, variant, items);
                }
                continue;
            }
        }

        // continuation of the current meal
        if let Some(meal_type) = state.current_meal {
            let items = split_items(line);
            if !items.is_empty() {
                record(day, meal_type, state.current_variant, items);
            }
        }
    }

    days
}

fn day_index(name: &str) -> u32 {
    match name.to_lowercase().as_str() {
        "sunday" => 0,
        "monday" => 1,
        "tuesday" => 2,
        "wednesday" => 3,
        "thursday" => 4,
        "friday" => 5,
        _ => 6,
    }
}

fn split_items(text: &str) -> Vec<String> {
    text.split([',', ';'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn record(day: &mut ParsedDay, meal_type: MealType, variant: ImportVariant, items: Vec<String>) {
    let entries = day.meals.entry(meal_type).or_default();
    if let Some(existing) = entries.iter_mut().find(|entry| entry.variant == variant) {
        existing.items.extend(items);
    } else {
        entries.push(ParsedMeal { variant, items });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_header_resets_meal_context() {
        let days = parse_weekly_plan("Monday\nDinner: Tacos\nTuesday\nExtra line");
        assert_eq!(days.len(), 2);
        // "Extra line" has no meal context on Tuesday and is dropped
        assert!(days[1].meals.is_empty());
    }

    #[test]
    fn test_meal_aliases() {
        let days = parse_weekly_plan("Monday\nBfast: Eggs\nSupper: Stew\nSnack: Apples");
        let meals = &days[0].meals;
        assert!(meals.contains_key(&MealType::Breakfast));
        assert!(meals.contains_key(&MealType::Dinner));
        assert!(meals.contains_key(&MealType::Snacks));
    }

    #[test]
    fn test_word_prefix_does_not_open_a_meal() {
        // "lunchbox" must not match the lunch header rule
        let days = parse_weekly_plan("Monday\nlunchbox notes");
        assert!(days[0].meals.is_empty());
    }

    #[test]
    fn test_semicolon_and_comma_splitting() {
        let days = parse_weekly_plan("Monday\nDinner: Rice; Beans, Salsa");
        let entries = &days[0].meals[&MealType::Dinner];
        assert_eq!(entries[0].items, vec!["Rice", "Beans", "Salsa"]);
    }

    #[test]
    fn test_week_separator_ignored() {
        let days = parse_weekly_plan("Monday\nDinner: Tacos\n---\nTuesday\nDinner: Soup");
        assert_eq!(days.len(), 2);
    }
}
