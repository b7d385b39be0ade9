use std::io::Read;

use chrono::{Datelike, Days, Local, NaiveDate};
use mealplan::{day_protein, derive_prep_schedule, parse_weekly_plan, DayPlan, PlanStore, Variant};
use recipe::{JsonFileRecipeSource, RecipeIndex, RecipeSource};
use storage::FileStore;

use crate::config::Config;
use crate::error::AppError;

/// Everything the plan subcommands need: the member's plan store and the
/// household recipe catalog.
pub struct PlanContext {
    store: PlanStore<FileStore>,
    recipes: RecipeIndex,
}

impl PlanContext {
    pub fn new(config: &Config, member_id: &str) -> Result<Self, AppError> {
        let store = PlanStore::new(member_id, FileStore::new(&config.data.dir));
        let source = JsonFileRecipeSource::new(&config.recipes.catalog);
        let recipes = RecipeIndex::new(source.recipes_for_meal_plan(member_id)?);
        Ok(PlanContext { store, recipes })
    }
}

pub fn today(ctx: &PlanContext, date: Option<String>) -> Result<(), AppError> {
    let date = match date {
        Some(raw) => parse_date(&raw)?,
        None => Local::now().date_naive(),
    };
    let plan = ctx.store.day_plan(date)?;
    if plan.is_empty() {
        println!("{date}: nothing planned");
        return Ok(());
    }
    print_day(ctx, date, &plan);
    Ok(())
}

pub fn week(ctx: &PlanContext, start: Option<String>) -> Result<(), AppError> {
    let start = week_start(start)?;
    let plan = ctx.store.week_plan()?;
    for date in week_dates(start) {
        match plan.get(&date) {
            Some(day) if !day.is_empty() => print_day(ctx, date, day),
            _ => println!("{date} ({}): nothing planned", date.weekday()),
        }
    }
    Ok(())
}

pub fn prep(ctx: &PlanContext, start: Option<String>) -> Result<(), AppError> {
    let start = week_start(start)?;
    let plan = ctx.store.week_plan()?;
    let week: Vec<(NaiveDate, DayPlan)> = week_dates(start)
        .map(|date| (date, plan.get(&date).cloned().unwrap_or_default()))
        .collect();

    let schedule = derive_prep_schedule(&week, &ctx.recipes);
    if schedule.is_empty() {
        println!("No advance prep needed this week.");
        return Ok(());
    }

    for (prep_date, bucket) in &schedule {
        println!("{prep_date} (for {}):", bucket.for_date);
        for item in &bucket.items {
            let completed = prep_date
                .resolve(start)
                .map(|date| ctx.store.is_prep_completed(date, &item.recipe_name))
                .transpose()?
                .unwrap_or(false);
            let mark = if completed { "x" } else { " " };
            println!(
                "  [{mark}] {} ({} {}) - {}",
                item.recipe_name,
                item.variant,
                item.for_meal_type,
                item.prep_instructions
            );
        }
    }
    Ok(())
}

pub fn shopping(ctx: &PlanContext, start: Option<String>) -> Result<(), AppError> {
    let start = week_start(start)?;
    let dates: Vec<NaiveDate> = week_dates(start).collect();
    let items = ctx.store.shopping_items(&dates)?;
    if items.is_empty() {
        println!("Nothing planned, nothing to buy.");
        return Ok(());
    }
    for item in items {
        println!("{item}");
    }
    Ok(())
}

pub fn import(ctx: &PlanContext, start: Option<String>, input: &str) -> Result<(), AppError> {
    let start = week_start(start)?;
    let text = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(input)?
    };

    let parsed = parse_weekly_plan(&text);
    if parsed.is_empty() {
        println!("Nothing to import.");
        return Ok(());
    }
    let touched = ctx.store.import_week(start, &parsed)?;
    println!("Imported {touched} day(s) into the week of {start}.");
    Ok(())
}

pub fn toggle_prep(ctx: &PlanContext, date: &str, name: &str) -> Result<(), AppError> {
    let date = parse_date(date)?;
    let completed = ctx.store.toggle_prep_item(date, name)?;
    if completed {
        println!("Checked off '{name}' for {date}.");
    } else {
        println!("Unchecked '{name}' for {date}.");
    }
    Ok(())
}

fn print_day(ctx: &PlanContext, date: NaiveDate, day: &DayPlan) {
    println!("{date} ({}):", date.weekday());
    for variant in Variant::ALL {
        let plan = day.variant(variant);
        if plan.is_empty() {
            continue;
        }
        println!("  {variant}:");
        for (meal_type, slot) in plan {
            let mark = if slot.completed { " [done]" } else { "" };
            let notes = slot
                .prep_notes
                .as_deref()
                .map(|notes| format!(" (prep: {notes})"))
                .unwrap_or_default();
            println!("    {meal_type}: {}{mark}{notes}", slot.items.join(", "));
        }
    }
    let protein = day_protein(&day.adult, &ctx.recipes);
    if protein > 0 {
        println!("  protein (adult): {protein}g");
    }
}

fn week_dates(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..7).filter_map(move |offset| start.checked_add_days(Days::new(offset)))
}

/// Week start for a command: an explicit date, or the Sunday of the
/// current week.
fn week_start(start: Option<String>) -> Result<NaiveDate, AppError> {
    match start {
        Some(raw) => parse_date(&raw),
        None => {
            let today = Local::now().date_naive();
            let back = today.weekday().num_days_from_sunday();
            Ok(today
                .checked_sub_days(Days::new(back as u64))
                .unwrap_or(today))
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    Ok(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")?)
}
