pub mod error;
pub mod import;
pub mod normalize;
pub mod prep;
pub mod protein;
pub mod store;
pub mod types;

pub use error::PlanError;
pub use import::{parse_weekly_plan, ImportVariant, ParsedDay, ParsedMeal};
pub use normalize::{normalize_day, normalize_document, normalize_slot, normalize_week};
pub use prep::{derive_prep_schedule, PrepDate, PrepDay, PrepItem, PrepSchedule};
pub use protein::{day_protein, slot_protein};
pub use store::PlanStore;
pub use types::{DayPlan, MealSlot, MealType, PlanDocument, Variant, VariantPlan, WeeklyPlan};
