//! Core state store for the Daybook wellbeing tracker.
//!
//! Records, per calendar day, habit completions, mood, hydration, three
//! daily tasks, meals, notes/journal entries, and religious-practice
//! counters, persisted in an on-device key/value store. This crate is the
//! single source of truth for the store's invariants; the presentation
//! layer consumes it exclusively through [`HabitStore`].

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod persist;
pub mod repo;
pub mod sanitize;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock, DATE_KEY_FORMAT};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{DailyEntry, MealSlot, Meals, Mood, Task, TASKS_PER_DAY};
pub use model::habit::{Habit, HabitKind, NewHabit, NewReligiousHabit, ReligiousHabit};
pub use model::log::{HabitLog, ReligiousHabitLog};
pub use persist::PersistentStore;
pub use repo::{DailyEntryRepository, HabitLogLedger, ReligiousHabitLedger};
pub use service::calories::{CalorieEstimator, EstimatorError};
pub use service::store::{CatalogSeeds, HabitStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
