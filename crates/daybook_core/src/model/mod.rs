//! Domain model for the wellbeing store.
//!
//! # Responsibility
//! - Define the canonical serde shapes persisted in the key/value namespace.
//! - Keep wire field names (camelCase) stable across schema drift.
//!
//! # Invariants
//! - `DailyEntry.tasks` always holds exactly three tasks with ids 1..=3.
//! - Counter and hydration fields are unsigned; negative input never reaches
//!   the model.

pub mod entry;
pub mod habit;
pub mod log;
