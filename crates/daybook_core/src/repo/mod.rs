//! Date-keyed repositories over the sanitized in-memory collections.
//!
//! # Responsibility
//! - Hold the canonical collections between load and write-back.
//! - Apply the per-record-type mutation semantics (daily-vs-weekly habit
//!   bookkeeping, counter rows).
//!
//! # Invariants
//! - Inputs are trusted: all shape validation happened in `sanitize`.
//! - A ledger never keeps an empty list under a date key.

pub mod entry_repo;
pub mod habit_log;
pub mod religious_log;

pub use entry_repo::DailyEntryRepository;
pub use habit_log::HabitLogLedger;
pub use religious_log::ReligiousHabitLedger;
