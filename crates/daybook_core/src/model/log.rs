//! Ledger rows for habit completions and religious-practice counters.
//!
//! # Invariants
//! - `date` matches the ledger key the row is filed under.
//! - A `ReligiousHabitLog` with `count == 0` is never persisted; absence of
//!   a row is the canonical zero state.

use serde::{Deserialize, Serialize};

/// One habit completion row. For weekly habits only `done = true` rows
/// exist; for daily/custom habits the row toggles in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitLog {
    pub date: String,
    pub habit_id: String,
    pub done: bool,
}

/// One counter row for a counter-based religious habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReligiousHabitLog {
    pub date: String,
    pub habit_id: String,
    pub count: u32,
}
