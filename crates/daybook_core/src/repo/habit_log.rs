//! Habit completion ledger.
//!
//! Bookkeeping branches on the habit's cadence:
//! - Daily/custom habits toggle a row's `done` flag in place.
//! - Weekly habits are tracked by presence only: a row exists for each day
//!   the habit was performed, and no `done = false` row is ever stored.
//!   Weekly progress is then just the row count for the week.
//!
//! # Invariants
//! - At most one row per (date, habit id).
//! - A date whose list becomes empty is removed from the ledger.

use crate::model::habit::HabitKind;
use crate::model::log::HabitLog;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct HabitLogLedger {
    logs: BTreeMap<String, Vec<HabitLog>>,
}

impl HabitLogLedger {
    pub fn new(logs: BTreeMap<String, Vec<HabitLog>>) -> Self {
        Self { logs }
    }

    /// Records a completion state for (`date`, `habit_id`) under the
    /// semantics of the habit's `kind`.
    pub fn set_log(&mut self, date: &str, kind: HabitKind, habit_id: &str, done: bool) {
        let rows = self.logs.entry(date.to_string()).or_default();
        let position = rows.iter().position(|row| row.habit_id == habit_id);

        match kind {
            HabitKind::Weekly => {
                if done {
                    // Idempotent: an existing row already means "performed".
                    if position.is_none() {
                        rows.push(HabitLog {
                            date: date.to_string(),
                            habit_id: habit_id.to_string(),
                            done: true,
                        });
                    }
                } else if let Some(position) = position {
                    rows.remove(position);
                }
            }
            HabitKind::Daily | HabitKind::Custom => match position {
                Some(position) => rows[position].done = done,
                None => rows.push(HabitLog {
                    date: date.to_string(),
                    habit_id: habit_id.to_string(),
                    done,
                }),
            },
        }

        if rows.is_empty() {
            self.logs.remove(date);
        }
    }

    pub fn log_for(&self, date: &str, habit_id: &str) -> Option<&HabitLog> {
        self.logs
            .get(date)?
            .iter()
            .find(|row| row.habit_id == habit_id)
    }

    pub fn all(&self) -> &BTreeMap<String, Vec<HabitLog>> {
        &self.logs
    }
}
