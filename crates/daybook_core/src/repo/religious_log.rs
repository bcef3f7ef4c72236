//! Religious-practice counter ledger.
//!
//! A row exists only while its count is positive; absence of a row is the
//! canonical zero state, not an error.

use crate::model::log::ReligiousHabitLog;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct ReligiousHabitLedger {
    logs: BTreeMap<String, Vec<ReligiousHabitLog>>,
}

impl ReligiousHabitLedger {
    pub fn new(logs: BTreeMap<String, Vec<ReligiousHabitLog>>) -> Self {
        Self { logs }
    }

    /// Sets the counter for (`date`, `habit_id`). Negative input clamps to
    /// zero; a zero count removes the row rather than storing it.
    pub fn update_count(&mut self, date: &str, habit_id: &str, count: i64) {
        let count = count.max(0) as u32;
        let rows = self.logs.entry(date.to_string()).or_default();
        let position = rows.iter().position(|row| row.habit_id == habit_id);

        match (position, count) {
            (Some(position), 0) => {
                rows.remove(position);
            }
            (Some(position), count) => rows[position].count = count,
            (None, 0) => {}
            (None, count) => rows.push(ReligiousHabitLog {
                date: date.to_string(),
                habit_id: habit_id.to_string(),
                count,
            }),
        }

        if rows.is_empty() {
            self.logs.remove(date);
        }
    }

    pub fn log_for(&self, date: &str, habit_id: &str) -> Option<&ReligiousHabitLog> {
        self.logs
            .get(date)?
            .iter()
            .find(|row| row.habit_id == habit_id)
    }

    pub fn all(&self) -> &BTreeMap<String, Vec<ReligiousHabitLog>> {
        &self.logs
    }
}
