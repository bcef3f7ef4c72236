//! Habit catalog records.
//!
//! # Responsibility
//! - Define the append-only habit and religious-habit catalog entries.
//!
//! # Invariants
//! - `id` is unique within its catalog and never reused.
//! - Religious habit ids live in their own `r_`-prefixed namespace.
//! - Catalogs are append-only: no update or delete operation exists.

use serde::{Deserialize, Serialize};

/// Completion cadence of a habit. Drives ledger bookkeeping semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    /// Checked off independently each day; unchecking is recorded as
    /// `done = false`.
    Daily,
    /// Tracked by presence: a log row exists only for days the habit was
    /// performed.
    Weekly,
    /// User-defined cadence; bookkeeping follows daily semantics.
    Custom,
}

impl HabitKind {
    /// Tolerant parse used at the load boundary; unknown strings fall back
    /// to daily rather than dropping the whole habit.
    pub fn parse_lossy(value: &str) -> Self {
        match value {
            "weekly" => Self::Weekly,
            "custom" => Self::Custom,
            _ => Self::Daily,
        }
    }
}

impl Default for HabitKind {
    fn default() -> Self {
        Self::Daily
    }
}

/// A user-defined recurring activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Free-text goal shown alongside the habit, e.g. "8 glasses".
    pub goal: String,
    #[serde(rename = "type")]
    pub kind: HabitKind,
    /// Reserved: persisted and round-tripped but not enforced anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_goal: Option<u32>,
    pub accent_color: String,
    /// RFC3339 creation timestamp.
    pub created_at: String,
}

/// Caller-supplied fields for a new habit; id and timestamp are assigned by
/// the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub icon: String,
    pub goal: String,
    pub kind: HabitKind,
    pub weekly_goal: Option<u32>,
    pub accent_color: String,
}

/// A religious practice, optionally tracked with a counter instead of a
/// boolean completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReligiousHabit {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub has_counter: bool,
}

/// Caller-supplied fields for a new religious habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReligiousHabit {
    pub name: String,
    pub icon: String,
    pub has_counter: bool,
}
