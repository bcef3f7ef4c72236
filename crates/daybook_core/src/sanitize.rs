//! Record sanitization at the load boundary.
//!
//! # Responsibility
//! - Deep-merge possibly-malformed stored values against freshly-built
//!   canonical defaults, producing well-typed records.
//! - Concentrate every "is this field well-shaped" decision in one place so
//!   downstream components can trust their inputs.
//!
//! # Invariants
//! - Sanitization is idempotent on already-well-formed input.
//! - Output always satisfies the store invariants: three tasks at ids 1..=3,
//!   non-negative counts, no empty ledger lists, no duplicate habit ids per
//!   ledger date, no zero-count religious rows.
//! - Malformed data is repaired or dropped, never surfaced as an error.

use crate::model::entry::{DailyEntry, Meals, Mood, Task, TASKS_PER_DAY};
use crate::model::habit::{Habit, HabitKind, ReligiousHabit};
use crate::model::log::{HabitLog, ReligiousHabitLog};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date key regex is valid"));

/// Whether `key` has the `YYYY-MM-DD` shape every date-keyed collection
/// requires. Keys that drifted away from this shape are dropped at load.
pub fn is_date_key(key: &str) -> bool {
    DATE_KEY_RE.is_match(key)
}

/// Merges a stored daily entry against the canonical default for `date`.
///
/// A candidate that is not an object is discarded entirely. Present fields
/// override the default one level deep with typed extraction; a wrong-typed
/// field keeps the default. `meals` and `tasks` follow their own rules, see
/// [`sanitize_meals`] and [`sanitize_tasks`].
pub fn sanitize_daily_entry(date: &str, candidate: Option<&Value>) -> DailyEntry {
    let default = DailyEntry::new(date);
    let Some(object) = candidate.and_then(Value::as_object) else {
        return default;
    };

    DailyEntry {
        date: date.to_string(),
        mood: object.get("mood").and_then(parse_mood),
        water_count: count_or(object.get("waterCount"), 0),
        meals: sanitize_meals(object.get("meals")),
        tasks: sanitize_tasks(object.get("tasks")),
        notes: string_or(object.get("notes"), &default.notes),
        journal: string_or(object.get("journal"), &default.journal),
        journal_image: optional_string(object.get("journalImage")),
    }
}

/// Merges candidate meals field-by-field; a non-object candidate yields the
/// canonical empty meals.
pub fn sanitize_meals(candidate: Option<&Value>) -> Meals {
    let Some(object) = candidate.and_then(Value::as_object) else {
        return Meals::default();
    };

    Meals {
        breakfast: string_or(object.get("breakfast"), ""),
        lunch: string_or(object.get("lunch"), ""),
        dinner: string_or(object.get("dinner"), ""),
        breakfast_image: optional_string(object.get("breakfastImage")),
        lunch_image: optional_string(object.get("lunchImage")),
        dinner_image: optional_string(object.get("dinnerImage")),
        breakfast_calories: optional_count(object.get("breakfastCalories")),
        lunch_calories: optional_count(object.get("lunchCalories")),
        dinner_calories: optional_count(object.get("dinnerCalories")),
    }
}

/// Reconciles candidate tasks positionally against the 3-slot template.
///
/// For slot 0..2, an object at that index shallow-merges its text/done onto
/// the default task; anything else keeps the default. Ids are always the
/// canonical 1..=3; extra candidate tasks are dropped, never reordered.
pub fn sanitize_tasks(candidate: Option<&Value>) -> Vec<Task> {
    let items = candidate.and_then(Value::as_array);

    (1..=TASKS_PER_DAY as u8)
        .map(|id| {
            let slot = items
                .and_then(|items| items.get(id as usize - 1))
                .and_then(Value::as_object);
            match slot {
                Some(object) => Task {
                    id,
                    text: string_or(object.get("text"), ""),
                    done: bool_or(object.get("done"), false),
                },
                None => Task {
                    id,
                    text: String::new(),
                    done: false,
                },
            }
        })
        .collect()
}

/// Validates a stored habit catalog element-wise.
///
/// A non-array candidate is replaced by `default` wholesale. Elements that
/// are not objects or lack a non-empty id and name are dropped silently;
/// remaining fields are extracted tolerantly (an unknown `type` falls back
/// to daily).
pub fn sanitize_habits(candidate: Option<&Value>, default: &[Habit]) -> Vec<Habit> {
    let Some(items) = candidate.and_then(Value::as_array) else {
        return default.to_vec();
    };

    items
        .iter()
        .filter_map(|item| {
            let object = item.as_object()?;
            let id = required_string(object, "id")?;
            let name = required_string(object, "name")?;
            Some(Habit {
                id,
                name,
                icon: string_or(object.get("icon"), ""),
                goal: string_or(object.get("goal"), ""),
                kind: object
                    .get("type")
                    .and_then(Value::as_str)
                    .map(HabitKind::parse_lossy)
                    .unwrap_or_default(),
                weekly_goal: optional_count(object.get("weeklyGoal")),
                accent_color: string_or(object.get("accentColor"), ""),
                created_at: string_or(object.get("createdAt"), ""),
            })
        })
        .collect()
}

/// Validates a stored religious habit catalog element-wise; same dropping
/// rules as [`sanitize_habits`].
pub fn sanitize_religious_habits(
    candidate: Option<&Value>,
    default: &[ReligiousHabit],
) -> Vec<ReligiousHabit> {
    let Some(items) = candidate.and_then(Value::as_array) else {
        return default.to_vec();
    };

    items
        .iter()
        .filter_map(|item| {
            let object = item.as_object()?;
            Some(ReligiousHabit {
                id: required_string(object, "id")?,
                name: required_string(object, "name")?,
                icon: string_or(object.get("icon"), ""),
                has_counter: bool_or(object.get("hasCounter"), false),
            })
        })
        .collect()
}

/// Rebuilds the daily-entry map, dropping keys that are not date-shaped.
pub fn sanitize_daily_entries(candidate: Option<&Value>) -> BTreeMap<String, DailyEntry> {
    let Some(object) = candidate.and_then(Value::as_object) else {
        return BTreeMap::new();
    };

    object
        .iter()
        .filter(|(date, _)| is_date_key(date))
        .map(|(date, value)| (date.clone(), sanitize_daily_entry(date, Some(value))))
        .collect()
}

/// Rebuilds the habit ledger map.
///
/// Per date: a non-array value drops the key; rows missing `habitId` or
/// `done` are dropped; duplicate habit ids keep the first row; a missing
/// row date is healed to the map key; lists left empty disappear with
/// their key.
pub fn sanitize_habit_logs(candidate: Option<&Value>) -> BTreeMap<String, Vec<HabitLog>> {
    sanitize_ledger(candidate, |date, object| {
        Some(HabitLog {
            date: string_or(object.get("date"), date),
            habit_id: required_string(object, "habitId")?,
            done: object.get("done")?.as_bool()?,
        })
    })
}

/// Rebuilds the religious ledger map. Same dropping rules as
/// [`sanitize_habit_logs`], with `count` required; negative counts clamp to
/// zero and zero-count rows are dropped (absence is the canonical zero).
pub fn sanitize_religious_habit_logs(
    candidate: Option<&Value>,
) -> BTreeMap<String, Vec<ReligiousHabitLog>> {
    sanitize_ledger(candidate, |date, object| {
        let count = object.get("count")?.as_i64()?.max(0) as u32;
        if count == 0 {
            return None;
        }
        Some(ReligiousHabitLog {
            date: string_or(object.get("date"), date),
            habit_id: required_string(object, "habitId")?,
            count,
        })
    })
}

fn sanitize_ledger<T>(
    candidate: Option<&Value>,
    parse_row: impl Fn(&str, &Map<String, Value>) -> Option<T>,
) -> BTreeMap<String, Vec<T>>
where
    T: RowKey,
{
    let Some(object) = candidate.and_then(Value::as_object) else {
        return BTreeMap::new();
    };

    let mut ledger = BTreeMap::new();
    for (date, value) in object {
        if !is_date_key(date) {
            continue;
        }
        let Some(items) = value.as_array() else {
            continue;
        };

        let mut rows: Vec<T> = Vec::new();
        for item in items {
            let Some(row) = item.as_object().and_then(|object| parse_row(date, object)) else {
                continue;
            };
            // First row wins on duplicate habit ids.
            if rows.iter().any(|kept| kept.habit_id() == row.habit_id()) {
                continue;
            }
            rows.push(row);
        }

        if !rows.is_empty() {
            ledger.insert(date.clone(), rows);
        }
    }
    ledger
}

trait RowKey {
    fn habit_id(&self) -> &str;
}

impl RowKey for HabitLog {
    fn habit_id(&self) -> &str {
        &self.habit_id
    }
}

impl RowKey for ReligiousHabitLog {
    fn habit_id(&self) -> &str {
        &self.habit_id
    }
}

fn parse_mood(value: &Value) -> Option<Mood> {
    serde_json::from_value(value.clone()).ok()
}

fn string_or(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

fn optional_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn bool_or(value: Option<&Value>, default: bool) -> bool {
    value.and_then(Value::as_bool).unwrap_or(default)
}

fn count_or(value: Option<&Value>, default: u32) -> u32 {
    value
        .and_then(Value::as_i64)
        .map(|count| count.max(0) as u32)
        .unwrap_or(default)
}

fn optional_count(value: Option<&Value>) -> Option<u32> {
    value.and_then(Value::as_i64).map(|count| count.max(0) as u32)
}

fn required_string(object: &Map<String, Value>, field: &str) -> Option<String> {
    let value = object.get(field)?.as_str()?;
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}
