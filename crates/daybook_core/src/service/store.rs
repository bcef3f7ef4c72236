//! The store facade: sole entry point consumed by the presentation layer.
//!
//! # Responsibility
//! - Load and sanitize every persisted collection once at startup.
//! - Apply typed mutations and immediately write the affected collection
//!   back (no batching or coalescing; exactly one local writer).
//!
//! # Invariants
//! - "Today" is recomputed from the injected clock on every access.
//! - After load-time sanitization, operations trust their inputs; only
//!   numeric clamps are re-applied at write time.
//! - Runtime operations never propagate a storage fault.

use crate::clock::Clock;
use crate::model::entry::{DailyEntry, MealSlot, Mood};
use crate::model::habit::{Habit, NewHabit, NewReligiousHabit, ReligiousHabit};
use crate::model::log::{HabitLog, ReligiousHabitLog};
use crate::persist::PersistentStore;
use crate::repo::{DailyEntryRepository, HabitLogLedger, ReligiousHabitLedger};
use crate::sanitize;
use crate::service::calories::CalorieEstimator;
use chrono::SecondsFormat;
use log::{info, warn};
use std::collections::BTreeMap;

const KEY_USER_NAME: &str = "userName";
const KEY_HABITS: &str = "habits";
const KEY_DAILY_ENTRIES: &str = "dailyEntries";
const KEY_HABIT_LOGS: &str = "habitLogs";
const KEY_CURRENT_WEIGHT: &str = "currentWeight";
const KEY_TARGET_WEIGHT: &str = "targetWeight";
const KEY_RELIGIOUS_HABITS: &str = "religiousHabits";
const KEY_RELIGIOUS_HABIT_LOGS: &str = "religiousHabitLogs";

/// Catalog contents used when nothing has been persisted yet. The starter
/// catalogs themselves (icons, labels) belong to the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct CatalogSeeds {
    pub habits: Vec<Habit>,
    pub religious_habits: Vec<ReligiousHabit>,
}

/// Canonical in-memory state plus its persistence handle.
pub struct HabitStore<C: Clock> {
    persist: PersistentStore,
    clock: C,
    user_name: Option<String>,
    habits: Vec<Habit>,
    religious_habits: Vec<ReligiousHabit>,
    entries: DailyEntryRepository,
    habit_logs: HabitLogLedger,
    religious_logs: ReligiousHabitLedger,
    current_weight: Option<f64>,
    target_weight: Option<f64>,
    // Floor for time-derived ids, so ids stay strictly monotonic even when
    // two catalog entries are added within the same millisecond.
    last_id_ms: i64,
}

impl<C: Clock> HabitStore<C> {
    /// Loads every persisted collection through the sanitizer. Absent keys
    /// are the normal "not yet initialized" state; catalogs fall back to
    /// `seeds`.
    pub fn load(mut persist: PersistentStore, clock: C, seeds: CatalogSeeds) -> Self {
        let user_name = persist
            .get_value(KEY_USER_NAME)
            .and_then(|value| value.as_str().map(str::to_string));
        let habits = sanitize::sanitize_habits(persist.get_value(KEY_HABITS).as_ref(), &seeds.habits);
        let religious_habits = sanitize::sanitize_religious_habits(
            persist.get_value(KEY_RELIGIOUS_HABITS).as_ref(),
            &seeds.religious_habits,
        );
        let entries = DailyEntryRepository::new(sanitize::sanitize_daily_entries(
            persist.get_value(KEY_DAILY_ENTRIES).as_ref(),
        ));
        let habit_logs = HabitLogLedger::new(sanitize::sanitize_habit_logs(
            persist.get_value(KEY_HABIT_LOGS).as_ref(),
        ));
        let religious_logs = ReligiousHabitLedger::new(sanitize::sanitize_religious_habit_logs(
            persist.get_value(KEY_RELIGIOUS_HABIT_LOGS).as_ref(),
        ));
        let current_weight = persist
            .get_value(KEY_CURRENT_WEIGHT)
            .and_then(|value| value.as_f64());
        let target_weight = persist
            .get_value(KEY_TARGET_WEIGHT)
            .and_then(|value| value.as_f64());

        info!(
            "event=store_load module=store status=ok persistent={} habits={} religious_habits={} entries={}",
            persist.is_persistent(),
            habits.len(),
            religious_habits.len(),
            entries.all().len()
        );

        Self {
            persist,
            clock,
            user_name,
            habits,
            religious_habits,
            entries,
            habit_logs,
            religious_logs,
            current_weight,
            target_weight,
            last_id_ms: 0,
        }
    }

    // ----- today -----

    /// Today's entry, created with canonical defaults on first access. The
    /// date key is derived from the clock on every call.
    pub fn today_entry(&mut self) -> DailyEntry {
        let date = self.clock.today_key();
        self.entries.entry_or_default(&date).clone()
    }

    pub fn update_mood(&mut self, mood: Option<Mood>) {
        self.update_today(|entry| entry.mood = mood);
    }

    /// Sets today's water count; negative input clamps to zero.
    pub fn update_water(&mut self, count: i64) {
        let count = count.max(0) as u32;
        self.update_today(|entry| entry.water_count = count);
    }

    /// Sets the done flag of the task with `task_id` (1..=3). An unknown id
    /// leaves the entry unchanged.
    pub fn update_task_done(&mut self, task_id: u8, done: bool) {
        self.update_today(|entry| {
            if let Some(task) = entry.tasks.iter_mut().find(|task| task.id == task_id) {
                task.done = done;
            }
        });
    }

    pub fn update_task_text(&mut self, task_id: u8, text: impl Into<String>) {
        let text = text.into();
        self.update_today(|entry| {
            if let Some(task) = entry.tasks.iter_mut().find(|task| task.id == task_id) {
                task.text = text;
            }
        });
    }

    pub fn update_meal_text(&mut self, slot: MealSlot, text: impl Into<String>) {
        let text = text.into();
        self.update_today(|entry| *entry.meals.text_mut(slot) = text);
    }

    pub fn update_meal_image(&mut self, slot: MealSlot, image: Option<String>) {
        self.update_today(|entry| *entry.meals.image_mut(slot) = image);
    }

    pub fn set_meal_calories(&mut self, slot: MealSlot, calories: u32) {
        self.update_today(|entry| *entry.meals.calories_mut(slot) = Some(calories));
    }

    pub fn update_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        self.update_today(|entry| entry.notes = notes);
    }

    /// Replaces today's journal text. A `Some` image replaces the stored
    /// journal image; `None` keeps whatever is already there.
    pub fn update_journal(&mut self, text: impl Into<String>, image: Option<String>) {
        let text = text.into();
        self.update_today(|entry| {
            entry.journal = text;
            if image.is_some() {
                entry.journal_image = image;
            }
        });
    }

    /// Runs the estimator over today's stored photo for `slot` and records
    /// the estimate. A missing photo or a failed estimate leaves the calorie
    /// field unset; failures are logged, never surfaced.
    pub fn estimate_meal_calories(&mut self, slot: MealSlot, estimator: &dyn CalorieEstimator) {
        let date = self.clock.today_key();
        let Some(image) = self
            .entries
            .entry_or_default(&date)
            .meals
            .image(slot)
            .map(str::to_string)
        else {
            return;
        };

        match estimator.estimate(&image) {
            Ok(calories) => {
                info!("event=calorie_estimate module=store status=ok slot={slot:?} calories={calories}");
                self.set_meal_calories(slot, calories);
            }
            Err(err) => {
                warn!("event=calorie_estimate module=store status=error slot={slot:?} error={err}");
            }
        }
    }

    // ----- profile -----

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.persist.set_value(KEY_USER_NAME, &name);
        self.user_name = Some(name);
    }

    /// `None` removes the key instead of storing a null.
    pub fn set_current_weight(&mut self, weight: Option<f64>) {
        Self::write_weight(&mut self.persist, KEY_CURRENT_WEIGHT, weight);
        self.current_weight = weight;
    }

    pub fn set_target_weight(&mut self, weight: Option<f64>) {
        Self::write_weight(&mut self.persist, KEY_TARGET_WEIGHT, weight);
        self.target_weight = weight;
    }

    // ----- catalogs -----

    /// Appends a habit with a fresh time-derived id and creation timestamp,
    /// returning the id. Catalog entries are never edited or deleted.
    pub fn add_habit(&mut self, new: NewHabit) -> String {
        let id = self.next_id().to_string();
        let habit = Habit {
            id: id.clone(),
            name: new.name,
            icon: new.icon,
            goal: new.goal,
            kind: new.kind,
            weekly_goal: new.weekly_goal,
            accent_color: new.accent_color,
            created_at: self
                .clock
                .now()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.habits.push(habit);
        self.persist.set_value(KEY_HABITS, &self.habits);
        id
    }

    /// Appends a religious habit under the `r_` id namespace, returning the
    /// id.
    pub fn add_religious_habit(&mut self, new: NewReligiousHabit) -> String {
        let id = format!("r_{}", self.next_id());
        self.religious_habits.push(ReligiousHabit {
            id: id.clone(),
            name: new.name,
            icon: new.icon,
            has_counter: new.has_counter,
        });
        self.persist
            .set_value(KEY_RELIGIOUS_HABITS, &self.religious_habits);
        id
    }

    // ----- ledgers -----

    /// Records today's completion state for a habit. The habit's cadence is
    /// looked up from the catalog; an unknown id falls back to daily
    /// semantics.
    pub fn log_habit(&mut self, habit_id: &str, done: bool) {
        let kind = self
            .habits
            .iter()
            .find(|habit| habit.id == habit_id)
            .map(|habit| habit.kind)
            .unwrap_or_default();
        let date = self.clock.today_key();
        self.habit_logs.set_log(&date, kind, habit_id, done);
        self.persist.set_value(KEY_HABIT_LOGS, self.habit_logs.all());
    }

    pub fn habit_log_for_today(&self, habit_id: &str) -> Option<&HabitLog> {
        self.habit_logs.log_for(&self.clock.today_key(), habit_id)
    }

    /// Sets today's counter for a religious habit; negative input clamps to
    /// zero and a zero count removes the row.
    pub fn update_religious_habit_count(&mut self, habit_id: &str, count: i64) {
        let date = self.clock.today_key();
        self.religious_logs.update_count(&date, habit_id, count);
        self.persist
            .set_value(KEY_RELIGIOUS_HABIT_LOGS, self.religious_logs.all());
    }

    /// `None` means a count of zero, not an error.
    pub fn religious_habit_log_for_today(&self, habit_id: &str) -> Option<&ReligiousHabitLog> {
        self.religious_logs
            .log_for(&self.clock.today_key(), habit_id)
    }

    // ----- getters -----

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn religious_habits(&self) -> &[ReligiousHabit] {
        &self.religious_habits
    }

    pub fn daily_entries(&self) -> &BTreeMap<String, DailyEntry> {
        self.entries.all()
    }

    pub fn entry_for(&self, date: &str) -> Option<&DailyEntry> {
        self.entries.get(date)
    }

    pub fn habit_logs(&self) -> &BTreeMap<String, Vec<HabitLog>> {
        self.habit_logs.all()
    }

    pub fn religious_habit_logs(&self) -> &BTreeMap<String, Vec<ReligiousHabitLog>> {
        self.religious_logs.all()
    }

    pub fn current_weight(&self) -> Option<f64> {
        self.current_weight
    }

    pub fn target_weight(&self) -> Option<f64> {
        self.target_weight
    }

    /// Whether this session survived the startup storage probe.
    pub fn is_persistent(&self) -> bool {
        self.persist.is_persistent()
    }

    // ----- internals -----

    fn update_today(&mut self, mutate: impl FnOnce(&mut DailyEntry)) {
        let date = self.clock.today_key();
        mutate(self.entries.entry_or_default(&date));
        self.persist.set_value(KEY_DAILY_ENTRIES, self.entries.all());
    }

    fn write_weight(persist: &mut PersistentStore, key: &str, weight: Option<f64>) {
        match weight {
            Some(weight) => persist.set_value(key, &weight),
            None => persist.remove(key),
        }
    }

    fn next_id(&mut self) -> i64 {
        let now_ms = self.clock.now().timestamp_millis();
        self.last_id_ms = now_ms.max(self.last_id_ms + 1);
        self.last_id_ms
    }
}
