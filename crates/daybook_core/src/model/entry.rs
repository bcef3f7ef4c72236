//! Daily entry record: mood, hydration, tasks, meals, notes, journal.
//!
//! # Responsibility
//! - Define the per-calendar-day record and its canonical default shape.
//!
//! # Invariants
//! - `tasks` holds exactly [`TASKS_PER_DAY`] entries with ids 1..=3.
//! - `water_count` and calorie estimates are unsigned.
//! - `date` matches the `YYYY-MM-DD` key the entry is stored under.

use serde::{Deserialize, Serialize};

/// Fixed number of task slots per day.
pub const TASKS_PER_DAY: usize = 3;

/// Mood scale, persisted as the emoji glyph the UI renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "😍")]
    Loved,
    #[serde(rename = "😊")]
    Happy,
    #[serde(rename = "😐")]
    Neutral,
    #[serde(rename = "😟")]
    Worried,
    #[serde(rename = "😭")]
    Sad,
    #[serde(rename = "😡")]
    Angry,
}

/// One of the three fixed daily task slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Canonical slot id, 1..=3. Never renumbered.
    pub id: u8,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

/// Meal slot selector used by per-slot update operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

/// Per-slot meal descriptions with optional photo and calorie estimate.
///
/// Image payloads are opaque strings (data URLs in practice); the calorie
/// fields receive the output of the external estimation service and stay
/// unset when estimation fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meals {
    #[serde(default)]
    pub breakfast: String,
    #[serde(default)]
    pub lunch: String,
    #[serde(default)]
    pub dinner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast_calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner_calories: Option<u32>,
}

impl Meals {
    pub fn text_mut(&mut self, slot: MealSlot) -> &mut String {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    pub fn image(&self, slot: MealSlot) -> Option<&str> {
        match slot {
            MealSlot::Breakfast => self.breakfast_image.as_deref(),
            MealSlot::Lunch => self.lunch_image.as_deref(),
            MealSlot::Dinner => self.dinner_image.as_deref(),
        }
    }

    pub fn image_mut(&mut self, slot: MealSlot) -> &mut Option<String> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast_image,
            MealSlot::Lunch => &mut self.lunch_image,
            MealSlot::Dinner => &mut self.dinner_image,
        }
    }

    pub fn calories(&self, slot: MealSlot) -> Option<u32> {
        match slot {
            MealSlot::Breakfast => self.breakfast_calories,
            MealSlot::Lunch => self.lunch_calories,
            MealSlot::Dinner => self.dinner_calories,
        }
    }

    pub fn calories_mut(&mut self, slot: MealSlot) -> &mut Option<u32> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast_calories,
            MealSlot::Lunch => &mut self.lunch_calories,
            MealSlot::Dinner => &mut self.dinner_calories,
        }
    }
}

/// Everything recorded for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    /// ISO `YYYY-MM-DD` date, equal to the key this entry is stored under.
    pub date: String,
    /// Serialized as the emoji glyph, or `null` when not yet picked.
    pub mood: Option<Mood>,
    pub water_count: u32,
    pub meals: Meals,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub journal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_image: Option<String>,
}

impl DailyEntry {
    /// Canonical default entry for a date: no mood, zero water, empty meals,
    /// three blank tasks at ids 1..=3.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            mood: None,
            water_count: 0,
            meals: Meals::default(),
            tasks: (1..=TASKS_PER_DAY as u8)
                .map(|id| Task {
                    id,
                    text: String::new(),
                    done: false,
                })
                .collect(),
            notes: String::new(),
            journal: String::new(),
            journal_image: None,
        }
    }
}
