use chrono::{TimeZone, Utc};
use daybook_core::{
    CalorieEstimator, CatalogSeeds, EstimatorError, FixedClock, Habit, HabitKind, HabitStore,
    MealSlot, Mood, NewHabit, NewReligiousHabit, PersistentStore,
};
use std::rc::Rc;

fn seed_habit(id: &str, kind: HabitKind) -> Habit {
    Habit {
        id: id.to_string(),
        name: format!("habit {id}"),
        icon: "star".to_string(),
        goal: String::new(),
        kind,
        weekly_goal: None,
        accent_color: "#ffffff".to_string(),
        created_at: "2024-01-01T00:00:00.000Z".to_string(),
    }
}

fn fixed_clock() -> Rc<FixedClock> {
    Rc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    ))
}

fn store_with(seeds: CatalogSeeds) -> HabitStore<Rc<FixedClock>> {
    HabitStore::load(PersistentStore::volatile(), fixed_clock(), seeds)
}

#[test]
fn today_entry_is_created_lazily_with_canonical_defaults() {
    let mut store = store_with(CatalogSeeds::default());
    assert!(store.daily_entries().is_empty());

    let entry = store.today_entry();
    assert_eq!(entry.date, "2024-01-01");
    assert_eq!(entry.water_count, 0);
    assert_eq!(entry.tasks.len(), 3);
    assert!(store.daily_entries().contains_key("2024-01-01"));
}

#[test]
fn today_is_recomputed_across_the_day_boundary() {
    let clock = fixed_clock();
    let mut store = HabitStore::load(
        PersistentStore::volatile(),
        Rc::clone(&clock),
        CatalogSeeds::default(),
    );

    store.update_water(3);
    clock.set(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 1).unwrap());
    store.update_water(1);

    assert_eq!(store.entry_for("2024-01-01").unwrap().water_count, 3);
    assert_eq!(store.entry_for("2024-01-02").unwrap().water_count, 1);
}

#[test]
fn negative_water_count_is_clamped_at_write_time() {
    let mut store = store_with(CatalogSeeds::default());
    store.update_water(-2);
    assert_eq!(store.today_entry().water_count, 0);
}

#[test]
fn task_updates_touch_only_the_addressed_slot() {
    let mut store = store_with(CatalogSeeds::default());
    store.update_task_text(2, "water the plants");
    store.update_task_done(2, true);
    // Unknown task id leaves the entry unchanged.
    store.update_task_done(9, true);

    let entry = store.today_entry();
    assert_eq!(entry.tasks[1].text, "water the plants");
    assert!(entry.tasks[1].done);
    assert!(!entry.tasks[0].done);
    assert!(!entry.tasks[2].done);
}

#[test]
fn journal_update_keeps_existing_image_when_none_is_passed() {
    let mut store = store_with(CatalogSeeds::default());
    store.update_journal("first draft", Some("data:image/png;base64,AAAA".to_string()));
    store.update_journal("second draft", None);

    let entry = store.today_entry();
    assert_eq!(entry.journal, "second draft");
    assert_eq!(
        entry.journal_image.as_deref(),
        Some("data:image/png;base64,AAAA")
    );
}

#[test]
fn mood_and_notes_and_meals_update_todays_record() {
    let mut store = store_with(CatalogSeeds::default());
    store.update_mood(Some(Mood::Neutral));
    store.update_notes("quiet day");
    store.update_meal_text(MealSlot::Lunch, "lentil soup");

    let entry = store.today_entry();
    assert_eq!(entry.mood, Some(Mood::Neutral));
    assert_eq!(entry.notes, "quiet day");
    assert_eq!(entry.meals.lunch, "lentil soup");
}

// ----- habit ledger -----

#[test]
fn weekly_habit_set_then_unset_leaves_no_ledger_key() {
    let mut store = store_with(CatalogSeeds {
        habits: vec![seed_habit("h1", HabitKind::Weekly)],
        religious_habits: Vec::new(),
    });

    store.log_habit("h1", true);
    let rows = store.habit_logs().get("2024-01-01").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, "2024-01-01");
    assert_eq!(rows[0].habit_id, "h1");
    assert!(rows[0].done);

    store.log_habit("h1", false);
    assert!(!store.habit_logs().contains_key("2024-01-01"));
}

#[test]
fn daily_habit_set_then_unset_keeps_a_single_false_row() {
    let mut store = store_with(CatalogSeeds {
        habits: vec![seed_habit("h1", HabitKind::Daily)],
        religious_habits: Vec::new(),
    });

    store.log_habit("h1", true);
    store.log_habit("h1", false);

    let rows = store.habit_logs().get("2024-01-01").unwrap();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].done);
}

#[test]
fn unknown_habit_id_falls_back_to_daily_semantics() {
    let mut store = store_with(CatalogSeeds::default());
    store.log_habit("ghost", false);

    let rows = store.habit_logs().get("2024-01-01").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].habit_id, "ghost");
}

#[test]
fn habit_log_for_today_matches_current_date_only() {
    let clock = fixed_clock();
    let mut store = HabitStore::load(
        PersistentStore::volatile(),
        Rc::clone(&clock),
        CatalogSeeds {
            habits: vec![seed_habit("h1", HabitKind::Daily)],
            religious_habits: Vec::new(),
        },
    );

    store.log_habit("h1", true);
    assert!(store.habit_log_for_today("h1").is_some());

    clock.set(Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap());
    assert!(store.habit_log_for_today("h1").is_none());
}

#[test]
fn ledger_lists_stay_non_empty_and_free_of_duplicates() {
    let mut store = store_with(CatalogSeeds {
        habits: vec![
            seed_habit("h1", HabitKind::Daily),
            seed_habit("h2", HabitKind::Weekly),
        ],
        religious_habits: Vec::new(),
    });

    for done in [true, false, true, true] {
        store.log_habit("h1", done);
        store.log_habit("h2", done);
    }

    for rows in store.habit_logs().values() {
        assert!(!rows.is_empty());
        for row in rows {
            assert_eq!(
                rows.iter()
                    .filter(|other| other.habit_id == row.habit_id)
                    .count(),
                1
            );
        }
    }
}

// ----- religious ledger -----

#[test]
fn counter_set_then_zero_leaves_no_row() {
    let mut store = store_with(CatalogSeeds::default());
    store.update_religious_habit_count("r1", 3);
    assert_eq!(store.religious_habit_log_for_today("r1").unwrap().count, 3);

    store.update_religious_habit_count("r1", 0);
    assert!(store.religious_habit_log_for_today("r1").is_none());
    assert!(!store.religious_habit_logs().contains_key("2024-01-01"));
}

#[test]
fn negative_counter_input_behaves_like_zero() {
    let mut store = store_with(CatalogSeeds::default());
    store.update_religious_habit_count("r1", 3);
    store.update_religious_habit_count("r1", -5);
    assert!(store.religious_habit_log_for_today("r1").is_none());
}

#[test]
fn absent_counter_row_is_a_defined_zero_state() {
    let store = store_with(CatalogSeeds::default());
    assert!(store.religious_habit_log_for_today("r1").is_none());
}

// ----- catalogs -----

#[test]
fn added_habits_get_monotonic_time_derived_ids_and_timestamps() {
    let mut store = store_with(CatalogSeeds::default());
    let first = store.add_habit(NewHabit {
        name: "Walk".to_string(),
        icon: "shoe".to_string(),
        goal: "30 minutes".to_string(),
        kind: HabitKind::Daily,
        weekly_goal: None,
        accent_color: "#00ff00".to_string(),
    });
    let second = store.add_habit(NewHabit {
        name: "Read".to_string(),
        icon: "book".to_string(),
        goal: "20 pages".to_string(),
        kind: HabitKind::Weekly,
        weekly_goal: Some(3),
        accent_color: "#0000ff".to_string(),
    });

    // The fixed clock never advances, so monotonicity comes from the store.
    assert!(second.parse::<i64>().unwrap() > first.parse::<i64>().unwrap());
    assert_eq!(store.habits().len(), 2);
    assert_eq!(store.habits()[0].created_at, "2024-01-01T12:00:00.000Z");
}

#[test]
fn religious_habit_ids_use_their_own_namespace() {
    let mut store = store_with(CatalogSeeds::default());
    let id = store.add_religious_habit(NewReligiousHabit {
        name: "Dhikr".to_string(),
        icon: "beads".to_string(),
        has_counter: true,
    });

    assert!(id.starts_with("r_"));
    assert_eq!(store.religious_habits().len(), 1);
    assert!(store.religious_habits()[0].has_counter);
}

#[test]
fn user_name_and_weights_round_trip_in_memory() {
    let mut store = store_with(CatalogSeeds::default());
    assert!(store.user_name().is_none());

    store.set_user_name("Amina");
    store.set_current_weight(Some(71.5));
    store.set_target_weight(Some(66.0));
    assert_eq!(store.user_name(), Some("Amina"));
    assert_eq!(store.current_weight(), Some(71.5));

    store.set_current_weight(None);
    assert_eq!(store.current_weight(), None);
    assert_eq!(store.target_weight(), Some(66.0));
}

// ----- calorie estimation seam -----

struct FixedEstimator(u32);

impl CalorieEstimator for FixedEstimator {
    fn estimate(&self, _image: &str) -> Result<u32, EstimatorError> {
        Ok(self.0)
    }
}

struct FailingEstimator;

impl CalorieEstimator for FailingEstimator {
    fn estimate(&self, _image: &str) -> Result<u32, EstimatorError> {
        Err(EstimatorError::new("vision service unreachable"))
    }
}

#[test]
fn successful_estimate_lands_in_the_matching_meal_slot() {
    let mut store = store_with(CatalogSeeds::default());
    store.update_meal_image(MealSlot::Dinner, Some("data:image/png;base64,AAAA".to_string()));
    store.estimate_meal_calories(MealSlot::Dinner, &FixedEstimator(560));

    let meals = store.today_entry().meals;
    assert_eq!(meals.dinner_calories, Some(560));
    assert_eq!(meals.breakfast_calories, None);
}

#[test]
fn failed_estimate_leaves_the_calorie_field_unset() {
    let mut store = store_with(CatalogSeeds::default());
    store.update_meal_image(MealSlot::Lunch, Some("data:image/png;base64,AAAA".to_string()));
    store.estimate_meal_calories(MealSlot::Lunch, &FailingEstimator);

    assert_eq!(store.today_entry().meals.lunch_calories, None);
}

#[test]
fn estimate_without_a_stored_photo_is_a_noop() {
    let mut store = store_with(CatalogSeeds::default());
    store.estimate_meal_calories(MealSlot::Breakfast, &FixedEstimator(300));
    assert_eq!(store.today_entry().meals.breakfast_calories, None);
}
