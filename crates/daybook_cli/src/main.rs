//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `daybook_core` wiring without a
//!   UI runtime.
//! - Keep output deterministic for quick local sanity checks.

use daybook_core::{CatalogSeeds, HabitStore, PersistentStore, SystemClock};

fn main() {
    println!("daybook_core version={}", daybook_core::core_version());

    // Volatile store: the probe path and real persistence are exercised by
    // the host application, which owns the data directory.
    let mut store = HabitStore::load(
        PersistentStore::volatile(),
        SystemClock,
        CatalogSeeds::default(),
    );
    let entry = store.today_entry();
    println!(
        "today={} water={} tasks_done={}/{}",
        entry.date,
        entry.water_count,
        entry.tasks.iter().filter(|task| task.done).count(),
        entry.tasks.len()
    );
}
