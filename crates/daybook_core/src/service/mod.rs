//! Use-case services over the repositories.
//!
//! # Responsibility
//! - Expose the single typed entry point the presentation layer consumes.
//! - Keep callers decoupled from persistence and sanitization details.

pub mod calories;
pub mod store;
