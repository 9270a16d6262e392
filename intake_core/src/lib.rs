#![forbid(unsafe_code)]

//! Core domain model and business logic for the intake tracking system.
//!
//! This crate provides:
//! - Domain types (profile, daily logs, weight history)
//! - Health metrics derivation (BMR, calorie budget, BMI)
//! - Daily log aggregation
//! - Weekly rollups for charts
//! - Persistence (key-value store, CSV export, config)

pub mod types;
pub mod error;
pub mod dates;
pub mod units;
pub mod metrics;
pub mod targets;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod daylog;
pub mod store;
pub mod rollup;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use dates::age_in_years;
pub use metrics::{
    bmi_gauge_angle, calorie_budget, classify_bmi, compute_bmi, compute_bmr, profile_metrics,
    BmiCategory, DerivedMetrics,
};
pub use catalog::exercise_calories;
pub use store::{FileStore, KeyValueStore, LogStore, MemoryStore};
pub use rollup::{macro_percentages, week_window, WeekStart};
