//! Static exercise catalog with calorie burn rates.
//!
//! Rates are calories per 30 minutes of activity; durations scale
//! linearly. Lookups are by exact name — an unknown name is a miss that
//! yields zero calories, not an error.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// (name, calories per 30 minutes)
const STATIC_EXERCISES: [(&str, u32); 18] = [
    ("Running (6 mph)", 372),
    ("Walking (3.5 mph)", 149),
    ("Cycling (moderate, 12–13.9 mph)", 298),
    ("Jump rope", 372),
    ("Swimming (general)", 223),
    ("Hiking", 223),
    ("Dancing (aerobic)", 198),
    ("Weightlifting (moderate)", 112),
    ("Weightlifting (vigorous)", 223),
    ("Bodyweight exercises (pushups, squats, etc.)", 167),
    ("CrossFit (high intensity)", 223),
    ("Yoga (Hatha)", 112),
    ("Pilates", 120),
    ("Tai Chi", 149),
    ("Gardening", 167),
    ("Cleaning (vigorous)", 153),
    ("Playing with kids", 149),
    ("Walking the dog", 133),
];

/// Cached lookup table - built once and reused across all operations
static CATALOG: Lazy<HashMap<&'static str, u32>> =
    Lazy::new(|| STATIC_EXERCISES.iter().copied().collect());

/// Calories per 30 minutes for an exercise, if it is in the catalog.
pub fn calories_per_30_min(name: &str) -> Option<u32> {
    CATALOG.get(name).copied()
}

/// Catalog names in listing order.
pub fn exercise_names() -> impl Iterator<Item = &'static str> {
    STATIC_EXERCISES.iter().map(|(name, _)| *name)
}

/// Calories burned for `minutes` of the named exercise, rounded to the
/// nearest calorie. Unknown names burn zero (explicit miss).
pub fn exercise_calories(name: &str, minutes: u32) -> u32 {
    match calories_per_30_min(name) {
        Some(per_30) => (per_30 as f64 / 30.0 * minutes as f64).round() as u32,
        None => {
            tracing::warn!("Unknown exercise {name:?}, counting 0 calories");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_exercise_full_interval() {
        assert_eq!(exercise_calories("Running (6 mph)", 30), 372);
    }

    #[test]
    fn test_duration_scales_linearly() {
        assert_eq!(exercise_calories("Running (6 mph)", 15), 186);
        assert_eq!(exercise_calories("Running (6 mph)", 60), 744);
        // 372/30 * 10 = 124
        assert_eq!(exercise_calories("Running (6 mph)", 10), 124);
    }

    #[test]
    fn test_rounding() {
        // 149/30 * 7 = 34.766... -> 35
        assert_eq!(exercise_calories("Walking (3.5 mph)", 7), 35);
    }

    #[test]
    fn test_unknown_exercise_is_zero() {
        assert_eq!(exercise_calories("Underwater basket weaving", 30), 0);
        assert_eq!(calories_per_30_min("Underwater basket weaving"), None);
    }

    #[test]
    fn test_zero_minutes() {
        assert_eq!(exercise_calories("Hiking", 0), 0);
    }

    #[test]
    fn test_catalog_is_complete() {
        assert_eq!(exercise_names().count(), 18);
        assert_eq!(calories_per_30_min("Walking the dog"), Some(133));
    }
}
