//! Daily log aggregation: folding meal, water, and exercise events into a
//! `DailyData` record.
//!
//! Every operation takes the current record by reference and returns a new
//! one (value semantics); the running totals are recomputed incrementally
//! so the aggregation invariants hold after any sequence of applications.

use crate::{DailyData, ExerciseEntry, MealItem};

/// Append a meal item to the named section and bump the day's totals.
///
/// The section title set is closed (Breakfast, Lunch, Snacks, Dinner); an
/// unmatched title is a no-op that returns the input unchanged.
pub fn apply_meal_item(current: &DailyData, section_title: &str, item: MealItem) -> DailyData {
    let mut next = current.clone();

    let Some(index) = next.meals.iter().position(|s| s.title == section_title) else {
        tracing::warn!("No meal section titled {section_title:?}; item {:?} dropped", item.title);
        return next;
    };

    next.calories.eaten += item.calories;
    next.macros.protein += item.macros.protein;
    next.macros.carbs += item.macros.carbs;
    next.macros.fat += item.macros.fat;

    let section = &mut next.meals[index];
    section.total_calories += item.calories;
    section.items.push(item);

    next
}

/// Replace the day's water total, clamped to the daily goal.
///
/// The caller computes the new total (prior amount plus the selected
/// increment); this clamp is the last line of defense.
pub fn apply_water_update(current: &DailyData, new_total_ml: u32, goal_ml: u32) -> DailyData {
    let mut next = current.clone();
    next.water = new_total_ml.min(goal_ml);
    next
}

/// Append an exercise entry and bump burned calories.
pub fn apply_exercise(current: &DailyData, entry: ExerciseEntry) -> DailyData {
    let mut next = current.clone();
    next.calories.burned += entry.calories;
    next.exercises.push(entry);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MacroGrams;

    fn item(title: &str, calories: u32, protein: f64, carbs: f64, fat: f64) -> MealItem {
        MealItem {
            id: format!("test-{title}"),
            title: title.into(),
            calories,
            image: String::new(),
            time: "08:12 AM".into(),
            macros: MacroGrams {
                protein,
                carbs,
                fat,
            },
        }
    }

    #[test]
    fn test_apply_meal_item_updates_totals() {
        let day = DailyData::for_date("2024-04-15");
        let day = apply_meal_item(&day, "Breakfast", item("Oatmeal", 320, 12.0, 55.0, 6.0));

        assert_eq!(day.calories.eaten, 320);
        assert_eq!(day.macros.protein, 12.0);
        assert_eq!(day.meals[0].total_calories, 320);
        assert_eq!(day.meals[0].items.len(), 1);
        assert!(day.totals_consistent());
    }

    #[test]
    fn test_invariant_holds_across_sequences() {
        let mut day = DailyData::for_date("2024-04-15");
        day = apply_meal_item(&day, "Breakfast", item("Oatmeal", 320, 12.0, 55.0, 6.0));
        day = apply_meal_item(&day, "Lunch", item("Sandwich", 540, 28.5, 48.0, 22.5));
        day = apply_meal_item(&day, "Snacks", item("Apple", 95, 0.5, 25.0, 0.3));
        day = apply_meal_item(&day, "Dinner", item("Stir fry", 610, 35.0, 40.0, 28.0));
        day = apply_meal_item(&day, "Lunch", item("Cookie", 210, 2.0, 30.0, 9.0));

        assert_eq!(day.calories.eaten, 320 + 540 + 95 + 610 + 210);
        let section_sum: u32 = day.meals.iter().map(|s| s.total_calories).sum();
        assert_eq!(section_sum, day.calories.eaten);
        assert!(day.totals_consistent());
    }

    #[test]
    fn test_unknown_section_is_noop() {
        let day = DailyData::for_date("2024-04-15");
        let after = apply_meal_item(&day, "Brunch", item("Mimosa", 150, 0.0, 14.0, 0.0));
        assert_eq!(after, day);
    }

    #[test]
    fn test_input_never_mutated() {
        let day = DailyData::for_date("2024-04-15");
        let _ = apply_meal_item(&day, "Breakfast", item("Toast", 140, 4.0, 26.0, 2.0));
        assert_eq!(day.calories.eaten, 0);
        assert!(day.meals[0].items.is_empty());
    }

    #[test]
    fn test_water_clamps_at_goal() {
        let day = DailyData::for_date("2024-04-15");
        let day = apply_water_update(&day, 5000, 2000);
        assert_eq!(day.water, 2000);
    }

    #[test]
    fn test_water_below_goal_passes_through() {
        let day = DailyData::for_date("2024-04-15");
        let day = apply_water_update(&day, 450, 2000);
        assert_eq!(day.water, 450);
    }

    #[test]
    fn test_apply_exercise() {
        let day = DailyData::for_date("2024-04-15");
        let day = apply_exercise(
            &day,
            ExerciseEntry {
                id: "e1".into(),
                name: "Hiking".into(),
                duration_minutes: 45,
                calories: 335,
                time: "06:30 PM".into(),
            },
        );
        let day = apply_exercise(
            &day,
            ExerciseEntry {
                id: "e2".into(),
                name: "Pilates".into(),
                duration_minutes: 30,
                calories: 120,
                time: "08:00 PM".into(),
            },
        );

        assert_eq!(day.calories.burned, 455);
        assert_eq!(day.exercises.len(), 2);
        assert!(day.totals_consistent());
    }
}
