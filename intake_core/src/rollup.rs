//! Week-windowed chart series: macro percentage bars and weight trend.

use crate::{DailyData, MacroGrams, WeightEntry};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Which day a chart week begins on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

/// The 7 ordered dates of the week containing `reference`.
pub fn week_window(reference: NaiveDate, start: WeekStart) -> [NaiveDate; 7] {
    let offset = match start {
        WeekStart::Monday => reference.weekday().num_days_from_monday(),
        WeekStart::Sunday => reference.weekday().num_days_from_sunday(),
    };
    let first = reference - Duration::days(offset as i64);
    std::array::from_fn(|i| first + Duration::days(i as i64))
}

/// Rounded percentage share of each macro in the day's total grams
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MacroPercentages {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// Fixed split emitted for days with no data so charts render a full week
pub const NEUTRAL_SPLIT: MacroPercentages = MacroPercentages {
    protein: 33,
    carbs: 33,
    fat: 34,
};

/// Percentage shares of a day's macros. All zero when the total is zero;
/// never a NaN or a division fault.
pub fn macro_percentages(macros: &MacroGrams) -> MacroPercentages {
    let total = macros.total();
    if total <= 0.0 {
        return MacroPercentages {
            protein: 0,
            carbs: 0,
            fat: 0,
        };
    }
    let pct = |value: f64| (100.0 * value / total).round() as u32;
    MacroPercentages {
        protein: pct(macros.protein),
        carbs: pct(macros.carbs),
        fat: pct(macros.fat),
    }
}

/// One bar of the weekly nutrition chart
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MacroSeriesPoint {
    pub date: NaiveDate,
    pub percentages: MacroPercentages,
}

/// Macro percentage bars for a set of dates. A date whose log is missing
/// or has zero eaten calories gets the neutral 33/33/34 placeholder.
pub fn weekly_macro_series<F>(dates: &[NaiveDate], mut lookup: F) -> Vec<MacroSeriesPoint>
where
    F: FnMut(NaiveDate) -> Option<DailyData>,
{
    dates
        .iter()
        .map(|&date| {
            let percentages = match lookup(date) {
                Some(day) if day.calories.eaten > 0 => macro_percentages(&day.macros),
                _ => NEUTRAL_SPLIT,
            };
            MacroSeriesPoint { date, percentages }
        })
        .collect()
}

/// Weight entries falling inside the week containing `reference`, sorted
/// ascending by date. Empty when no entry matches; the caller renders a
/// "no data" state.
pub fn weekly_weight_series(
    entries: &[WeightEntry],
    reference: NaiveDate,
    start: WeekStart,
) -> Vec<WeightEntry> {
    let window = week_window(reference, start);
    let (first, last) = (window[0], window[6]);

    let mut in_week: Vec<WeightEntry> = entries
        .iter()
        .filter(|entry| match NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d") {
            Ok(date) => date >= first && date <= last,
            Err(_) => {
                tracing::warn!("Skipping weight entry with bad date {:?}", entry.date);
                false
            }
        })
        .cloned()
        .collect();

    // ISO date strings sort chronologically
    in_week.sort_by(|a, b| a.date.cmp(&b.date));
    in_week
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daylog;
    use crate::{MacroGrams, MealItem};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_week_window_monday_start() {
        // 2024-04-17 is a Wednesday
        let window = week_window(d(2024, 4, 17), WeekStart::Monday);
        assert_eq!(window[0], d(2024, 4, 15));
        assert_eq!(window[6], d(2024, 4, 21));
    }

    #[test]
    fn test_week_window_sunday_start() {
        let window = week_window(d(2024, 4, 17), WeekStart::Sunday);
        assert_eq!(window[0], d(2024, 4, 14));
        assert_eq!(window[6], d(2024, 4, 20));
    }

    #[test]
    fn test_week_window_reference_on_week_start() {
        let window = week_window(d(2024, 4, 15), WeekStart::Monday);
        assert_eq!(window[0], d(2024, 4, 15));
    }

    #[test]
    fn test_macro_percentages() {
        let pct = macro_percentages(&MacroGrams {
            protein: 30.0,
            carbs: 50.0,
            fat: 20.0,
        });
        assert_eq!(pct.protein, 30);
        assert_eq!(pct.carbs, 50);
        assert_eq!(pct.fat, 20);
    }

    #[test]
    fn test_macro_percentages_all_zero() {
        let pct = macro_percentages(&MacroGrams::default());
        assert_eq!(
            pct,
            MacroPercentages {
                protein: 0,
                carbs: 0,
                fat: 0
            }
        );
    }

    #[test]
    fn test_weekly_series_sparse_week() {
        let wednesday = d(2024, 4, 17);
        let window = week_window(wednesday, WeekStart::Monday);

        let mut day = DailyData::for_date("2024-04-17");
        day = daylog::apply_meal_item(
            &day,
            "Lunch",
            MealItem {
                id: "i1".into(),
                title: "Sandwich".into(),
                calories: 540,
                image: String::new(),
                time: "12:30 PM".into(),
                macros: MacroGrams {
                    protein: 25.0,
                    carbs: 50.0,
                    fat: 25.0,
                },
            },
        );

        let series = weekly_macro_series(&window, |date| {
            (date == wednesday).then(|| day.clone())
        });

        assert_eq!(series.len(), 7);
        for point in &series {
            if point.date == wednesday {
                assert_eq!(point.percentages.protein, 25);
                assert_eq!(point.percentages.carbs, 50);
            } else {
                assert_eq!(point.percentages, NEUTRAL_SPLIT);
            }
        }
    }

    #[test]
    fn test_weekly_series_zero_eaten_gets_placeholder() {
        // A log exists but nothing was eaten (only water) -> placeholder
        let wednesday = d(2024, 4, 17);
        let day = daylog::apply_water_update(&DailyData::for_date("2024-04-17"), 500, 2000);

        let series = weekly_macro_series(&[wednesday], |_| Some(day.clone()));
        assert_eq!(series[0].percentages, NEUTRAL_SPLIT);
    }

    #[test]
    fn test_weight_series_filters_and_sorts() {
        let entries = vec![
            WeightEntry {
                date: "2024-04-20".into(),
                weight: 73.2,
            },
            WeightEntry {
                date: "2024-04-08".into(), // previous week
                weight: 74.8,
            },
            WeightEntry {
                date: "2024-04-16".into(),
                weight: 73.9,
            },
        ];

        let series = weekly_weight_series(&entries, d(2024, 4, 17), WeekStart::Monday);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "2024-04-16");
        assert_eq!(series[1].date, "2024-04-20");
    }

    #[test]
    fn test_weight_series_empty_week() {
        let entries = vec![WeightEntry {
            date: "2023-01-01".into(),
            weight: 80.0,
        }];
        let series = weekly_weight_series(&entries, d(2024, 4, 17), WeekStart::Monday);
        assert!(series.is_empty());
    }
}
