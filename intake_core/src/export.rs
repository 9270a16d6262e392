//! CSV export of daily log summaries for external charting tools.

use crate::{DailyData, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    date: String,
    calories_eaten: u32,
    calories_burned: u32,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
    water_ml: u32,
    meal_items: usize,
    exercises: usize,
}

impl From<&DailyData> for CsvRow {
    fn from(day: &DailyData) -> Self {
        CsvRow {
            date: day.date.clone(),
            calories_eaten: day.calories.eaten,
            calories_burned: day.calories.burned,
            protein_g: day.macros.protein,
            carbs_g: day.macros.carbs,
            fat_g: day.macros.fat,
            water_ml: day.water,
            meal_items: day.meals.iter().map(|s| s.items.len()).sum(),
            exercises: day.exercises.len(),
        }
    }
}

/// Write one summary row per date to a CSV file, replacing any previous
/// export. Rows come out in date order because the map is date-keyed.
/// Returns the number of rows written.
pub fn export_daily_summaries(
    days: &BTreeMap<String, DailyData>,
    csv_path: &Path,
) -> Result<usize> {
    if days.is_empty() {
        tracing::info!("No daily logs to export");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(csv_path)?;
    let mut writer = csv::Writer::from_writer(file);

    for day in days.values() {
        writer.serialize(CsvRow::from(day))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} daily summaries to {:?}", days.len(), csv_path);
    Ok(days.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daylog;
    use crate::{MacroGrams, MealItem};

    fn day_with_meal(date: &str, calories: u32) -> DailyData {
        daylog::apply_meal_item(
            &DailyData::for_date(date),
            "Breakfast",
            MealItem {
                id: "i1".into(),
                title: "Oatmeal".into(),
                calories,
                image: String::new(),
                time: "08:12 AM".into(),
                macros: MacroGrams {
                    protein: 12.0,
                    carbs: 55.0,
                    fat: 6.0,
                },
            },
        )
    }

    #[test]
    fn test_export_writes_rows_in_date_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("summaries.csv");

        let mut days = BTreeMap::new();
        days.insert("2024-04-16".to_string(), day_with_meal("2024-04-16", 540));
        days.insert("2024-04-15".to_string(), day_with_meal("2024-04-15", 320));

        let count = export_daily_summaries(&days, &csv_path).unwrap();
        assert_eq!(count, 2);

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("date,calories_eaten"));
        assert!(lines[1].starts_with("2024-04-15,320"));
        assert!(lines[2].starts_with("2024-04-16,540"));
    }

    #[test]
    fn test_export_replaces_previous_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("summaries.csv");

        let mut days = BTreeMap::new();
        days.insert("2024-04-15".to_string(), day_with_meal("2024-04-15", 320));
        export_daily_summaries(&days, &csv_path).unwrap();
        export_daily_summaries(&days, &csv_path).unwrap();

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(contents.lines().count(), 2); // header + one row, not duplicated
    }

    #[test]
    fn test_export_empty_map() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("summaries.csv");

        let count = export_daily_summaries(&BTreeMap::new(), &csv_path).unwrap();
        assert_eq!(count, 0);
        assert!(!csv_path.exists());
    }
}
