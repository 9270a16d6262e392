//! Core domain types for the intake tracking system.
//!
//! This module defines the fundamental types used throughout the system:
//! - The onboarding profile and its enums (gender, activity level, goal)
//! - Daily logs (meals, macros, water, exercises)
//! - Weight history entries
//!
//! Serde attributes pin the legacy wire field names (`userBirthdate`,
//! `totalCalories`, ...) so records written by earlier versions of the
//! app deserialize unchanged.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Profile Enums
// ============================================================================

/// User gender as collected by the onboarding wizard.
///
/// The BMR formula only distinguishes "male" from everything else; unknown
/// wire values deserialize to `Female` so the non-male offset applies
/// explicitly rather than by accident.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn from_wire(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("male") {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Gender::from_wire(&s))
    }
}

/// Activity level multiplier tier
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityLevel {
    Inactive,
    Somewhat,
    Moderate,
    Very,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Inactive,
        ActivityLevel::Somewhat,
        ActivityLevel::Moderate,
        ActivityLevel::Very,
    ];

    /// Calorie budget multiplier applied to BMR
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Inactive => 1.2,
            ActivityLevel::Somewhat => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Very => 1.725,
        }
    }

    /// Display label, matching the onboarding screen wording
    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Inactive => "Inactive",
            ActivityLevel::Somewhat => "Somewhat Active",
            ActivityLevel::Moderate => "Moderate Active",
            ActivityLevel::Very => "Very Active",
        }
    }

    /// Parse a wire string. Unknown values yield `None`; callers fall back
    /// to the `Somewhat` multiplier when budgeting.
    pub fn from_wire(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        if lower.starts_with("inactive") {
            Some(ActivityLevel::Inactive)
        } else if lower.starts_with("somewhat") {
            Some(ActivityLevel::Somewhat)
        } else if lower.starts_with("moderate") {
            Some(ActivityLevel::Moderate)
        } else if lower.starts_with("very") {
            Some(ActivityLevel::Very)
        } else {
            None
        }
    }
}

/// Weight goal selected during onboarding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl Goal {
    pub fn label(self) -> &'static str {
        match self {
            Goal::Lose => "Lose Weight",
            Goal::Maintain => "Maintain Weight",
            Goal::Gain => "Gain Weight",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        if lower.starts_with("lose") {
            Some(Goal::Lose)
        } else if lower.starts_with("maintain") {
            Some(Goal::Maintain)
        } else if lower.starts_with("gain") {
            Some(Goal::Gain)
        } else {
            None
        }
    }
}

// ============================================================================
// Macro Types
// ============================================================================

/// Cumulative macronutrient grams for a day (or a single meal item)
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MacroGrams {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroGrams {
    pub fn total(&self) -> f64 {
        self.protein + self.carbs + self.fat
    }
}

/// Macro gram targets set at the "complete" onboarding step
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroTargets {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

// ============================================================================
// Profile
// ============================================================================

/// The flat onboarding profile, one record under the `experience` key.
///
/// Every field is optional because onboarding can be abandoned midway and
/// every screen reads whatever subset exists. Height and weight are kept as
/// the raw wire strings (`"5'11\" ft"`, `"74 kg"`); the `units` module
/// re-parses them defensively at every use.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(rename = "userGender", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    /// `DD-MonthName-YYYY`, e.g. `15-April-1990`
    #[serde(rename = "userBirthdate", skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,

    #[serde(rename = "userHeight", skip_serializing_if = "Option::is_none")]
    pub height_raw: Option<String>,

    #[serde(
        rename = "userWeight",
        deserialize_with = "de_opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight_raw: Option<String>,

    #[serde(
        rename = "userTargetWeight",
        deserialize_with = "de_opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_weight_raw: Option<String>,

    #[serde(
        rename = "userActivity",
        deserialize_with = "de_opt_activity",
        serialize_with = "ser_opt_activity",
        skip_serializing_if = "Option::is_none"
    )]
    pub activity: Option<ActivityLevel>,

    #[serde(
        rename = "userGoal",
        deserialize_with = "de_opt_goal",
        serialize_with = "ser_opt_goal",
        skip_serializing_if = "Option::is_none"
    )]
    pub goal: Option<Goal>,

    /// kcal/day; stored as a string on the wire by the original app
    #[serde(
        rename = "userCalorieTarget",
        deserialize_with = "de_opt_u32_lenient",
        serialize_with = "ser_opt_u32_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub calorie_target: Option<u32>,

    #[serde(rename = "userMacroTargets", skip_serializing_if = "Option::is_none")]
    pub macro_targets: Option<MacroTargets>,

    #[serde(rename = "userHasLaunched")]
    pub has_launched: bool,
}

// ============================================================================
// Daily Log Types
// ============================================================================

/// A single logged food item within a meal section
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MealItem {
    pub id: String,
    pub title: String,
    pub calories: u32,
    /// Image reference (URI); empty when no photo was captured
    #[serde(default)]
    pub image: String,
    /// Time-of-day display string, e.g. `08:12 AM`
    pub time: String,
    pub macros: MacroGrams,
}

impl MealItem {
    /// Fresh item with a generated id and no image reference
    pub fn new(
        title: impl Into<String>,
        calories: u32,
        macros: MacroGrams,
        time: impl Into<String>,
    ) -> Self {
        MealItem {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            calories,
            image: String::new(),
            time: time.into(),
            macros,
        }
    }
}

/// One of the four fixed meal sections
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MealSection {
    pub title: String,
    #[serde(rename = "totalCalories")]
    pub total_calories: u32,
    pub items: Vec<MealItem>,
}

/// Eaten/burned calorie tally for a day
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalorieTally {
    pub eaten: u32,
    pub burned: u32,
}

/// A logged exercise entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: u32,
    pub calories: u32,
    pub time: String,
}

impl ExerciseEntry {
    /// Fresh entry with a generated id
    pub fn new(
        name: impl Into<String>,
        duration_minutes: u32,
        calories: u32,
        time: impl Into<String>,
    ) -> Self {
        ExerciseEntry {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            duration_minutes,
            calories,
            time: time.into(),
        }
    }
}

/// The per-date aggregate record, keyed by ISO date under `@daily_data`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyData {
    /// ISO `YYYY-MM-DD`
    pub date: String,
    pub calories: CalorieTally,
    pub macros: MacroGrams,
    /// Cumulative milliliters, clamped to the daily goal on update
    #[serde(default)]
    pub water: u32,
    pub meals: Vec<MealSection>,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

impl DailyData {
    /// The closed set of meal section titles
    pub const MEAL_SECTIONS: [&'static str; 4] = ["Breakfast", "Lunch", "Snacks", "Dinner"];

    /// Zero-initialized record for a date with no existing log
    pub fn for_date(date: &str) -> Self {
        DailyData {
            date: date.to_string(),
            calories: CalorieTally::default(),
            macros: MacroGrams::default(),
            water: 0,
            meals: Self::MEAL_SECTIONS
                .iter()
                .map(|title| MealSection {
                    title: (*title).to_string(),
                    total_calories: 0,
                    items: Vec::new(),
                })
                .collect(),
            exercises: Vec::new(),
        }
    }

    /// Check the aggregation invariants: `calories.eaten` equals the sum of
    /// item calories, `macros` equal the sums of item macros, and
    /// `calories.burned` equals the sum of exercise calories.
    pub fn totals_consistent(&self) -> bool {
        const EPS: f64 = 1e-9;

        let item_calories: u32 = self
            .meals
            .iter()
            .flat_map(|s| s.items.iter())
            .map(|i| i.calories)
            .sum();
        let section_calories: u32 = self.meals.iter().map(|s| s.total_calories).sum();
        let burned: u32 = self.exercises.iter().map(|e| e.calories).sum();

        let mut macros = MacroGrams::default();
        for item in self.meals.iter().flat_map(|s| s.items.iter()) {
            macros.protein += item.macros.protein;
            macros.carbs += item.macros.carbs;
            macros.fat += item.macros.fat;
        }

        self.calories.eaten == item_calories
            && self.calories.eaten == section_calories
            && self.calories.burned == burned
            && (self.macros.protein - macros.protein).abs() < EPS
            && (self.macros.carbs - macros.carbs).abs() < EPS
            && (self.macros.fat - macros.fat).abs() < EPS
    }
}

/// One weight measurement; unique per date, last write wins
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    /// ISO `YYYY-MM-DD`
    pub date: String,
    /// Kilograms
    pub weight: f64,
}

// ============================================================================
// Wire helpers
// ============================================================================

/// Accept either a JSON string or a JSON number, normalized to a string.
fn de_opt_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Str(String),
        Num(f64),
    }

    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(|v| match v {
        StringOrNumber::Str(s) => s,
        StringOrNumber::Num(n) => {
            if n.fract() == 0.0 {
                format!("{}", n as i64)
            } else {
                format!("{}", n)
            }
        }
    }))
}

/// Accept a numeric string or number; anything unparseable becomes `None`.
fn de_opt_u32_lenient<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u32>, D::Error> {
    let raw = de_opt_string_or_number(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse::<u32>().ok()))
}

fn ser_opt_u32_as_string<S: Serializer>(
    value: &Option<u32>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_str(&v.to_string()),
        None => serializer.serialize_none(),
    }
}

fn de_opt_activity<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<ActivityLevel>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(ActivityLevel::from_wire))
}

fn ser_opt_activity<S: Serializer>(
    value: &Option<ActivityLevel>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_str(v.label()),
        None => serializer.serialize_none(),
    }
}

fn de_opt_goal<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<Goal>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Goal::from_wire))
}

fn ser_opt_goal<S: Serializer>(
    value: &Option<Goal>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_str(v.label()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_wire() {
        assert_eq!(Gender::from_wire("Male"), Gender::Male);
        assert_eq!(Gender::from_wire("male"), Gender::Male);
        assert_eq!(Gender::from_wire("Female"), Gender::Female);
        // Anything non-male falls through to the female offset branch
        assert_eq!(Gender::from_wire("other"), Gender::Female);
    }

    #[test]
    fn test_activity_from_wire() {
        assert_eq!(
            ActivityLevel::from_wire("Somewhat Active"),
            Some(ActivityLevel::Somewhat)
        );
        assert_eq!(
            ActivityLevel::from_wire("Moderate Active"),
            Some(ActivityLevel::Moderate)
        );
        assert_eq!(ActivityLevel::from_wire("couch potato"), None);
    }

    #[test]
    fn test_default_daily_data_sections() {
        let day = DailyData::for_date("2024-04-15");
        assert_eq!(day.meals.len(), 4);
        assert_eq!(day.meals[0].title, "Breakfast");
        assert_eq!(day.meals[3].title, "Dinner");
        assert_eq!(day.calories, CalorieTally::default());
        assert!(day.totals_consistent());
    }

    #[test]
    fn test_profile_deserializes_legacy_record() {
        // Shape written by the original app: string calorie target,
        // numeric weight, spelled-out activity level.
        let json = r#"{
            "userGender": "Male",
            "userBirthdate": "15-April-1990",
            "userHeight": "5'11\" ft",
            "userWeight": 74,
            "userTargetWeight": "70 kg",
            "userActivity": "Somewhat Active",
            "userGoal": "Lose Weight",
            "userCalorieTarget": "2663",
            "userMacroTargets": { "protein": 21, "carbs": 21, "fat": 21 },
            "userHasLaunched": true
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.gender, Some(Gender::Male));
        assert_eq!(profile.weight_raw.as_deref(), Some("74"));
        assert_eq!(profile.target_weight_raw.as_deref(), Some("70 kg"));
        assert_eq!(profile.activity, Some(ActivityLevel::Somewhat));
        assert_eq!(profile.goal, Some(Goal::Lose));
        assert_eq!(profile.calorie_target, Some(2663));
        assert_eq!(
            profile.macro_targets,
            Some(MacroTargets {
                protein: 21,
                carbs: 21,
                fat: 21
            })
        );
        assert!(profile.has_launched);
    }

    #[test]
    fn test_profile_tolerates_garbage_fields() {
        let json = r#"{
            "userActivity": "unknown tier",
            "userCalorieTarget": "not a number"
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.activity, None);
        assert_eq!(profile.calorie_target, None);
    }

    #[test]
    fn test_profile_roundtrip_keeps_wire_names() {
        let profile = Profile {
            gender: Some(Gender::Female),
            calorie_target: Some(2000),
            ..Profile::default()
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"userGender\":\"Female\""));
        assert!(json.contains("\"userCalorieTarget\":\"2000\""));
    }
}
