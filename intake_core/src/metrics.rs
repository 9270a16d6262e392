//! Health metrics derivation: BMR, calorie budget, BMI.
//!
//! All functions here are pure; the only I/O-adjacent entry point is
//! [`profile_metrics`], which re-parses the profile's raw height/weight
//! strings through the `units` adapters before computing.

use crate::{dates, units, ActivityLevel, Error, Gender, Profile, Result};
use chrono::NaiveDate;

/// Basal Metabolic Rate via the Mifflin-St Jeor equation, rounded to the
/// nearest kcal/day.
///
/// Any non-male gender takes the -161 offset; the source behavior for
/// values outside the binary is the female branch.
pub fn compute_bmr(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> i32 {
    let mut bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    bmr += match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    bmr.round() as i32
}

/// Daily calorie budget for an activity level. An absent level falls back
/// to the `Somewhat` multiplier (1.375).
pub fn calorie_budget(bmr: i32, activity: Option<ActivityLevel>) -> i32 {
    let multiplier = activity
        .unwrap_or(ActivityLevel::Somewhat)
        .multiplier();
    (bmr as f64 * multiplier).round() as i32
}

/// Budget rows for all four activity tiers, as shown on the dashboard.
pub fn activity_budgets(bmr: i32) -> [(ActivityLevel, i32); 4] {
    ActivityLevel::ALL.map(|level| (level, calorie_budget(bmr, Some(level))))
}

/// Body Mass Index (kg/m²), rounded to one decimal.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let meters = height_cm / 100.0;
    (weight_kg / (meters * meters) * 10.0).round() / 10.0
}

/// BMI classification band
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BmiCategory {
    SeverelyUnderweight,
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::SeverelyUnderweight => "Severely Underweight",
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal (Healthy Weight)",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Color tag used by the gauge legend
    pub fn color_hex(self) -> &'static str {
        match self {
            BmiCategory::SeverelyUnderweight => "#FFD700",
            BmiCategory::Underweight => "#2196F3",
            BmiCategory::Normal => "#4CAF50",
            BmiCategory::Overweight => "#FF9800",
            BmiCategory::Obese => "#FF5722",
        }
    }
}

/// Classify a BMI value into its band. Boundaries are inclusive at the
/// lower edge of each band: 18.4 is underweight, 18.5 is normal.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 16.0 {
        BmiCategory::SeverelyUnderweight
    } else if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// (bmi_lo, bmi_hi, angle_lo, angle_hi) per classification band. The obese
/// band is open-ended in the domain; 100 is the interpolation ceiling only.
const GAUGE_BANDS: [(f64, f64, f64, f64); 5] = [
    (0.0, 16.0, -150.0, -90.0),
    (16.0, 18.5, -90.0, -30.0),
    (18.5, 25.0, -30.0, 30.0),
    (25.0, 30.0, 30.0, 90.0),
    (30.0, 100.0, 90.0, 150.0),
];

/// Gauge-pin angle in degrees for a BMI value, piecewise-linear across the
/// five classification bands. Input is clamped to [0, 100]; values above
/// the ceiling pin at 150°, never extrapolate. The final 0.0 is a
/// defensive default for a value no band matched.
pub fn bmi_gauge_angle(bmi: f64) -> f64 {
    let bmi = bmi.clamp(0.0, 100.0);
    for (lo, hi, angle_lo, angle_hi) in GAUGE_BANDS {
        let in_band = bmi >= lo && (bmi < hi || (hi == 100.0 && bmi <= hi));
        if in_band {
            return angle_lo + (bmi - lo) / (hi - lo) * (angle_hi - angle_lo);
        }
    }
    0.0
}

/// Everything the dashboard derives from a profile in one pass
#[derive(Clone, Debug)]
pub struct DerivedMetrics {
    pub age_years: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmr: i32,
    pub calorie_budget: i32,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub gauge_angle: f64,
}

/// Derive metrics from a profile's raw fields as of a date.
///
/// Fails with `Parse` when a required field is missing or malformed; the
/// caller renders the metric as unavailable rather than crashing.
pub fn profile_metrics(profile: &Profile, as_of: NaiveDate) -> Result<DerivedMetrics> {
    let birthdate = profile
        .birthdate
        .as_deref()
        .ok_or_else(|| Error::Parse("profile has no birthdate".into()))?;
    let height_raw = profile
        .height_raw
        .as_deref()
        .ok_or_else(|| Error::Parse("profile has no height".into()))?;
    let weight_raw = profile
        .weight_raw
        .as_deref()
        .ok_or_else(|| Error::Parse("profile has no weight".into()))?;

    let age_years = dates::age_in_years(birthdate, as_of)?;
    let height_cm = units::parse_height_cm(height_raw)?;
    let weight_kg = units::parse_weight_kg(weight_raw)?;

    let gender = profile.gender.unwrap_or(Gender::Female);
    let bmr = compute_bmr(weight_kg, height_cm, age_years, gender);
    let bmi = compute_bmi(weight_kg, height_cm);

    Ok(DerivedMetrics {
        age_years,
        height_cm,
        weight_kg,
        bmr,
        calorie_budget: calorie_budget(bmr, profile.activity),
        bmi,
        bmi_category: classify_bmi(bmi),
        gauge_angle: bmi_gauge_angle(bmi),
    })
}
