//! Core nutrition formulas
//!
//! The two calorie estimators are deliberately distinct operations: the
//! age-banded lookup backs the dashboard quick view, the activity-adjusted
//! estimate backs the detailed advice view. They can disagree; callers
//! pick one by surface and never average them.

use chrono::NaiveDate;

use super::types::ActivityLevel;
use super::{EngineError, EngineResult};

/// Compute Body Mass Index: weight(kg) / height(m)^2.
///
/// Rejects non-positive measurements instead of dividing by zero.
pub fn bmi(height_cm: f64, weight_kg: f64) -> EngineResult<f64> {
    if height_cm <= 0.0 {
        return Err(EngineError::InvalidMeasurement(format!(
            "height must be positive, got {} cm",
            height_cm
        )));
    }
    if weight_kg <= 0.0 {
        return Err(EngineError::InvalidMeasurement(format!(
            "weight must be positive, got {} kg",
            weight_kg
        )));
    }

    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

/// Quick daily calorie estimate from age band and BMI.
///
/// Bands are closed intervals evaluated in ascending order; the second
/// figure of a band applies when BMI >= 25.
pub fn estimate_base_calories(age: u32, bmi: f64) -> u32 {
    let heavy = bmi >= 25.0;
    if age <= 3 {
        1000
    } else if age <= 8 {
        1400
    } else if age <= 18 {
        if heavy { 2000 } else { 1800 }
    } else if age <= 30 {
        if heavy { 2200 } else { 2000 }
    } else if age <= 50 {
        if heavy { 2000 } else { 1800 }
    } else if heavy {
        1800
    } else {
        1600
    }
}

/// Detailed daily calorie estimate: metabolic base adjusted for activity
/// level, with a pregnancy surcharge added after the multiplier.
pub fn estimate_activity_calories(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    activity_level: ActivityLevel,
    is_pregnant: bool,
    pregnancy_week: u32,
) -> f64 {
    let base = 655.0 + 9.6 * weight_kg + 1.8 * height_cm - 4.7 * age as f64;
    let mut adjusted = base * activity_level.multiplier();

    if is_pregnant {
        adjusted += pregnancy_surcharge(pregnancy_week);
    }

    adjusted
}

/// Extra daily calories by pregnancy week: none in the first trimester,
/// 340 in the second, 450 from week 27 on.
pub fn pregnancy_surcharge(pregnancy_week: u32) -> f64 {
    if pregnancy_week <= 13 {
        0.0
    } else if pregnancy_week <= 26 {
        340.0
    } else {
        450.0
    }
}

/// Pregnancy trimester for a given week: 1 + week / 13
pub fn trimester(pregnancy_week: u32) -> u32 {
    1 + pregnancy_week / 13
}

/// Recommended daily water intake in milliliters: 35 mL per kg
pub fn water_target_ml(weight_kg: f64) -> f64 {
    weight_kg * 35.0
}

/// Whole days elapsed since the last menstrual period.
///
/// The caller supplies "today" so the computation stays deterministic.
pub fn days_since_period(last_period: NaiveDate, today: NaiveDate) -> i64 {
    (today - last_period).num_days()
}
