//! Plan assembly
//!
//! Selects the calorie estimator and macro split for a presentation
//! surface and assembles the full `NutritionPlan`. The dashboard and
//! advice surfaces use different estimators and splits on purpose; they
//! are never reconciled.

use serde::{Deserialize, Serialize};

use super::calc::{bmi, estimate_activity_calories, estimate_base_calories, water_target_ml};
use super::prompt::advice_prompt;
use super::risk::risk_flags;
use super::types::{BmiCategory, Profile};
use super::EngineResult;

/// Macronutrient targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
}

/// A calorie split across macronutrients, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub carbs_pct: f64,
    pub protein_pct: f64,
    pub fat_pct: f64,
}

impl MacroSplit {
    /// Dashboard split: 55% carbohydrate, 20% protein, 25% fat
    pub const DASHBOARD: MacroSplit = MacroSplit {
        carbs_pct: 55.0,
        protein_pct: 20.0,
        fat_pct: 25.0,
    };

    /// Detailed-advice split: 50% carbohydrate, 20% protein, 30% fat
    pub const ADVICE: MacroSplit = MacroSplit {
        carbs_pct: 50.0,
        protein_pct: 20.0,
        fat_pct: 30.0,
    };

    /// Convert a calorie target to grams: 4 kcal/g for carbohydrate and
    /// protein, 9 kcal/g for fat.
    pub fn grams_for(&self, calories: f64) -> Macros {
        Macros {
            carbs_g: calories * self.carbs_pct / 100.0 / 4.0,
            protein_g: calories * self.protein_pct / 100.0 / 4.0,
            fat_g: calories * self.fat_pct / 100.0 / 9.0,
        }
    }
}

/// Which presentation surface a plan is computed for.
///
/// The dashboard uses the quick age-banded calorie estimate; the advice
/// view uses the activity-adjusted estimate and a different macro split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanContext {
    DashboardSummary,
    DetailedAdvice,
}

impl PlanContext {
    /// The macro split this surface presents
    pub fn macro_split(&self) -> MacroSplit {
        match self {
            PlanContext::DashboardSummary => MacroSplit::DASHBOARD,
            PlanContext::DetailedAdvice => MacroSplit::ADVICE,
        }
    }
}

/// The engine's output: calorie and macro targets, water intake, BMI
/// classification, risk flags, and the advice prompt. Recomputed on
/// every call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionPlan {
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub daily_calories: u32,
    pub macros: Macros,
    pub water_ml: f64,
    pub risk_flags: Vec<String>,
    pub advice_prompt: String,
}

/// Build a complete nutrition plan for a profile on the given surface.
///
/// Validates the profile, then derives every plan field from it; the
/// same profile and context always produce an identical plan.
pub fn build_plan(profile: &Profile, context: PlanContext) -> EngineResult<NutritionPlan> {
    profile.validate()?;

    let bmi_value = bmi(profile.height_cm, profile.weight_kg)?;

    let calories = match context {
        PlanContext::DashboardSummary => {
            f64::from(estimate_base_calories(profile.age, bmi_value))
        }
        PlanContext::DetailedAdvice => estimate_activity_calories(
            profile.weight_kg,
            profile.height_cm,
            profile.age,
            profile.activity_level,
            profile.is_pregnant,
            profile.pregnancy_week,
        ),
    };

    Ok(NutritionPlan {
        bmi: bmi_value,
        bmi_category: BmiCategory::from_bmi(bmi_value),
        daily_calories: calories.round() as u32,
        macros: context.macro_split().grams_for(calories),
        water_ml: water_target_ml(profile.weight_kg),
        risk_flags: risk_flags(profile, bmi_value),
        advice_prompt: advice_prompt(profile, bmi_value),
    })
}
