//! Nutrition computation engine
//!
//! Pure functions mapping a health profile to calorie targets, macro
//! splits, water intake, BMI classification, risk flags, and advice
//! prompts. Nothing in this module performs I/O or calls the text
//! generator; callers thread a `Profile` in and get a `NutritionPlan` out.

pub mod calc;
pub mod guidance;
pub mod plan;
pub mod prompt;
pub mod risk;
pub mod types;

use thiserror::Error;

pub use calc::{
    bmi, days_since_period, estimate_activity_calories, estimate_base_calories, trimester,
    water_target_ml,
};
pub use guidance::{
    deficiency_notice, exercise_recommendations, sample_meal_plan, MealPlan,
};
pub use plan::{build_plan, MacroSplit, Macros, NutritionPlan, PlanContext};
pub use prompt::{advice_prompt, chat_prompt, tips_prompt, ChatRole, ChatTurn};
pub use risk::{menstruation_note, mood_suggestion, risk_flags};
pub use types::{ActivityLevel, BmiCategory, DietType, Mood, Profile};

/// Engine error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Height or weight outside the measurable domain (<= 0)
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    /// Profile fields that fail validation before any formula runs
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
