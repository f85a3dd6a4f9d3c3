//! Engine input types
//!
//! The validated profile value the engine computes from, and the enums
//! describing lifestyle choices and computed classifications.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EngineError, EngineResult};

/// Physical activity level, ordered from least to most active
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtremelyActive,
}

impl ActivityLevel {
    /// Multiplier applied to the base metabolic estimate
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }

    /// Human-readable label for prompts and display
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::ExtremelyActive => "Extremely Active",
        }
    }

    /// Convert to database string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }

    /// Parse from string, accepting both db and display forms
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(' ', "_").as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "lightly_active" => Some(ActivityLevel::LightlyActive),
            "moderately_active" => Some(ActivityLevel::ModeratelyActive),
            "very_active" => Some(ActivityLevel::VeryActive),
            "extremely_active" => Some(ActivityLevel::ExtremelyActive),
            _ => None,
        }
    }
}

/// Dietary preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    Balanced,
    Vegan,
    Keto,
    LowCarb,
    HighProtein,
}

impl DietType {
    /// Human-readable label for prompts and display
    pub fn label(&self) -> &'static str {
        match self {
            DietType::Balanced => "Balanced",
            DietType::Vegan => "Vegan",
            DietType::Keto => "Keto",
            DietType::LowCarb => "Low-Carb",
            DietType::HighProtein => "High-Protein",
        }
    }

    /// Convert to database string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DietType::Balanced => "balanced",
            DietType::Vegan => "vegan",
            DietType::Keto => "keto",
            DietType::LowCarb => "low_carb",
            DietType::HighProtein => "high_protein",
        }
    }

    /// Parse from string, accepting both db and display forms
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "balanced" => Some(DietType::Balanced),
            "vegan" => Some(DietType::Vegan),
            "keto" => Some(DietType::Keto),
            "low_carb" => Some(DietType::LowCarb),
            "high_protein" => Some(DietType::HighProtein),
            _ => None,
        }
    }
}

/// Self-reported mood for the daily check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Stressed,
    Tired,
}

impl Mood {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "happy" => Some(Mood::Happy),
            "neutral" => Some(Mood::Neutral),
            "stressed" => Some(Mood::Stressed),
            "tired" => Some(Mood::Tired),
            _ => None,
        }
    }
}

/// BMI classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value. Boundaries are exclusive upper bounds at
    /// 18.5, 25, and 30.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    /// Human-readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// A validated health profile, the sole input to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub is_pregnant: bool,
    /// Week of pregnancy (0-42), meaningful only when `is_pregnant`
    pub pregnancy_week: u32,
    /// First day of the last menstrual period, when tracked
    pub menstruation_date: Option<NaiveDate>,
    /// Meaningful only when `menstruation_date` is present
    pub is_regular_cycle: bool,
    pub activity_level: ActivityLevel,
    pub diet_type: DietType,
    /// Free-text medical condition labels, order preserved
    pub conditions: Vec<String>,
    /// Free-text allergen labels, order preserved
    pub allergies: Vec<String>,
}

impl Profile {
    /// Validate profile fields before any formula runs.
    ///
    /// Measurement checks (height/weight > 0) are performed by `bmi`
    /// itself so they cannot be bypassed.
    pub fn validate(&self) -> EngineResult<()> {
        if self.age < 1 || self.age > 120 {
            return Err(EngineError::InvalidProfile(format!(
                "age must be within 1-120 years, got {}",
                self.age
            )));
        }

        if !self.is_pregnant && self.pregnancy_week > 0 {
            return Err(EngineError::InvalidProfile(
                "pregnancy week given for a profile that is not pregnant".to_string(),
            ));
        }

        if self.pregnancy_week > 42 {
            return Err(EngineError::InvalidProfile(format!(
                "pregnancy week must be within 0-42, got {}",
                self.pregnancy_week
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_profile() -> Profile {
        Profile {
            age: 30,
            height_cm: 165.0,
            weight_kg: 60.0,
            is_pregnant: false,
            pregnancy_week: 0,
            menstruation_date: None,
            is_regular_cycle: false,
            activity_level: ActivityLevel::Sedentary,
            diet_type: DietType::Balanced,
            conditions: vec![],
            allergies: vec![],
        }
    }

    #[test]
    fn test_bmi_category_boundaries_are_exclusive() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.99), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_activity_multipliers_strictly_increase() {
        let levels = [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
            ActivityLevel::ExtremelyActive,
        ];
        for pair in levels.windows(2) {
            assert!(pair[0].multiplier() < pair[1].multiplier());
        }
    }

    #[test]
    fn test_activity_level_round_trip() {
        for level in [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
            ActivityLevel::ExtremelyActive,
        ] {
            assert_eq!(ActivityLevel::from_str(level.to_db_str()), Some(level));
            assert_eq!(ActivityLevel::from_str(level.label()), Some(level));
        }
        assert_eq!(ActivityLevel::from_str("couch potato"), None);
    }

    #[test]
    fn test_diet_type_round_trip() {
        for diet in [
            DietType::Balanced,
            DietType::Vegan,
            DietType::Keto,
            DietType::LowCarb,
            DietType::HighProtein,
        ] {
            assert_eq!(DietType::from_str(diet.to_db_str()), Some(diet));
            assert_eq!(DietType::from_str(diet.label()), Some(diet));
        }
    }

    #[test]
    fn test_validate_accepts_reasonable_profile() {
        assert!(base_profile().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_age_out_of_range() {
        let mut profile = base_profile();
        profile.age = 0;
        assert!(matches!(
            profile.validate(),
            Err(EngineError::InvalidProfile(_))
        ));

        profile.age = 121;
        assert!(matches!(
            profile.validate(),
            Err(EngineError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_validate_rejects_pregnancy_week_without_pregnancy() {
        let mut profile = base_profile();
        profile.pregnancy_week = 12;
        assert!(matches!(
            profile.validate(),
            Err(EngineError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_validate_rejects_pregnancy_week_out_of_range() {
        let mut profile = base_profile();
        profile.is_pregnant = true;
        profile.pregnancy_week = 43;
        assert!(matches!(
            profile.validate(),
            Err(EngineError::InvalidProfile(_))
        ));
    }
}
