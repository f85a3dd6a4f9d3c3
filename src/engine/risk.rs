//! Risk flag evaluation
//!
//! Advisory strings derived from a profile and its BMI. Categories are
//! evaluated independently and appended in a fixed order, so output is
//! deterministic for a given profile.

use super::calc::trimester;
use super::types::{Mood, Profile};

/// Evaluate advisory risk flags in fixed order: pregnancy, age, BMI,
/// cycle regularity, conditions, allergies. No category short-circuits
/// another.
pub fn risk_flags(profile: &Profile, bmi: f64) -> Vec<String> {
    let mut flags = Vec::new();

    // 1. Pregnancy
    if profile.is_pregnant {
        flags.push(
            "Pregnancy: essential nutrients include folic acid, iron, calcium, and DHA."
                .to_string(),
        );
        match trimester(profile.pregnancy_week) {
            1 => flags.push(
                "First trimester: focus on small, frequent meals if experiencing nausea."
                    .to_string(),
            ),
            2 => flags.push(
                "Second trimester: increase calcium intake to support bone development."
                    .to_string(),
            ),
            _ => flags.push(
                "Third trimester: include more fiber and water to prevent constipation."
                    .to_string(),
            ),
        }
    }

    // 2. Age
    if profile.age > 50 {
        flags.push(
            "Over 50: increase vitamin D, calcium, and omega-3 intake for bone and heart health."
                .to_string(),
        );
    } else if profile.age > 30 {
        flags.push(
            "Adult: maintain muscle mass with adequate protein and regular exercise.".to_string(),
        );
    } else if profile.age < 18 {
        flags.push(
            "Under 18: prioritize growth-supporting nutrients such as calcium, iron, and protein."
                .to_string(),
        );
    }

    // 3. BMI
    if bmi < 18.5 {
        flags.push(
            "Underweight: focus on nutrient-dense foods to reach a healthy weight.".to_string(),
        );
    } else if bmi > 25.0 {
        flags.push(
            "Elevated BMI: consider balanced portion control while maintaining nutrient intake."
                .to_string(),
        );
    }

    // 4. Cycle regularity
    if profile.menstruation_date.is_some() && !profile.is_regular_cycle {
        flags.push(
            "Irregular cycle: iron, magnesium, and B-vitamins may support hormonal balance."
                .to_string(),
        );
    }

    // 5. Medical conditions
    for condition in &profile.conditions {
        flags.push(format!(
            "Medical condition ({}): consult a healthcare provider for specific dietary adjustments.",
            condition
        ));
    }

    // 6. Food allergies
    for allergen in &profile.allergies {
        flags.push(format!(
            "Food allergy ({}): find alternative sources for nutrients typically provided by {}.",
            allergen, allergen
        ));
    }

    flags
}

/// Iron and hydration note while menstruating (period started under a
/// week ago). Not part of the fixed risk-flag sequence.
pub fn menstruation_note(days_since_period: i64) -> Option<&'static str> {
    if (0..7).contains(&days_since_period) {
        Some("During menstruation: increase iron-rich foods to replace lost iron and stay hydrated.")
    } else {
        None
    }
}

/// Suggestion for the daily mood check-in
pub fn mood_suggestion(mood: Mood) -> &'static str {
    match mood {
        Mood::Stressed => "Try meditation and deep breathing exercises.",
        Mood::Tired => "Ensure 7-9 hours of quality sleep.",
        Mood::Happy | Mood::Neutral => "Keep up the good work!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{ActivityLevel, DietType};
    use chrono::NaiveDate;

    fn base_profile() -> Profile {
        Profile {
            age: 25,
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
    fn test_no_flags_for_unremarkable_profile() {
        let flags = risk_flags(&base_profile(), 22.0);
        assert!(flags.is_empty());
    }

    #[test]
    fn test_pregnancy_week_20_is_second_trimester() {
        let mut profile = base_profile();
        profile.is_pregnant = true;
        profile.pregnancy_week = 20;

        let flags = risk_flags(&profile, 22.0);
        assert_eq!(flags.len(), 2);
        assert!(flags[0].contains("folic acid"));
        assert!(flags[1].starts_with("Second trimester"));
    }

    #[test]
    fn test_flag_order_is_fixed() {
        let mut profile = base_profile();
        profile.age = 55;
        profile.menstruation_date = NaiveDate::from_ymd_opt(2025, 1, 1);
        profile.is_regular_cycle = false;
        profile.conditions = vec!["diabetes".to_string()];
        profile.allergies = vec!["peanuts".to_string()];

        let flags = risk_flags(&profile, 17.0);
        assert_eq!(flags.len(), 5);
        assert!(flags[0].starts_with("Over 50"));
        assert!(flags[1].starts_with("Underweight"));
        assert!(flags[2].starts_with("Irregular cycle"));
        assert!(flags[3].contains("diabetes"));
        assert!(flags[4].contains("peanuts"));
    }

    #[test]
    fn test_age_bands_do_not_overlap() {
        let mut profile = base_profile();

        profile.age = 17;
        let flags = risk_flags(&profile, 22.0);
        assert!(flags[0].starts_with("Under 18"));

        profile.age = 30;
        assert!(risk_flags(&profile, 22.0).is_empty());

        profile.age = 31;
        let flags = risk_flags(&profile, 22.0);
        assert!(flags[0].starts_with("Adult"));

        profile.age = 50;
        let flags = risk_flags(&profile, 22.0);
        assert!(flags[0].starts_with("Adult"));
    }

    #[test]
    fn test_bmi_boundaries_emit_no_flag() {
        // 18.5 and 25 are themselves unflagged
        assert!(risk_flags(&base_profile(), 18.5).is_empty());
        assert!(risk_flags(&base_profile(), 25.0).is_empty());
        assert!(!risk_flags(&base_profile(), 25.01).is_empty());
    }

    #[test]
    fn test_regular_cycle_emits_no_flag() {
        let mut profile = base_profile();
        profile.menstruation_date = NaiveDate::from_ymd_opt(2025, 1, 1);
        profile.is_regular_cycle = true;
        assert!(risk_flags(&profile, 22.0).is_empty());
    }

    #[test]
    fn test_one_flag_per_condition_and_allergen() {
        let mut profile = base_profile();
        profile.conditions = vec!["anemia".to_string(), "hypothyroidism".to_string()];
        profile.allergies = vec!["dairy".to_string()];

        let flags = risk_flags(&profile, 22.0);
        assert_eq!(flags.len(), 3);
        assert!(flags[0].contains("anemia"));
        assert!(flags[1].contains("hypothyroidism"));
        assert!(flags[2].contains("dairy"));
    }

    #[test]
    fn test_menstruation_note_window() {
        assert!(menstruation_note(0).is_some());
        assert!(menstruation_note(6).is_some());
        assert!(menstruation_note(7).is_none());
        assert!(menstruation_note(-1).is_none());
    }

    #[test]
    fn test_mood_suggestions() {
        assert!(mood_suggestion(Mood::Stressed).contains("meditation"));
        assert!(mood_suggestion(Mood::Tired).contains("sleep"));
        assert_eq!(
            mood_suggestion(Mood::Happy),
            mood_suggestion(Mood::Neutral)
        );
    }
}
