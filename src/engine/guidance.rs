//! Static guidance text
//!
//! Exercise recommendations, sample meal plans, and deficiency notices
//! keyed off computed values. All lookups, no computation.

use serde::Serialize;

use super::types::DietType;

/// A sample day of meals for a diet preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MealPlan {
    pub breakfast: &'static str,
    pub lunch: &'static str,
    pub dinner: &'static str,
}

/// Exercise recommendations by BMI band
pub fn exercise_recommendations(bmi: f64) -> [&'static str; 2] {
    if bmi < 18.5 {
        [
            "Strength training and a high-protein diet to gain healthy weight.",
            "Focus on compound exercises like squats, deadlifts, and bench press.",
        ]
    } else if bmi <= 24.9 {
        [
            "Balanced mix of strength and cardio workouts.",
            "Try 3-4 days of strength training and 2-3 days of cardio per week.",
        ]
    } else {
        [
            "Focus on cardio and weight management exercises.",
            "Start with low-impact cardio like walking, swimming, or cycling.",
        ]
    }
}

/// Sample meal plan for a diet preference
pub fn sample_meal_plan(diet_type: DietType) -> MealPlan {
    match diet_type {
        DietType::Balanced => MealPlan {
            breakfast: "Oatmeal with fruits and nuts",
            lunch: "Grilled chicken salad with mixed vegetables",
            dinner: "Baked salmon with quinoa and steamed vegetables",
        },
        DietType::Vegan => MealPlan {
            breakfast: "Tofu scramble with vegetables",
            lunch: "Chickpea and vegetable salad",
            dinner: "Lentil curry with brown rice",
        },
        DietType::Keto => MealPlan {
            breakfast: "Eggs with avocado and bacon",
            lunch: "Tuna salad with olive oil",
            dinner: "Steak with buttered vegetables",
        },
        DietType::LowCarb => MealPlan {
            breakfast: "Greek yogurt with berries",
            lunch: "Lettuce wrap with turkey and cheese",
            dinner: "Grilled chicken with vegetables",
        },
        DietType::HighProtein => MealPlan {
            breakfast: "Protein shake with banana",
            lunch: "Chicken breast with sweet potato",
            dinner: "Lean beef stir fry with vegetables",
        },
    }
}

/// Deficiency notice: age takes precedence over BMI
pub fn deficiency_notice(age: u32, bmi: f64) -> &'static str {
    if age > 50 {
        "Risk of vitamin D and calcium deficiency. Include dairy, nuts, and fish."
    } else if bmi < 18.5 {
        "You may lack protein and healthy fats. Add lean meat, eggs, and nuts."
    } else {
        "Maintain a balanced diet to avoid deficiencies."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_bands() {
        assert!(exercise_recommendations(17.0)[0].contains("Strength training"));
        assert!(exercise_recommendations(22.0)[0].contains("Balanced mix"));
        assert!(exercise_recommendations(24.9)[0].contains("Balanced mix"));
        assert!(exercise_recommendations(27.0)[0].contains("cardio"));
    }

    #[test]
    fn test_meal_plans_differ_per_diet() {
        let diets = [
            DietType::Balanced,
            DietType::Vegan,
            DietType::Keto,
            DietType::LowCarb,
            DietType::HighProtein,
        ];
        let plans: Vec<MealPlan> = diets.iter().map(|&d| sample_meal_plan(d)).collect();
        for (i, a) in plans.iter().enumerate() {
            for b in plans.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_vegan_plan_has_no_meat() {
        let plan = sample_meal_plan(DietType::Vegan);
        for meal in [plan.breakfast, plan.lunch, plan.dinner] {
            assert!(!meal.to_lowercase().contains("chicken"));
            assert!(!meal.to_lowercase().contains("beef"));
        }
    }

    #[test]
    fn test_deficiency_notice_age_takes_precedence() {
        assert!(deficiency_notice(55, 17.0).contains("vitamin D"));
        assert!(deficiency_notice(30, 17.0).contains("protein"));
        assert!(deficiency_notice(30, 22.0).contains("balanced diet"));
    }
}
