//! Dashboard nutrition summary tool
//!
//! The quick-view surface: age-banded calorie estimate, 55/20/25 macro
//! split, and the static guidance blocks shown alongside it.

use serde::Serialize;

use crate::db::Database;
use crate::engine::{
    build_plan, deficiency_notice, exercise_recommendations, mood_suggestion, sample_meal_plan,
    BmiCategory, Macros, MealPlan, Mood, PlanContext,
};
use super::profile::require_profile;

/// Response for get_nutrition_summary
#[derive(Debug, Serialize)]
pub struct NutritionSummaryResponse {
    pub user_id: i64,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub daily_calories: u32,
    pub macros: Macros,
    pub water_ml: f64,
    pub risk_flags: Vec<String>,
    pub diet_type: String,
    pub meal_plan: MealPlan,
    pub exercise_recommendations: [&'static str; 2],
    pub deficiency_notice: &'static str,
    pub mood_suggestion: Option<&'static str>,
}

/// Compute the dashboard nutrition summary for a user
pub fn nutrition_summary(
    db: &Database,
    user_id: i64,
    mood: Option<Mood>,
) -> Result<NutritionSummaryResponse, String> {
    let record = require_profile(db, user_id)?;
    let profile = record.to_engine().map_err(|e| e.to_string())?;
    let plan = build_plan(&profile, PlanContext::DashboardSummary).map_err(|e| e.to_string())?;

    Ok(NutritionSummaryResponse {
        user_id,
        bmi: plan.bmi,
        bmi_category: plan.bmi_category,
        daily_calories: plan.daily_calories,
        macros: plan.macros,
        water_ml: plan.water_ml,
        risk_flags: plan.risk_flags,
        diet_type: profile.diet_type.label().to_string(),
        meal_plan: sample_meal_plan(profile.diet_type),
        exercise_recommendations: exercise_recommendations(plan.bmi),
        deficiency_notice: deficiency_notice(profile.age, plan.bmi),
        mood_suggestion: mood.map(mood_suggestion),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::ProfileUpsert;
    use crate::tools::profile::set_profile;

    fn test_db(name: &str) -> Database {
        let uri = format!("file:{}?mode=memory&cache=shared", name);
        let db = Database::new(uri).unwrap();
        db.with_conn(|conn| {
            run_migrations(conn)?;
            Ok(())
        })
        .unwrap();
        db
    }

    fn seed_profile(db: &Database) {
        set_profile(
            db,
            &ProfileUpsert {
                user_id: 1,
                full_name: "Dana Said".to_string(),
                age: 25,
                education: None,
                height_cm: 165.0,
                weight_kg: 60.0,
                menstruation_date: None,
                is_regular_cycle: false,
                is_pregnant: false,
                pregnancy_week: 0,
                activity_level: "sedentary".to_string(),
                diet_type: "keto".to_string(),
                conditions: None,
                allergies: None,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_summary_uses_dashboard_surface() {
        let db = test_db("nutrition_summary");
        seed_profile(&db);

        let summary = nutrition_summary(&db, 1, None).unwrap();
        // age 25, bmi ~22 -> banded 2000 kcal and the 55/20/25 split
        assert_eq!(summary.daily_calories, 2000);
        assert_eq!(summary.macros.carbs_g, 275.0);
        assert_eq!(summary.water_ml, 2100.0);
        assert_eq!(summary.meal_plan, sample_meal_plan(crate::engine::DietType::Keto));
        assert!(summary.mood_suggestion.is_none());
    }

    #[test]
    fn test_summary_carries_mood_suggestion() {
        let db = test_db("nutrition_summary_mood");
        seed_profile(&db);

        let summary = nutrition_summary(&db, 1, Some(Mood::Stressed)).unwrap();
        assert_eq!(
            summary.mood_suggestion,
            Some("Try meditation and deep breathing exercises.")
        );
    }

    #[test]
    fn test_summary_requires_profile() {
        let db = test_db("nutrition_summary_missing");
        assert!(nutrition_summary(&db, 1, None).is_err());
    }
}
