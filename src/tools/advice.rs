//! Detailed advice and chat tools
//!
//! The advice surface: activity-adjusted calorie estimate, 50/20/30
//! macro split, special considerations, and the remote-generation calls.
//! Remote failures never discard the deterministic plan fields.

use chrono::NaiveDate;
use serde::Serialize;

use crate::advice::TextGenerator;
use crate::db::Database;
use crate::engine::{
    build_plan, chat_prompt, days_since_period, menstruation_note, tips_prompt, BmiCategory,
    ChatTurn, Macros, PlanContext,
};
use super::profile::require_profile;

/// Response for get_detailed_advice
#[derive(Debug, Serialize)]
pub struct DetailedAdviceResponse {
    pub user_id: i64,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub daily_calories: u32,
    pub macros: Macros,
    pub water_ml: f64,
    pub days_since_period: Option<i64>,
    pub special_considerations: Vec<String>,
    pub advice_prompt: String,
}

/// Response for generate_advice
#[derive(Debug, Serialize)]
pub struct GenerateAdviceResponse {
    pub plan: DetailedAdviceResponse,
    pub advice: Option<String>,
    pub advice_error: Option<String>,
}

/// Response for get_nutrition_tips
#[derive(Debug, Serialize)]
pub struct NutritionTipsResponse {
    pub user_id: i64,
    pub generated: bool,
    pub tips: Option<String>,
    /// Advisory flags shown when no generated tips are available
    pub fallback_tips: Vec<String>,
    pub error: Option<String>,
}

/// Response for nutrition_chat
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Compute the detailed advice view for a user.
///
/// `today` is supplied by the caller so cycle arithmetic stays
/// deterministic and testable.
pub fn detailed_advice(
    db: &Database,
    user_id: i64,
    today: NaiveDate,
) -> Result<DetailedAdviceResponse, String> {
    let record = require_profile(db, user_id)?;
    let profile = record.to_engine().map_err(|e| e.to_string())?;
    let plan = build_plan(&profile, PlanContext::DetailedAdvice).map_err(|e| e.to_string())?;

    let days = profile
        .menstruation_date
        .map(|date| days_since_period(date, today));

    let mut considerations = plan.risk_flags;
    if let Some(note) = days.and_then(menstruation_note) {
        considerations.push(note.to_string());
    }

    Ok(DetailedAdviceResponse {
        user_id,
        bmi: plan.bmi,
        bmi_category: plan.bmi_category,
        daily_calories: plan.daily_calories,
        macros: plan.macros,
        water_ml: plan.water_ml,
        days_since_period: days,
        special_considerations: considerations,
        advice_prompt: plan.advice_prompt,
    })
}

/// Compute the detailed advice view and ask the remote model for
/// narrative advice. The plan fields are returned even when the remote
/// call fails.
pub async fn generate_advice(
    db: &Database,
    generator: Option<&dyn TextGenerator>,
    user_id: i64,
    today: NaiveDate,
) -> Result<GenerateAdviceResponse, String> {
    let plan = detailed_advice(db, user_id, today)?;

    let (advice, advice_error) = match generator {
        None => (
            None,
            Some("Advice generation is not configured (GROQ_API_KEY not set).".to_string()),
        ),
        Some(generator) => match generator.generate(&plan.advice_prompt).await {
            Ok(text) => (Some(text), None),
            Err(e) => {
                tracing::warn!("Advice generation failed: {}", e);
                (None, Some(format!("Error generating advice: {}", e)))
            }
        },
    };

    Ok(GenerateAdviceResponse {
        plan,
        advice,
        advice_error,
    })
}

/// Generate dashboard nutrition tips, falling back to the profile's
/// advisory flags when the remote model is unavailable.
pub async fn nutrition_tips(
    db: &Database,
    generator: Option<&dyn TextGenerator>,
    user_id: i64,
    today: NaiveDate,
) -> Result<NutritionTipsResponse, String> {
    let record = require_profile(db, user_id)?;
    let profile = record.to_engine().map_err(|e| e.to_string())?;
    let plan = build_plan(&profile, PlanContext::DashboardSummary).map_err(|e| e.to_string())?;

    let days = profile
        .menstruation_date
        .map(|date| days_since_period(date, today));
    let prompt = tips_prompt(&profile, plan.bmi, record.education.as_deref(), days);

    match generator {
        None => Ok(NutritionTipsResponse {
            user_id,
            generated: false,
            tips: None,
            fallback_tips: plan.risk_flags,
            error: None,
        }),
        Some(generator) => match generator.generate(&prompt).await {
            Ok(text) => Ok(NutritionTipsResponse {
                user_id,
                generated: true,
                tips: Some(text),
                fallback_tips: vec![],
                error: None,
            }),
            Err(e) => {
                tracing::warn!("Tips generation failed: {}", e);
                Ok(NutritionTipsResponse {
                    user_id,
                    generated: false,
                    tips: None,
                    fallback_tips: plan.risk_flags,
                    error: Some(format!("Error generating nutrition tips: {}", e)),
                })
            }
        },
    }
}

/// Answer a chat question with profile context and recent history
pub async fn chat(
    db: &Database,
    generator: Option<&dyn TextGenerator>,
    user_id: i64,
    history: &[ChatTurn],
    query: &str,
) -> Result<ChatResponse, String> {
    // Chat works without a profile; context is added when one exists
    let context = match super::profile::get_profile(db, user_id)? {
        Some(record) => {
            let profile = record.to_engine().map_err(|e| e.to_string())?;
            let bmi = crate::engine::bmi(profile.height_cm, profile.weight_kg)
                .map_err(|e| e.to_string())?;
            Some((profile, bmi))
        }
        None => None,
    };

    let prompt = chat_prompt(
        context.as_ref().map(|(profile, bmi)| (profile, *bmi)),
        history,
        query,
    );

    let generator = generator
        .ok_or_else(|| "Chat is not configured (GROQ_API_KEY not set).".to_string())?;

    let reply = generator
        .generate(&prompt)
        .await
        .map_err(|e| format!("Error generating response: {}", e))?;

    Ok(ChatResponse { reply })
}
