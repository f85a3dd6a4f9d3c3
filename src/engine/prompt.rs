//! Prompt construction for the external text generator
//!
//! Deterministic templates embedding profile data. The engine only builds
//! the strings; sending them to the remote model is the caller's job, so
//! everything here is testable without network access.

use serde::{Deserialize, Serialize};

use super::types::Profile;

/// How many prior chat turns are carried into the chat prompt
const CHAT_HISTORY_WINDOW: usize = 10;

/// Role of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Uppercase label used in the prompt transcript
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "USER",
            ChatRole::Assistant => "ASSISTANT",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(ChatRole::User),
            "assistant" => Some(ChatRole::Assistant),
            _ => None,
        }
    }
}

/// A single turn of chat history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Shared profile bullet lines: pregnancy or menstruation status,
/// conditions, allergies.
fn push_status_lines(prompt: &mut String, profile: &Profile) {
    if profile.is_pregnant {
        prompt.push_str(&format!(
            "- Currently pregnant (Week {})\n",
            profile.pregnancy_week
        ));
    } else if let Some(date) = profile.menstruation_date {
        prompt.push_str(&format!(
            "- Last menstrual period: {}\n",
            date.format("%Y-%m-%d")
        ));
        prompt.push_str(&format!(
            "- Regular menstrual cycle: {}\n",
            if profile.is_regular_cycle { "Yes" } else { "No" }
        ));
    }

    if !profile.conditions.is_empty() {
        prompt.push_str(&format!(
            "- Medical conditions: {}\n",
            profile.conditions.join(", ")
        ));
    }

    if !profile.allergies.is_empty() {
        prompt.push_str(&format!(
            "- Food allergies/intolerances: {}\n",
            profile.allergies.join(", ")
        ));
    }
}

/// Build the detailed-advice prompt: profile characteristics followed by
/// a fixed instruction block (three meals, two snacks, priority
/// nutrients, lifestyle tips).
pub fn advice_prompt(profile: &Profile, bmi: f64) -> String {
    let mut prompt = format!(
        "Generate personalized nutrition advice for a {}-year-old individual \
         with the following characteristics:\n\
         - Weight: {} kg\n\
         - Height: {} cm\n\
         - BMI: {:.1}\n\
         - Activity level: {}\n",
        profile.age,
        profile.weight_kg,
        profile.height_cm,
        bmi,
        profile.activity_level.label()
    );

    push_status_lines(&mut prompt, profile);

    prompt.push_str(
        "\nPlease provide:\n\
         1. Three specific meal suggestions for breakfast, lunch, and dinner\n\
         2. Two healthy snack options\n\
         3. Any specific nutrients they should focus on based on their profile\n\
         4. Brief lifestyle recommendations\n\
         \n\
         Keep the advice concise, practical, and evidence-based with attractive emojis.\n",
    );

    prompt
}

/// Build the dashboard tips prompt: a women's-health profile summary and
/// a request for 5-7 bullet-point tips.
pub fn tips_prompt(
    profile: &Profile,
    bmi: f64,
    education: Option<&str>,
    days_since_period: Option<i64>,
) -> String {
    let period_info = match (profile.menstruation_date, days_since_period) {
        (Some(_), Some(days)) => format!(
            "Last menstruation started {} days ago. Has a {} cycle.",
            days,
            if profile.is_regular_cycle {
                "regular"
            } else {
                "irregular"
            }
        ),
        _ => "No menstruation data provided.".to_string(),
    };

    let pregnancy_info = if profile.is_pregnant {
        format!("Yes, week {}", profile.pregnancy_week)
    } else {
        "No".to_string()
    };

    format!(
        "You are a professional nutrition advisor specializing in women's health. \
         Provide personalized nutrition advice for a woman with the following profile:\n\
         \n\
         Age: {} years\n\
         Height: {} cm\n\
         Weight: {} kg\n\
         BMI: {:.1} ({})\n\
         Education: {}\n\
         Menstruation: {}\n\
         Pregnant: {}\n\
         Medical conditions: {}\n\
         Food allergies/intolerances: {}\n\
         \n\
         Provide 5-7 specific, actionable nutrition tips that address her unique needs. \
         Format each tip as a bullet point and add attractive emojis. Focus on:\n\
         1. Key nutrients she should prioritize\n\
         2. Foods that would be beneficial\n\
         3. Dietary patterns that may help with any health concerns\n\
         4. Specific recommendations related to her reproductive health status\n\
         \n\
         Keep the tips concise, practical, and evidence-based.\n",
        profile.age,
        profile.height_cm,
        profile.weight_kg,
        bmi,
        super::types::BmiCategory::from_bmi(bmi).as_str(),
        education.unwrap_or("Not provided"),
        period_info,
        pregnancy_info,
        if profile.conditions.is_empty() {
            "None reported".to_string()
        } else {
            profile.conditions.join(", ")
        },
        if profile.allergies.is_empty() {
            "None reported".to_string()
        } else {
            profile.allergies.join(", ")
        },
    )
}

/// Build the chat prompt: assistant preamble, optional profile context,
/// the last turns of history, and the current question.
pub fn chat_prompt(
    profile: Option<(&Profile, f64)>,
    history: &[ChatTurn],
    query: &str,
) -> String {
    let mut prompt = String::from(
        "You are a nutrition assistant helping a user with personalized \
         health and nutrition advice.\n",
    );

    if let Some((profile, bmi)) = profile {
        prompt.push_str(&format!(
            "\nUser profile:\n\
             - Age: {} years\n\
             - Weight: {} kg\n\
             - Height: {} cm\n\
             - BMI: {:.1}\n",
            profile.age, profile.weight_kg, profile.height_cm, bmi
        ));

        if profile.is_pregnant {
            prompt.push_str(&format!(
                "- Currently pregnant (Week {})\n",
                profile.pregnancy_week
            ));
        }
        if !profile.conditions.is_empty() {
            prompt.push_str(&format!(
                "- Medical conditions: {}\n",
                profile.conditions.join(", ")
            ));
        }
        if !profile.allergies.is_empty() {
            prompt.push_str(&format!(
                "- Food allergies/intolerances: {}\n",
                profile.allergies.join(", ")
            ));
        }
    }

    prompt.push_str("\nPrevious conversation:\n");

    let start = history.len().saturating_sub(CHAT_HISTORY_WINDOW);
    for turn in &history[start..] {
        prompt.push_str(&format!("{}: {}\n", turn.role.as_str(), turn.content));
    }

    prompt.push_str(&format!(
        "\nUser's current question: {}\n\nProvide a helpful, accurate, and concise response:\n",
        query
    ));

    prompt
}
