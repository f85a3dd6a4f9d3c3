//! Nourish MCP Server Implementation
//!
//! Implements the MCP server with all Nourish tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::advice::TextGenerator;
use crate::db::Database;
use crate::engine::{ChatRole, ChatTurn, Mood};
use crate::models::ProfileUpsert;
use crate::tools::{advice, nutrition, profile};

/// Nourish MCP Service
#[derive(Clone)]
pub struct NourishService {
    database: Database,
    generator: Option<Arc<dyn TextGenerator>>,
    tool_router: ToolRouter<NourishService>,
}

impl NourishService {
    pub fn new(database: Database, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            database,
            generator,
            tool_router: Self::tool_router(),
        }
    }

    fn today() -> chrono::NaiveDate {
        chrono::Local::now().date_naive()
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetProfileParams {
    /// User ID the profile belongs to
    pub user_id: i64,
    /// Full name
    pub full_name: String,
    /// Age in years (1-120)
    pub age: i64,
    /// Education level (optional, used in tips generation)
    pub education: Option<String>,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// First day of the last menstrual period (ISO format: YYYY-MM-DD)
    pub menstruation_date: Option<String>,
    /// Whether the menstrual cycle is regular (default false)
    #[serde(default)]
    pub is_regular_cycle: bool,
    /// Whether currently pregnant (default false)
    #[serde(default)]
    pub is_pregnant: bool,
    /// Week of pregnancy, 0-42 (default 0, meaningful only when pregnant)
    #[serde(default)]
    pub pregnancy_week: i64,
    /// Activity level: sedentary, lightly_active, moderately_active, very_active, extremely_active
    #[serde(default = "default_activity_level")]
    pub activity_level: String,
    /// Diet preference: balanced, vegan, keto, low_carb, high_protein
    #[serde(default = "default_diet_type")]
    pub diet_type: String,
    /// Medical conditions, comma separated (optional)
    pub conditions: Option<String>,
    /// Food allergies or intolerances, comma separated (optional)
    pub allergies: Option<String>,
}

fn default_activity_level() -> String { "sedentary".to_string() }
fn default_diet_type() -> String { "balanced".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetProfileParams {
    /// User ID
    pub user_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NutritionSummaryParams {
    /// User ID
    pub user_id: i64,
    /// Current mood for the daily check-in: happy, neutral, stressed, tired (optional)
    pub mood: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DetailedAdviceParams {
    /// User ID
    pub user_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateAdviceParams {
    /// User ID
    pub user_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NutritionTipsParams {
    /// User ID
    pub user_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ChatTurnParam {
    /// Role of the turn: user or assistant
    pub role: String,
    /// Message content
    pub content: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NutritionChatParams {
    /// User ID (profile context is added when a profile exists)
    pub user_id: i64,
    /// Prior conversation turns, oldest first (optional)
    #[serde(default)]
    pub history: Vec<ChatTurnParam>,
    /// The current question
    pub query: String,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    build: crate::build_info::BuildInfo,
    profiles: i64,
    generator_configured: bool,
}

fn to_json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn parse_history(history: &[ChatTurnParam]) -> Result<Vec<ChatTurn>, String> {
    history
        .iter()
        .map(|turn| {
            ChatRole::from_str(&turn.role)
                .map(|role| ChatTurn {
                    role,
                    content: turn.content.clone(),
                })
                .ok_or_else(|| format!("Unknown chat role: {}", turn.role))
        })
        .collect()
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl NourishService {
    #[tool(description = "Get the current status of the Nourish service including build info and database status")]
    fn get_status(&self) -> Result<CallToolResult, McpError> {
        let profiles = self
            .database
            .with_conn(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))?;
                Ok(count)
            })
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        to_json_result(&StatusResponse {
            build: crate::build_info::BuildInfo::current(),
            profiles,
            generator_configured: self.generator.is_some(),
        })
    }

    #[tool(description = "Create or update a user's health profile (age, anthropometrics, cycle and pregnancy data, activity level, diet preference, conditions, allergies)")]
    fn set_profile(&self, Parameters(p): Parameters<SetProfileParams>) -> Result<CallToolResult, McpError> {
        let data = ProfileUpsert {
            user_id: p.user_id,
            full_name: p.full_name,
            age: p.age,
            education: p.education,
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            menstruation_date: p.menstruation_date,
            is_regular_cycle: p.is_regular_cycle,
            is_pregnant: p.is_pregnant,
            pregnancy_week: p.pregnancy_week,
            activity_level: p.activity_level,
            diet_type: p.diet_type,
            conditions: p.conditions,
            allergies: p.allergies,
        };
        let result = profile::set_profile(&self.database, &data)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json_result(&result)
    }

    #[tool(description = "Get a user's stored health profile")]
    fn get_profile(&self, Parameters(p): Parameters<GetProfileParams>) -> Result<CallToolResult, McpError> {
        let result = profile::get_profile(&self.database, p.user_id)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(record) => to_json_result(&record),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "No profile found", "user_id": {}}}"#,
                p.user_id
            ))])),
        }
    }

    #[tool(description = "Get the dashboard nutrition summary: BMI, quick calorie estimate, macro targets, water intake, risk flags, sample meal plan, and exercise recommendations")]
    fn get_nutrition_summary(&self, Parameters(p): Parameters<NutritionSummaryParams>) -> Result<CallToolResult, McpError> {
        let mood = match p.mood.as_deref() {
            Some(s) => Some(
                Mood::from_str(s)
                    .ok_or_else(|| McpError::internal_error(format!("Unknown mood: {}", s), None))?,
            ),
            None => None,
        };
        let result = nutrition::nutrition_summary(&self.database, p.user_id, mood)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json_result(&result)
    }

    #[tool(description = "Get the detailed advice view: activity-adjusted calorie estimate, macro targets, cycle information, special considerations, and the advice prompt")]
    fn get_detailed_advice(&self, Parameters(p): Parameters<DetailedAdviceParams>) -> Result<CallToolResult, McpError> {
        let result = advice::detailed_advice(&self.database, p.user_id, Self::today())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json_result(&result)
    }

    #[tool(description = "Compute the detailed advice view and generate narrative advice with the remote model. Plan fields are returned even if generation fails.")]
    async fn generate_advice(&self, Parameters(p): Parameters<GenerateAdviceParams>) -> Result<CallToolResult, McpError> {
        let result = advice::generate_advice(
            &self.database,
            self.generator.as_deref(),
            p.user_id,
            Self::today(),
        )
        .await
        .map_err(|e| McpError::internal_error(e, None))?;
        to_json_result(&result)
    }

    #[tool(description = "Generate personalized nutrition tips for the dashboard, falling back to advisory flags when the remote model is unavailable")]
    async fn get_nutrition_tips(&self, Parameters(p): Parameters<NutritionTipsParams>) -> Result<CallToolResult, McpError> {
        let result = advice::nutrition_tips(
            &self.database,
            self.generator.as_deref(),
            p.user_id,
            Self::today(),
        )
        .await
        .map_err(|e| McpError::internal_error(e, None))?;
        to_json_result(&result)
    }

    #[tool(description = "Ask the nutrition assistant a question, with profile context and recent chat history")]
    async fn nutrition_chat(&self, Parameters(p): Parameters<NutritionChatParams>) -> Result<CallToolResult, McpError> {
        let history =
            parse_history(&p.history).map_err(|e| McpError::internal_error(e, None))?;
        let result = advice::chat(
            &self.database,
            self.generator.as_deref(),
            p.user_id,
            &history,
            &p.query,
        )
        .await
        .map_err(|e| McpError::internal_error(e, None))?;
        to_json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NourishService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nourish".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nourish Nutrition Server".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nourish - Personalized nutrition planning and advice. \
                 Profiles: set_profile/get_profile (age, height, weight, cycle and pregnancy data, \
                 activity level, diet preference, conditions, allergies). \
                 Planning: get_nutrition_summary for the quick dashboard view, \
                 get_detailed_advice for the activity-adjusted view. \
                 The two views use different calorie estimators and macro splits by design. \
                 Generation: generate_advice and get_nutrition_tips call the remote model and \
                 always return the deterministic plan fields even when generation fails; \
                 nutrition_chat answers free-form questions with profile context."
                    .into(),
            ),
        }
    }
}
