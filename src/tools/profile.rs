//! Profile tools
//!
//! Saving and loading the stored health profile.

use serde::Serialize;

use crate::db::Database;
use crate::models::{ProfileRecord, ProfileUpsert};

/// Response for set_profile
#[derive(Debug, Serialize)]
pub struct SetProfileResponse {
    pub user_id: i64,
    pub full_name: String,
    pub updated_at: String,
}

/// Create or replace a user's profile.
///
/// The data is converted to an engine profile first, so invalid input is
/// rejected before anything reaches the store.
pub fn set_profile(db: &Database, data: &ProfileUpsert) -> Result<SetProfileResponse, String> {
    data.to_engine().map_err(|e| e.to_string())?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let record = ProfileRecord::set(&conn, data)
        .map_err(|e| format!("Failed to save profile: {}", e))?;

    Ok(SetProfileResponse {
        user_id: record.user_id,
        full_name: record.full_name,
        updated_at: record.updated_at,
    })
}

/// Get a user's stored profile, if any
pub fn get_profile(db: &Database, user_id: i64) -> Result<Option<ProfileRecord>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    ProfileRecord::get(&conn, user_id).map_err(|e| format!("Failed to load profile: {}", e))
}

/// Load a profile or explain that it is missing
pub(crate) fn require_profile(db: &Database, user_id: i64) -> Result<ProfileRecord, String> {
    get_profile(db, user_id)?.ok_or_else(|| {
        format!(
            "No profile found for user {}. Complete the profile with set_profile first.",
            user_id
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    // Each test gets its own named in-memory database so tests can run
    // in parallel without sharing state.
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

    fn sample_upsert() -> ProfileUpsert {
        ProfileUpsert {
            user_id: 7,
            full_name: "Layla Noor".to_string(),
            age: 34,
            education: None,
            height_cm: 170.0,
            weight_kg: 64.0,
            menstruation_date: None,
            is_regular_cycle: false,
            is_pregnant: false,
            pregnancy_week: 0,
            activity_level: "moderately_active".to_string(),
            diet_type: "vegan".to_string(),
            conditions: None,
            allergies: Some("peanuts".to_string()),
        }
    }

    #[test]
    fn test_set_and_get_profile() {
        let db = test_db("profile_set_get");
        let saved = set_profile(&db, &sample_upsert()).unwrap();
        assert_eq!(saved.user_id, 7);

        let loaded = get_profile(&db, 7).unwrap().unwrap();
        assert_eq!(loaded.full_name, "Layla Noor");
    }

    #[test]
    fn test_set_profile_rejects_invalid_input_before_saving() {
        let db = test_db("profile_rejects_invalid");
        let mut data = sample_upsert();
        data.age = 150;

        assert!(set_profile(&db, &data).is_err());
        assert!(get_profile(&db, 7).unwrap().is_none());
    }

    #[test]
    fn test_require_profile_explains_missing_row() {
        let db = test_db("profile_missing_row");
        let err = require_profile(&db, 99).unwrap_err();
        assert!(err.contains("set_profile"));
    }
}
