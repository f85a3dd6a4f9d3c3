//! Stored health profile
//!
//! One row per user. The engine never reads this directly; callers
//! convert a record into a validated `engine::Profile` value first.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::engine::{ActivityLevel, DietType, EngineError, EngineResult, Profile};

/// A stored health profile row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub age: i64,
    pub education: Option<String>,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// ISO date, absent when pregnant or not tracked
    pub menstruation_date: Option<String>,
    pub is_regular_cycle: bool,
    pub is_pregnant: bool,
    pub pregnancy_week: i64,
    pub activity_level: String,
    pub diet_type: String,
    /// Comma-separated free-text labels
    pub conditions: Option<String>,
    /// Comma-separated free-text labels
    pub allergies: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating or replacing a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpsert {
    pub user_id: i64,
    pub full_name: String,
    pub age: i64,
    pub education: Option<String>,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub menstruation_date: Option<String>,
    pub is_regular_cycle: bool,
    pub is_pregnant: bool,
    pub pregnancy_week: i64,
    pub activity_level: String,
    pub diet_type: String,
    pub conditions: Option<String>,
    pub allergies: Option<String>,
}

/// Split a comma-separated label field into trimmed, non-empty labels
pub fn split_labels(field: Option<&str>) -> Vec<String> {
    field
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl ProfileUpsert {
    /// Convert into the engine's validated profile value.
    ///
    /// Malformed fields (bad date, unknown enum string, negative age)
    /// are input-validation errors, never engine faults. Called before
    /// saving so invalid data never reaches the store.
    pub fn to_engine(&self) -> EngineResult<Profile> {
        let age = u32::try_from(self.age).map_err(|_| {
            EngineError::InvalidProfile(format!("age must be non-negative, got {}", self.age))
        })?;

        let pregnancy_week = u32::try_from(self.pregnancy_week).map_err(|_| {
            EngineError::InvalidProfile(format!(
                "pregnancy week must be non-negative, got {}",
                self.pregnancy_week
            ))
        })?;

        let menstruation_date = self
            .menstruation_date
            .as_deref()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                    EngineError::InvalidProfile(format!("malformed menstruation date: {}", s))
                })
            })
            .transpose()?;

        let activity_level = ActivityLevel::from_str(&self.activity_level).ok_or_else(|| {
            EngineError::InvalidProfile(format!(
                "unknown activity level: {}",
                self.activity_level
            ))
        })?;

        let diet_type = DietType::from_str(&self.diet_type).ok_or_else(|| {
            EngineError::InvalidProfile(format!("unknown diet type: {}", self.diet_type))
        })?;

        let profile = Profile {
            age,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            is_pregnant: self.is_pregnant,
            pregnancy_week,
            menstruation_date,
            is_regular_cycle: self.is_regular_cycle,
            activity_level,
            diet_type,
            conditions: split_labels(self.conditions.as_deref()),
            allergies: split_labels(self.allergies.as_deref()),
        };
        profile.validate()?;
        Ok(profile)
    }
}

impl ProfileRecord {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            full_name: row.get("full_name")?,
            age: row.get("age")?,
            education: row.get("education")?,
            height_cm: row.get("height_cm")?,
            weight_kg: row.get("weight_kg")?,
            menstruation_date: row.get("menstruation_date")?,
            is_regular_cycle: row.get("is_regular_cycle")?,
            is_pregnant: row.get("is_pregnant")?,
            pregnancy_week: row.get("pregnancy_week")?,
            activity_level: row.get("activity_level")?,
            diet_type: row.get("diet_type")?,
            conditions: row.get("conditions")?,
            allergies: row.get("allergies")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the profile for a user
    pub fn get(conn: &Connection, user_id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM profiles WHERE user_id = ?1")?;

        let result = stmt.query_row([user_id], Self::from_row);
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Create or replace the profile for a user (upsert on user_id)
    pub fn set(conn: &Connection, data: &ProfileUpsert) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO profiles (
                user_id, full_name, age, education, height_cm, weight_kg,
                menstruation_date, is_regular_cycle, is_pregnant, pregnancy_week,
                activity_level, diet_type, conditions, allergies
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            ON CONFLICT(user_id) DO UPDATE SET
                full_name = excluded.full_name,
                age = excluded.age,
                education = excluded.education,
                height_cm = excluded.height_cm,
                weight_kg = excluded.weight_kg,
                menstruation_date = excluded.menstruation_date,
                is_regular_cycle = excluded.is_regular_cycle,
                is_pregnant = excluded.is_pregnant,
                pregnancy_week = excluded.pregnancy_week,
                activity_level = excluded.activity_level,
                diet_type = excluded.diet_type,
                conditions = excluded.conditions,
                allergies = excluded.allergies,
                updated_at = datetime('now')
            "#,
            params![
                data.user_id,
                data.full_name,
                data.age,
                data.education,
                data.height_cm,
                data.weight_kg,
                data.menstruation_date,
                data.is_regular_cycle,
                data.is_pregnant,
                data.pregnancy_week,
                data.activity_level,
                data.diet_type,
                data.conditions,
                data.allergies,
            ],
        )?;

        Self::get(conn, data.user_id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Copy the mutable fields back into upsert form
    pub fn to_upsert(&self) -> ProfileUpsert {
        ProfileUpsert {
            user_id: self.user_id,
            full_name: self.full_name.clone(),
            age: self.age,
            education: self.education.clone(),
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            menstruation_date: self.menstruation_date.clone(),
            is_regular_cycle: self.is_regular_cycle,
            is_pregnant: self.is_pregnant,
            pregnancy_week: self.pregnancy_week,
            activity_level: self.activity_level.clone(),
            diet_type: self.diet_type.clone(),
            conditions: self.conditions.clone(),
            allergies: self.allergies.clone(),
        }
    }

    /// Convert into the engine's validated profile value
    pub fn to_engine(&self) -> EngineResult<Profile> {
        self.to_upsert().to_engine()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn sample_upsert() -> ProfileUpsert {
        ProfileUpsert {
            user_id: 1,
            full_name: "Amira Hassan".to_string(),
            age: 28,
            education: Some("Graduate".to_string()),
            height_cm: 165.0,
            weight_kg: 60.0,
            menstruation_date: Some("2025-03-01".to_string()),
            is_regular_cycle: true,
            is_pregnant: false,
            pregnancy_week: 0,
            activity_level: "lightly_active".to_string(),
            diet_type: "balanced".to_string(),
            conditions: Some("anemia, hypothyroidism".to_string()),
            allergies: None,
        }
    }

    #[test]
    fn test_get_missing_profile_returns_none() {
        let conn = test_conn();
        assert!(ProfileRecord::get(&conn, 42).unwrap().is_none());
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let conn = test_conn();
        let saved = ProfileRecord::set(&conn, &sample_upsert()).unwrap();
        assert_eq!(saved.full_name, "Amira Hassan");

        let loaded = ProfileRecord::get(&conn, 1).unwrap().unwrap();
        assert_eq!(loaded.age, 28);
        assert_eq!(loaded.height_cm, 165.0);
        assert_eq!(loaded.menstruation_date.as_deref(), Some("2025-03-01"));
        assert!(loaded.is_regular_cycle);
    }

    #[test]
    fn test_set_twice_updates_in_place() {
        let conn = test_conn();
        ProfileRecord::set(&conn, &sample_upsert()).unwrap();

        let mut update = sample_upsert();
        update.weight_kg = 62.5;
        let saved = ProfileRecord::set(&conn, &update).unwrap();

        assert_eq!(saved.weight_kg, 62.5);
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_to_engine_conversion() {
        let conn = test_conn();
        let record = ProfileRecord::set(&conn, &sample_upsert()).unwrap();
        let profile = record.to_engine().unwrap();

        assert_eq!(profile.age, 28);
        assert_eq!(profile.activity_level, ActivityLevel::LightlyActive);
        assert_eq!(profile.diet_type, DietType::Balanced);
        assert_eq!(
            profile.conditions,
            vec!["anemia".to_string(), "hypothyroidism".to_string()]
        );
        assert!(profile.allergies.is_empty());
        assert_eq!(
            profile.menstruation_date,
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
    }

    #[test]
    fn test_to_engine_rejects_malformed_date() {
        let conn = test_conn();
        let mut data = sample_upsert();
        data.menstruation_date = Some("03/01/2025".to_string());
        let record = ProfileRecord::set(&conn, &data).unwrap();
        assert!(record.to_engine().is_err());
    }

    #[test]
    fn test_split_labels() {
        assert_eq!(
            split_labels(Some("anemia, diabetes ,  ")),
            vec!["anemia".to_string(), "diabetes".to_string()]
        );
        assert!(split_labels(Some("")).is_empty());
        assert!(split_labels(None).is_empty());
    }
}
