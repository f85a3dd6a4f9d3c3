//! Utility to set a health profile in the database

use std::path::PathBuf;

use nourish::models::ProfileUpsert;

fn get_database_path() -> PathBuf {
    std::env::var("NOURISH_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            std::fs::create_dir_all(&path).ok();
            path.push("nourish.db");
            path
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = get_database_path();
    println!("Database path: {}", db_path.display());

    let database = nourish::db::Database::new(&db_path)?;

    // Run migrations
    database.with_conn(|conn| {
        nourish::db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    // Set a sample profile for user 1
    let data = ProfileUpsert {
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
        conditions: None,
        allergies: None,
    };

    let result = nourish::tools::profile::set_profile(&database, &data)?;
    println!("Profile set:");
    println!("  User: {}", result.user_id);
    println!("  Name: {}", result.full_name);
    println!("  Updated: {}", result.updated_at);

    Ok(())
}
