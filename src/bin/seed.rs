//! Wipes both tables and loads demo users and courses from a JSON file.
//! Usage: `cargo run --bin seed` (override the file with SEED_FILE).

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use course_catalog::auth::password::hash_password;
use course_catalog::config::AppConfig;
use course_catalog::state::connect_pool;
use course_catalog::{courses, users};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedFile {
    users: Vec<SeedUser>,
    courses: Vec<SeedCourse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedUser {
    first_name: String,
    last_name: String,
    email_address: String,
    password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedCourse {
    title: String,
    description: String,
    estimated_time: Option<String>,
    materials_needed: Option<String>,
    /// 1-based position of the owner in the `users` list above.
    user_id: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let path = std::env::var("SEED_FILE").unwrap_or_else(|_| "data/seed.json".into());
    let raw = std::fs::read_to_string(&path).with_context(|| format!("read seed file {path}"))?;
    let seed: SeedFile = serde_json::from_str(&raw).context("parse seed file")?;

    let config = AppConfig::from_env()?;
    let db = connect_pool(&config).await?;
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("run migrations")?;

    info!("clearing existing data");
    sqlx::query("DELETE FROM courses").execute(&db).await?;
    sqlx::query("DELETE FROM users").execute(&db).await?;

    let mut inserted_ids = Vec::with_capacity(seed.users.len());
    for user in &seed.users {
        let hash = hash_password(&user.password)?;
        let row = users::repo::insert(
            &db,
            &user.first_name,
            &user.last_name,
            &user.email_address,
            &hash,
        )
        .await
        .with_context(|| format!("insert user {}", user.email_address))?;
        info!(user_id = row.id, email = %row.email_address, "inserted user");
        inserted_ids.push(row.id);
    }

    for course in seed.courses {
        let owner_id = *inserted_ids
            .get(course.user_id.wrapping_sub(1))
            .with_context(|| format!("course {:?} references unknown seed user", course.title))?;
        let row = courses::repo::insert(
            &db,
            owner_id,
            courses::repo::NewCourse {
                title: course.title,
                description: course.description,
                estimated_time: course.estimated_time,
                materials_needed: course.materials_needed,
            },
        )
        .await?;
        info!(course_id = row.id, owner_id, title = %row.title, "inserted course");
    }

    info!("database seeding completed");
    Ok(())
}
