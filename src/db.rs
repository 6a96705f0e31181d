use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{MySqlPool, SqlitePool};
use std::str::FromStr;
use tracing::info;

const MYSQL_SCHEMA: [&str; 5] = [
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        sex VARCHAR(16) NOT NULL,
        date_of_birth DATE NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS roles (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        date_start DATE NOT NULL,
        date_end DATE NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS activity_types (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS activities (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        `date` DATE NOT NULL,
        hours_of_work INT UNSIGNED NOT NULL,
        employee_id BIGINT NULL,
        project_id BIGINT NULL,
        role_id BIGINT NULL,
        activity_type_id BIGINT NULL,
        INDEX idx_activities_employee_date (employee_id, `date`),
        CONSTRAINT fk_activities_employee FOREIGN KEY (employee_id) REFERENCES employees (id),
        CONSTRAINT fk_activities_project FOREIGN KEY (project_id) REFERENCES projects (id),
        CONSTRAINT fk_activities_role FOREIGN KEY (role_id) REFERENCES roles (id),
        CONSTRAINT fk_activities_activity_type FOREIGN KEY (activity_type_id) REFERENCES activity_types (id)
    )
    "#,
];

const SQLITE_SCHEMA: [&str; 6] = [
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        sex TEXT NOT NULL,
        date_of_birth TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS roles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        date_start TEXT NOT NULL,
        date_end TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS activity_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS activities (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        `date` TEXT NOT NULL,
        hours_of_work INTEGER NOT NULL,
        employee_id INTEGER NULL REFERENCES employees (id),
        project_id INTEGER NULL REFERENCES projects (id),
        role_id INTEGER NULL REFERENCES roles (id),
        activity_type_id INTEGER NULL REFERENCES activity_types (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_activities_employee_date ON activities (employee_id, `date`)",
];

pub async fn init_db(database_url: &str) -> Result<MySqlPool> {
    let pool = MySqlPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Creates the tables that are missing. Existing tables are left as they are.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<()> {
    for statement in MYSQL_SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to create schema")?;
    }

    info!("Database schema ready");
    Ok(())
}

/// Opens a SQLite database with foreign keys enforced.
///
/// The pool holds a single connection that never expires, so `sqlite::memory:`
/// gives every pool its own database that lives as long as the pool does.
pub async fn init_sqlite(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid SQLite url {}", database_url))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("Failed to open SQLite database")?;

    for statement in SQLITE_SCHEMA {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .context("Failed to create schema")?;
    }

    info!(database_url, "SQLite schema ready");
    Ok(pool)
}
