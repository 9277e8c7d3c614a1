//! Schema bootstrap for the students table and optional sample data.

use crate::error::AppError;
use crate::model::NewStudent;
use crate::sql::{self, TableRef};
use crate::store::StudentStore;
use sqlx::PgPool;

/// Rows inserted by `seed_fixtures`.
pub const FIXTURES: &[(&str, &str, f64)] = &[
    ("Alex", "csc", 3.55),
    ("Jordan", "csc", 3.8),
    ("Sam", "math", 3.2),
    ("Riley", "bio", 2.9),
    ("Casey", "csc", 3.65),
];

/// CREATE SCHEMA and CREATE TABLE, both IF NOT EXISTS.
pub async fn ensure_students_table(pool: &PgPool, table: &TableRef) -> Result<(), AppError> {
    sqlx::query(&sql::create_schema(table)).execute(pool).await?;
    sqlx::query(&sql::create_table(table)).execute(pool).await?;
    tracing::info!(table = %table.qualified(), "students table ready");
    Ok(())
}

/// Insert `FIXTURES` when the store is empty. Returns how many rows were added.
pub async fn seed_fixtures(store: &dyn StudentStore) -> Result<usize, AppError> {
    if !store.list_all().await?.is_empty() {
        return Ok(0);
    }
    for (name, major, gpa) in FIXTURES {
        store.insert(NewStudent::new(*name, Some(*major), *gpa)).await?;
    }
    tracing::info!(count = FIXTURES.len(), "seeded fixture students");
    Ok(FIXTURES.len())
}
