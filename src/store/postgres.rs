//! PostgreSQL backend.

use crate::error::{AppError, ConfigError};
use crate::model::{NewStudent, Student};
use crate::sql::{self, QueryBuf, TableRef};
use crate::store::{not_found, StudentStore};
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgStudentStore {
    pool: PgPool,
    table: TableRef,
}

impl PgStudentStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgStudentStore {
            pool,
            table: TableRef::new(schema, "students"),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn table(&self) -> &TableRef {
        &self.table
    }

    async fn query_many(&self, q: QueryBuf) -> Result<Vec<Student>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Student>(&q.sql);
        for p in q.params {
            query = p.bind_to(query);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Runs a statement that must return a row. No row is a server fault, not a 404.
    async fn query_one(&self, q: QueryBuf) -> Result<Student, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Student>(&q.sql);
        for p in q.params {
            query = p.bind_to(query);
        }
        query.fetch_one(&self.pool).await.map_err(returning_error)
    }

    async fn query_optional(&self, q: QueryBuf) -> Result<Option<Student>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Student>(&q.sql);
        for p in q.params {
            query = p.bind_to(query);
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn list_all(&self) -> Result<Vec<Student>, AppError> {
        self.query_many(sql::select_all(&self.table)).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Student, AppError> {
        self.query_optional(sql::select_by_id(&self.table, id))
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn list_by_major(&self, major: &str) -> Result<Vec<Student>, AppError> {
        self.query_many(sql::select_by_major(&self.table, major)).await
    }

    async fn list_by_name(&self, substring: &str) -> Result<Vec<Student>, AppError> {
        self.query_many(sql::select_by_name(&self.table, substring)).await
    }

    async fn list_by_min_gpa(&self, threshold: f64) -> Result<Vec<Student>, AppError> {
        self.query_many(sql::select_by_min_gpa(&self.table, threshold)).await
    }

    async fn insert(&self, student: NewStudent) -> Result<Student, AppError> {
        self.query_one(sql::insert(&self.table, &student)).await
    }

    async fn update(&self, id: i32, student: NewStudent) -> Result<Student, AppError> {
        self.query_optional(sql::update(&self.table, id, &student))
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), AppError> {
        self.query_optional(sql::delete(&self.table, id))
            .await?
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Connect to the `postgres` admin database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = admin_connect_options(database_url)?;
    let Some(db_name) = db_name.filter(|n| !n.is_empty() && n.as_str() != "postgres") else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` admin database on the same server, plus the target database name.
fn admin_connect_options(url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let opts = PgConnectOptions::from_str(url).map_err(|e| ConfigError::Invalid {
        key: "DATABASE_URL",
        message: e.to_string(),
    })?;
    let db_name = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

fn returning_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::RowNotFound => AppError::Db(sqlx::Error::Protocol("statement returned no row".into())),
        other => other.into(),
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
