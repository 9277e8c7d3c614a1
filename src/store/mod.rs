//! Data access for students: the `StudentStore` trait and its backends.

mod memory;
mod postgres;

pub use memory::MemoryStudentStore;
pub use postgres::{ensure_database_exists, PgStudentStore};

use crate::error::AppError;
use crate::model::{NewStudent, Student};
use async_trait::async_trait;

/// CRUD and filtered lookups over the students table. Every list is ordered by id.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Student>, AppError>;

    /// Fails with `NotFound` when no row has this id.
    async fn get_by_id(&self, id: i32) -> Result<Student, AppError>;

    async fn list_by_major(&self, major: &str) -> Result<Vec<Student>, AppError>;

    /// Rows whose name contains `substring`; the empty string matches everything.
    async fn list_by_name(&self, substring: &str) -> Result<Vec<Student>, AppError>;

    async fn list_by_min_gpa(&self, threshold: f64) -> Result<Vec<Student>, AppError>;

    async fn insert(&self, student: NewStudent) -> Result<Student, AppError>;

    async fn update(&self, id: i32, student: NewStudent) -> Result<Student, AppError>;

    async fn delete_by_id(&self, id: i32) -> Result<(), AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

pub(crate) fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("student {}", id))
}
