//! Delegates every call to the configured `StudentStore`.

use crate::error::AppError;
use crate::model::{NewStudent, Student};
use crate::store::StudentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        StudentService { store }
    }

    pub async fn get_all_students(&self) -> Result<Vec<Student>, AppError> {
        self.store.list_all().await
    }

    pub async fn get_student_by_id(&self, id: i32) -> Result<Student, AppError> {
        self.store.get_by_id(id).await
    }

    pub async fn get_students_by_major(&self, major: &str) -> Result<Vec<Student>, AppError> {
        self.store.list_by_major(major).await
    }

    pub async fn get_students_by_name(&self, search: &str) -> Result<Vec<Student>, AppError> {
        self.store.list_by_name(search).await
    }

    pub async fn get_honors_students(&self, gpa: f64) -> Result<Vec<Student>, AppError> {
        self.store.list_by_min_gpa(gpa).await
    }

    pub async fn add_new_student(&self, student: NewStudent) -> Result<Student, AppError> {
        self.store.insert(student).await
    }

    pub async fn update_student(&self, id: i32, student: NewStudent) -> Result<Student, AppError> {
        self.store.update(id, student).await
    }

    pub async fn delete_student_by_id(&self, id: i32) -> Result<(), AppError> {
        self.store.delete_by_id(id).await
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }
}
