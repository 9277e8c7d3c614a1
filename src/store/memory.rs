//! In-process backend with the same semantics as the PostgreSQL one.

use crate::error::AppError;
use crate::model::{NewStudent, Student};
use crate::store::{not_found, StudentStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i32, Student>,
    next_id: i32,
}

/// Rows keyed by id, so iteration order is id order.
#[derive(Default)]
pub struct MemoryStudentStore {
    inner: RwLock<Inner>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn filter<F>(&self, pred: F) -> Result<Vec<Student>, AppError>
    where
        F: Fn(&Student) -> bool,
    {
        let inner = self.read();
        Ok(inner.rows.values().filter(|s| pred(*s)).cloned().collect())
    }

    // Every write is a single map operation, so a poisoned lock still guards consistent rows.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn list_all(&self) -> Result<Vec<Student>, AppError> {
        self.filter(|_| true)
    }

    async fn get_by_id(&self, id: i32) -> Result<Student, AppError> {
        self.read().rows.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    async fn list_by_major(&self, major: &str) -> Result<Vec<Student>, AppError> {
        self.filter(|s| s.major.as_deref() == Some(major))
    }

    async fn list_by_name(&self, substring: &str) -> Result<Vec<Student>, AppError> {
        self.filter(|s| s.name.contains(substring))
    }

    async fn list_by_min_gpa(&self, threshold: f64) -> Result<Vec<Student>, AppError> {
        self.filter(|s| s.gpa >= threshold)
    }

    async fn insert(&self, student: NewStudent) -> Result<Student, AppError> {
        let mut inner = self.write();
        inner.next_id += 1;
        let row = student.with_id(inner.next_id);
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, student: NewStudent) -> Result<Student, AppError> {
        let mut inner = self.write();
        let slot = inner.rows.get_mut(&id).ok_or_else(|| not_found(id))?;
        *slot = student.with_id(id);
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), AppError> {
        self.write()
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn fixture() -> MemoryStudentStore {
        let store = MemoryStudentStore::new();
        for (name, major, gpa) in [
            ("Alex", "csc", 3.55),
            ("Jordan", "csc", 3.8),
            ("Sam", "math", 3.2),
            ("Alexis", "bio", 3.6),
        ] {
            store.insert(NewStudent::new(name, Some(major), gpa)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = MemoryStudentStore::new();
        let s = NewStudent::new("Kim", None, 2.5);
        let created = store.insert(s.clone()).await.unwrap();
        assert_eq!(store.get_by_id(created.id).await.unwrap(), s.with_id(created.id));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = fixture().await;
        store.delete_by_id(4).await.unwrap();
        let s = store.insert(NewStudent::new("New", None, 1.0)).await.unwrap();
        assert_eq!(s.id, 5);
    }

    #[tokio::test]
    async fn filters() {
        let store = fixture().await;
        let csc = store.list_by_major("csc").await.unwrap();
        assert_eq!(csc.len(), 2);
        assert!(csc.iter().all(|s| s.major.as_deref() == Some("csc")));

        assert_eq!(store.list_by_name("").await.unwrap().len(), 4);
        let alex: Vec<_> = store.list_by_name("Alex").await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(alex, vec!["Alex", "Alexis"]);
        assert!(store.list_by_name("%").await.unwrap().is_empty());

        let honors: Vec<_> = store.list_by_min_gpa(3.6).await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(honors, vec![2, 4]);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = fixture().await;
        assert!(matches!(store.get_by_id(99).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            store.update(99, NewStudent::new("x", None, 0.0)).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(store.delete_by_id(99).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_keeps_id() {
        let store = fixture().await;
        let updated = store
            .update(2, NewStudent::new("sampleUpdated", Some("csc"), 3.92))
            .await
            .unwrap();
        assert_eq!(updated.id, 2);
        assert_eq!(store.get_by_id(2).await.unwrap().name, "sampleUpdated");
    }
}
