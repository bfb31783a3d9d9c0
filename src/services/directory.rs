use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::Connection;

use crate::db::queries;
use crate::models::Doctor;

/// Read-side lookups the assistant needs when composing a reply. Kept behind
/// a trait so the responder can be exercised without a database.
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    /// All doctors, ordered by name.
    async fn list_all(&self) -> anyhow::Result<Vec<Doctor>>;

    /// Doctors whose specialty contains `filter`, case-insensitive.
    async fn find_by_specialty(&self, filter: &str) -> anyhow::Result<Vec<Doctor>>;
}

pub struct SqliteDirectory {
    db: Arc<Mutex<Connection>>,
}

impl SqliteDirectory {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DoctorDirectory for SqliteDirectory {
    async fn list_all(&self) -> anyhow::Result<Vec<Doctor>> {
        let db = self.db.lock().unwrap();
        queries::list_doctors(&db)
    }

    async fn find_by_specialty(&self, filter: &str) -> anyhow::Result<Vec<Doctor>> {
        let db = self.db.lock().unwrap();
        queries::find_doctors_by_specialty(&db, filter)
    }
}
