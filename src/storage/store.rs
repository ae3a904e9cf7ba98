//! Async handle over the shared SQLite connection
//!
//! rusqlite is blocking, so each call hops onto tokio's blocking pool and
//! holds the connection mutex for exactly one statement.

use std::path::Path;
use std::sync::{Arc, Mutex};
use crate::{Error, Result};
use crate::contact::{Contact, ContactFields};
use super::SqliteStore;

/// Cloneable store handle shared by all requests
#[derive(Clone)]
pub struct ContactStore {
    inner: Arc<Mutex<SqliteStore>>,
}

impl ContactStore {
    pub fn new(store: SqliteStore) -> Self {
        Self { inner: Arc::new(Mutex::new(store)) }
    }

    /// Open (or create) the database file and ensure the table exists
    pub async fn open(path: &Path) -> Result<Self> {
        let path = path.to_path_buf();
        let store = tokio::task::spawn_blocking(move || SqliteStore::open(&path)).await??;
        Ok(Self::new(store))
    }

    /// In-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(SqliteStore::open_in_memory()?))
    }

    async fn with_store<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&SqliteStore) -> Result<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let store = inner.lock().map_err(|_| Error::Poisoned)?;
            op(&*store)
        })
        .await?
    }

    pub async fn list_all(&self) -> Result<Vec<Contact>> {
        self.with_store(|s| s.list_all()).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Contact>> {
        self.with_store(move |s| s.get_by_id(id)).await
    }

    pub async fn insert(&self, fields: ContactFields) -> Result<Contact> {
        self.with_store(move |s| s.insert(&fields)).await
    }

    /// `Ok(false)` when no row matched
    pub async fn update(&self, id: i64, fields: ContactFields) -> Result<bool> {
        self.with_store(move |s| s.update(id, &fields)).await
    }

    /// `Ok(false)` when no row matched
    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.with_store(move |s| s.delete(id)).await
    }

    pub async fn count(&self) -> Result<usize> {
        self.with_store(|s| s.count()).await
    }
}
