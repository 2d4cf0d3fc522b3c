// SPDX-License-Identifier: Apache-2.0

use crate::config::IN_MEMORY_DATABASE;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use stockroom_store::{open_database, open_in_memory, StoreError};

/// The process-wide SQLite connection. Every store call runs on the blocking
/// pool while holding the lock, so calls are serialized.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    #[must_use]
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = if path == IN_MEMORY_DATABASE {
            open_in_memory()?
        } else {
            open_database(Path::new(path))?
        };
        Ok(Self::new(conn))
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self::new(open_in_memory()?))
    }

    pub async fn call<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))?;
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("store task failed: {e}")))?
    }
}
