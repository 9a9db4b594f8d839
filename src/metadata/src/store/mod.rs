//! Whole-file JSON collection storage.
//!
//! A collection is a JSON array persisted in a single file. Every operation
//! reads the entire file, mutations rewrite it entirely. Nothing is cached
//! between calls.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;
use tracing::warn;
use uuid::Uuid;

use crate::Result;

/// Outcome of a mutation closure passed to [`JsonStore::mutate`].
pub enum Mutation<R> {
    /// Persist the modified collection and return the value.
    Commit(R),
    /// Leave the file untouched.
    Discard(R),
}

pub struct JsonStore<T> {
    path: PathBuf,
    // Held for the whole read-modify-write cycle when present. Without it
    // concurrent mutations race and the last writer wins.
    write_lock: Option<Mutex<()>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where T: Serialize + DeserializeOwned + Send + Sync
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: None,
            _record: PhantomData,
        }
    }

    pub fn with_serialized_writes(self, enabled: bool) -> Self {
        Self {
            path: self.path,
            write_lock: enabled.then(|| Mutex::new(())),
            _record: PhantomData,
        }
    }

    /// Reads the whole collection. A missing, unreadable or malformed file is
    /// an empty collection.
    pub async fn load(&self) -> Vec<T> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("collection file {:?} doesn't exist yet", self.path);
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "can't read collection file {:?}, treating as empty: {}",
                    self.path, err
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "collection file {:?} is corrupted, treating as empty: {}",
                    self.path, err
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the file with the pretty-printed collection.
    pub async fn save(&self, records: &[T]) -> Result<()> {
        self.ensure_dir().await;
        let data = serde_json::to_vec_pretty(records)?;
        fs::write(&self.path, data).await?;
        debug!("saved {} records to {:?}", records.len(), self.path);

        Ok(())
    }

    /// Loads the collection, applies `f` and persists the result on
    /// [`Mutation::Commit`].
    pub async fn mutate<R, F>(&self, f: F) -> Result<R>
    where
        R: Send,
        F: FnOnce(&mut Vec<T>) -> Mutation<R> + Send,
    {
        let _guard = match &self.write_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let mut records = self.load().await;
        match f(&mut records) {
            Mutation::Commit(ret) => {
                self.save(&records).await?;
                Ok(ret)
            }
            Mutation::Discard(ret) => Ok(ret),
        }
    }

    async fn ensure_dir(&self) {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => return,
        };

        if fs::metadata(dir).await.is_err() {
            if let Err(err) = fs::create_dir_all(dir).await {
                warn!("can't create data directory {:?}: {}", dir, err);
            }
        }
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Returns the current time, or the smallest instant after `prev` when the
/// clock hasn't moved past it.
pub fn next_updated_at(prev: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > prev {
        now
    } else {
        prev + Duration::nanoseconds(1)
    }
}
