use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use super::collection::{Log, LogError, Update};
use crate::models::{Envelope, Record};

/// The service's single collection behind one mutex.
///
/// Every operation, reads included, holds the lock from the first look at
/// the log until the response snapshot is taken, so callers only ever see
/// the log before or after a whole mutation.
#[derive(Debug, Default)]
pub struct LogStore {
    log: Mutex<Log>,
}

impl LogStore {
    pub fn new() -> Self {
        LogStore {
            log: Mutex::new(Log::new()),
        }
    }

    // Mutations swap the whole Vec, so a poisoned guard still holds a
    // consistent log.
    fn lock(&self) -> MutexGuard<'_, Log> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(log: &Log, id: &str) -> Envelope {
        Envelope::new(id, log.records().to_vec())
    }

    pub fn read(&self) -> Envelope {
        let log = self.lock();
        debug!(len = log.len(), "read log");
        Self::snapshot(&log, "")
    }

    /// Replaces the whole log with `records`.
    pub fn create(&self, id: &str, records: Vec<Record>) -> Envelope {
        let mut log = self.lock();
        log.replace(records);
        info!(len = log.len(), "log replaced by create");
        Self::snapshot(&log, id)
    }

    /// Replaces the whole log with the records of `request` if `index` is in
    /// range. Returns `Ok(None)` when the log was empty and nothing changed.
    ///
    /// `request` is the already decoded body; a decode error only surfaces
    /// once the log is known to be non-empty and the index valid.
    pub fn update<E>(
        &self,
        index: i64,
        request: Result<Envelope, E>,
    ) -> Result<Option<Envelope>, E>
    where
        E: From<LogError>,
    {
        let mut log = self.lock();
        let mut id = String::new();
        let outcome = log.update::<E, _>(index, || {
            let envelope = request?;
            id = envelope.id.clone();
            Ok(envelope.into_records())
        })?;
        match outcome {
            Update::Skipped => {
                info!(index, "update on empty log skipped");
                Ok(None)
            }
            Update::Replaced => {
                info!(index, len = log.len(), "log replaced by update");
                Ok(Some(Self::snapshot(&log, &id)))
            }
        }
    }

    /// Removes the last record and returns what is left.
    pub fn delete(&self) -> Result<Envelope, LogError> {
        let mut log = self.lock();
        log.pop()?;
        info!(len = log.len(), "removed last record");
        Ok(Self::snapshot(&log, ""))
    }
}
