use thiserror::Error;

use crate::models::Record;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LogError {
    #[error("index {index} out of range for log of length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("log is empty")]
    Empty,
}

/// What an update did to the log.
#[derive(Debug, PartialEq, Eq)]
pub enum Update {
    /// The log was empty, nothing was touched.
    Skipped,
    Replaced,
}

/// The ordered collection of records. Indices are contiguous and 0-based.
#[derive(Debug, Default, Clone)]
pub struct Log {
    records: Vec<Record>,
}

impl Log {
    pub fn new() -> Self {
        Log { records: vec![] }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Swaps in `records` wholesale. Nothing from the previous contents survives.
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Checks `index` against the current length, then replaces everything
    /// with what `records` yields.
    ///
    /// An empty log skips the update before the index is looked at or
    /// `records` is called. The index only gates the update; it does not
    /// pick an element.
    pub fn update<E, F>(&mut self, index: i64, records: F) -> Result<Update, E>
    where
        E: From<LogError>,
        F: FnOnce() -> Result<Vec<Record>, E>,
    {
        if self.records.is_empty() {
            return Ok(Update::Skipped);
        }
        let in_range = usize::try_from(index).map_or(false, |i| i < self.records.len());
        if !in_range {
            return Err(LogError::IndexOutOfRange {
                index,
                len: self.records.len(),
            }
            .into());
        }
        self.replace(records()?);
        Ok(Update::Replaced)
    }

    /// Drops the tail record.
    pub fn pop(&mut self) -> Result<Record, LogError> {
        self.records.pop().ok_or(LogError::Empty)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn log_of(bodies: &[&str]) -> Log {
        let mut log = Log::new();
        log.replace(bodies.iter().map(|b| Record::new(*b)).collect());
        log
    }

    fn bodies(log: &Log) -> Vec<&str> {
        log.records().iter().map(|r| r.body.as_str()).collect()
    }

    #[test]
    fn replace_discards_previous_contents() {
        let mut log = log_of(&["a", "b", "c"]);
        log.replace(vec![Record::new("x")]);
        assert_eq!(bodies(&log), vec!["x"]);
    }

    fn ok(bodies: &[&str]) -> Result<Vec<Record>, LogError> {
        Ok(bodies.iter().map(|b| Record::new(*b)).collect())
    }

    #[test]
    fn update_on_empty_is_skipped() {
        let mut log = Log::new();
        assert_eq!(log.update(7, || ok(&["x"])), Ok(Update::Skipped));
        assert_eq!(log.update(-1, || ok(&["x"])), Ok(Update::Skipped));
        assert!(log.is_empty());
    }

    #[test]
    fn update_on_empty_never_asks_for_records() {
        let mut log = Log::new();
        let res = log.update(0, || -> Result<Vec<Record>, LogError> {
            panic!("records requested for an empty log")
        });
        assert_eq!(res, Ok(Update::Skipped));
    }

    #[test]
    fn update_out_of_range_leaves_log_alone() {
        let mut log = log_of(&["a", "b"]);
        let res = log.update(2, || ok(&["x"]));
        assert_eq!(res, Err(LogError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(bodies(&log), vec!["a", "b"]);
    }

    #[test]
    fn update_negative_index_is_out_of_range() {
        let mut log = log_of(&["a", "b"]);
        let res = log.update(-1, || ok(&["x"]));
        assert_eq!(res, Err(LogError::IndexOutOfRange { index: -1, len: 2 }));
        assert_eq!(bodies(&log), vec!["a", "b"]);
    }

    #[test]
    fn update_records_error_leaves_log_alone() {
        let mut log = log_of(&["a", "b"]);
        let res = log.update(0, || Err(LogError::Empty));
        assert_eq!(res, Err(LogError::Empty));
        assert_eq!(bodies(&log), vec!["a", "b"]);
    }

    #[test]
    fn update_in_range_replaces_everything() {
        let mut log = log_of(&["a", "b"]);
        let res = log.update(0, || ok(&["x", "y", "z"]));
        assert_eq!(res, Ok(Update::Replaced));
        assert_eq!(bodies(&log), vec!["x", "y", "z"]);
    }

    #[test]
    fn pop_removes_last() {
        let mut log = log_of(&["a", "b", "c"]);
        assert_eq!(log.pop(), Ok(Record::new("c")));
        assert_eq!(bodies(&log), vec!["a", "b"]);
    }

    #[test]
    fn pop_on_empty() {
        let mut log = Log::new();
        assert_eq!(log.pop(), Err(LogError::Empty));
        assert!(log.is_empty());
    }
}
