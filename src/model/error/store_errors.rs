use std::backtrace::Backtrace;
use std::fmt::{Display, Formatter};

/// a failure inside the persistent store. Every operation that touches the store can produce one of these,
/// and the in-progress operation is always aborted when it happens
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum StoreError {
    /// the database could not be opened or its schema could not be created
    Connection(String),
    /// a statement failed to prepare or run
    Query(String),
}

impl StoreError {
    /// logs the database error (with a backtrace, since these are hard to trace back otherwise) and wraps it
    pub fn from_db(action: &str, e: rusqlite::Error) -> Self {
        log::error!(
            "Failed to {action}! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        Self::Query(e.to_string())
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(message) => write!(f, "could not open the database: {message}"),
            Self::Query(message) => write!(f, "database query failed: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}
