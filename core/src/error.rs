//! Error types for the todo service.
//!
//! # Design
//! Each rejected input field gets its own variant so the HTTP layer can
//! report which field failed without inspecting strings. `Display` for the
//! client-facing variants is the exact plain-text body sent back to callers.
//! Anything the store raises lands in `Store`, which is never shown to the
//! client verbatim.

use std::fmt;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by the SQLite store.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),

    /// A persisted row holds a value outside the domain model.
    InvalidData(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Sqlite(err) => write!(f, "{err}"),
            StoreError::InvalidData(msg) => write!(f, "invalid persisted todo: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Sqlite(err) => Some(err),
            StoreError::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        StoreError::Sqlite(value)
    }
}

/// Errors returned by `TodoService` operations.
#[derive(Debug)]
pub enum TodoError {
    InvalidStatus,
    InvalidPriority,
    InvalidCategory,
    InvalidDueDate,

    /// No todo with the requested id. Only raised by single-item fetch.
    NotFound,

    Store(StoreError),
}

impl TodoError {
    /// True for the variants caused by bad client input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            TodoError::InvalidStatus
                | TodoError::InvalidPriority
                | TodoError::InvalidCategory
                | TodoError::InvalidDueDate
        )
    }
}

impl fmt::Display for TodoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoError::InvalidStatus => f.write_str("Invalid Todo Status"),
            TodoError::InvalidPriority => f.write_str("Invalid Todo Priority"),
            TodoError::InvalidCategory => f.write_str("Invalid Todo Category"),
            TodoError::InvalidDueDate => f.write_str("Invalid Due Date"),
            TodoError::NotFound => f.write_str("Todo Not Found"),
            TodoError::Store(err) => write!(f, "store failure: {err}"),
        }
    }
}

impl std::error::Error for TodoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TodoError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for TodoError {
    fn from(value: StoreError) -> Self {
        TodoError::Store(value)
    }
}

impl From<rusqlite::Error> for TodoError {
    fn from(value: rusqlite::Error) -> Self {
        TodoError::Store(StoreError::Sqlite(value))
    }
}
