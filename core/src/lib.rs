//! Validation and persistence core for the todo service.
//!
//! # Overview
//! Turns raw request payloads into typed values, runs them against a SQLite
//! `todo` table and shapes rows back into `Todo` values. The HTTP layer lives
//! in the `todo-server` crate and only maps these results to responses.
//!
//! # Design
//! - `types`: closed enums and the `Todo` record.
//! - `request`: payload structs and their validation order.
//! - `repo`: the `TodoRepository` seam with its SQLite implementation.
//! - `service`: `TodoService`, the single entry point per operation.
//! - Every store value is a bound parameter; see `repo`.

pub mod date;
pub mod db;
pub mod error;
pub mod repo;
pub mod request;
pub mod service;
pub mod types;

pub use db::{open_db, open_db_in_memory};
pub use error::{StoreError, StoreResult, TodoError};
pub use repo::{SqliteTodoRepository, TodoRepository};
pub use request::{
    AgendaQuery, CreateTodo, ListTodos, TodoFilter, TodoPatch, UpdateOutcome, UpdateTodo,
};
pub use rusqlite::Connection;
pub use service::{TodoService, TODO_ADDED, TODO_DELETED};
pub use types::{Category, Priority, Status, Todo, UnknownVariant};
