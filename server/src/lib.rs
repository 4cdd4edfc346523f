//! HTTP surface for the todo service.
//!
//! # Design
//! One SQLite connection is opened at startup and shared by every handler
//! through `Db`. A handler holds the lock only while its store calls run;
//! the guard drops on every return path. Handlers never await while holding
//! it.
//!
//! Successful writes answer with a plain-text confirmation, reads with JSON.
//! Failures are plain text, see `error::ApiError`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tokio::{net::TcpListener, sync::Mutex};
use todo_core::{
    AgendaQuery, Connection, CreateTodo, ListTodos, SqliteTodoRepository, Todo, TodoService,
    UpdateTodo, TODO_ADDED, TODO_DELETED,
};

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::ApiError;

pub type Db = Arc<Mutex<Connection>>;

pub fn app(conn: Connection) -> Router {
    let db: Db = Arc::new(Mutex::new(conn));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .route("/todos/{id}/", get(get_todo).put(update_todo).delete(delete_todo))
        .route("/agenda", get(agenda))
        .route("/agenda/", get(agenda))
        .with_state(db)
}

pub async fn run(listener: TcpListener, conn: Connection) -> Result<(), std::io::Error> {
    axum::serve(listener, app(conn)).await
}

async fn list_todos(
    State(db): State<Db>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let query: ListTodos = pairs.into_iter().collect();
    let conn = db.lock().await;
    let todos = TodoService::new(SqliteTodoRepository::new(&conn)).list(&query)?;
    Ok(Json(todos))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Todo>, ApiError> {
    let conn = db.lock().await;
    let todo = TodoService::new(SqliteTodoRepository::new(&conn)).get(&id)?;
    Ok(Json(todo))
}

async fn agenda(
    State(db): State<Db>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let query: AgendaQuery = pairs.into_iter().collect();
    let conn = db.lock().await;
    let todos = TodoService::new(SqliteTodoRepository::new(&conn)).agenda(&query)?;
    Ok(Json(todos))
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<&'static str, ApiError> {
    let conn = db.lock().await;
    TodoService::new(SqliteTodoRepository::new(&conn)).create(input)?;
    Ok(TODO_ADDED)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Result<&'static str, ApiError> {
    let conn = db.lock().await;
    let outcome = TodoService::new(SqliteTodoRepository::new(&conn)).update(&id, &input)?;
    Ok(outcome.message())
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    let conn = db.lock().await;
    TodoService::new(SqliteTodoRepository::new(&conn)).delete(&id)?;
    Ok(TODO_DELETED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_fields_are_optional() {
        let query: ListTodos = Vec::<(String, String)>::new().into_iter().collect();
        assert!(query.status.is_none());
        assert!(query.search_q.is_none());
    }

    #[test]
    fn update_payload_uses_camel_case_due_date() {
        let input: UpdateTodo = serde_json::from_str(r#"{"dueDate":"2024-01-12"}"#).unwrap();
        assert_eq!(input.due_date, Some(serde_json::Value::from("2024-01-12")));
        assert!(input.status.is_none());
    }

    #[test]
    fn create_payload_rejects_missing_id() {
        let result: Result<CreateTodo, _> = serde_json::from_str(
            r#"{"todo":"x","priority":"HIGH","status":"DONE","category":"WORK","dueDate":"2024-01-01"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn create_payload_keeps_wrong_typed_fields_for_validation() {
        let input: CreateTodo = serde_json::from_str(
            r#"{"id":"1","todo":"x","priority":"HIGH","status":5,"category":"WORK","dueDate":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(input.status, Some(serde_json::Value::from(5)));
    }
}
