//! Todo repository contract and SQLite implementation.
//!
//! # Invariants
//! - Every value reaches SQLite as a bound parameter. SQL text is only ever
//!   assembled from the fixed fragments in this file.
//! - Read paths reject rows that violate the domain model instead of masking
//!   them.

use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

use crate::date::{format_date, parse_date};
use crate::error::{StoreError, StoreResult};
use crate::request::{TodoFilter, TodoPatch};
use crate::types::Todo;

const TODO_SELECT_SQL: &str = "SELECT id, todo, priority, status, category, due_date FROM todo";

/// Persistence operations behind `TodoService`.
pub trait TodoRepository {
    fn list_todos(&self, filter: &TodoFilter) -> StoreResult<Vec<Todo>>;
    fn get_todo(&self, id: &str) -> StoreResult<Option<Todo>>;
    fn list_due_on(&self, date: NaiveDate) -> StoreResult<Vec<Todo>>;
    fn insert_todo(&self, todo: &Todo) -> StoreResult<()>;
    /// Applies every present field in one statement. Returns rows changed.
    fn update_todo(&self, id: &str, patch: &TodoPatch) -> StoreResult<usize>;
    /// Returns rows removed.
    fn delete_todo(&self, id: &str) -> StoreResult<usize>;
}

/// SQLite-backed todo repository borrowing a shared connection.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_todos(&self, sql: &str, bind_values: Vec<Value>) -> StoreResult<Vec<Todo>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut todos = Vec::new();
        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }
        Ok(todos)
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn list_todos(&self, filter: &TodoFilter) -> StoreResult<Vec<Todo>> {
        let mut sql = format!("{TODO_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = filter.status {
            sql.push_str(" AND status = ?");
            bind_values.push(text(status.as_str()));
        }
        if let Some(priority) = filter.priority {
            sql.push_str(" AND priority = ?");
            bind_values.push(text(priority.as_str()));
        }
        if let Some(search) = &filter.search {
            sql.push_str(r" AND todo LIKE ? ESCAPE '\'");
            bind_values.push(Value::Text(format!("%{}%", escape_like(search))));
        }
        if let Some(category) = filter.category {
            sql.push_str(" AND category = ?");
            bind_values.push(text(category.as_str()));
        }

        self.query_todos(&sql, bind_values)
    }

    fn get_todo(&self, id: &str) -> StoreResult<Option<Todo>> {
        let sql = format!("{TODO_SELECT_SQL} WHERE id = ?1");
        Ok(self.query_todos(&sql, vec![text(id)])?.into_iter().next())
    }

    fn list_due_on(&self, date: NaiveDate) -> StoreResult<Vec<Todo>> {
        let sql = format!("{TODO_SELECT_SQL} WHERE due_date = ?1");
        self.query_todos(&sql, vec![Value::Text(format_date(date))])
    }

    fn insert_todo(&self, todo: &Todo) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO todo (id, todo, priority, status, category, due_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                todo.id.as_str(),
                todo.todo.as_str(),
                todo.priority.as_str(),
                todo.status.as_str(),
                todo.category.as_str(),
                format_date(todo.due_date),
            ],
        )?;
        Ok(())
    }

    fn update_todo(&self, id: &str, patch: &TodoPatch) -> StoreResult<usize> {
        let mut assignments: Vec<&str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = patch.status {
            assignments.push("status = ?");
            bind_values.push(text(status.as_str()));
        }
        if let Some(priority) = patch.priority {
            assignments.push("priority = ?");
            bind_values.push(text(priority.as_str()));
        }
        if let Some(category) = patch.category {
            assignments.push("category = ?");
            bind_values.push(text(category.as_str()));
        }
        if let Some(todo) = &patch.todo {
            assignments.push("todo = ?");
            bind_values.push(text(todo));
        }
        if let Some(due_date) = patch.due_date {
            assignments.push("due_date = ?");
            bind_values.push(Value::Text(format_date(due_date)));
        }

        if assignments.is_empty() {
            return Ok(0);
        }

        let sql = format!("UPDATE todo SET {} WHERE id = ?", assignments.join(", "));
        bind_values.push(text(id));
        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        Ok(changed)
    }

    fn delete_todo(&self, id: &str) -> StoreResult<usize> {
        let removed = self.conn.execute("DELETE FROM todo WHERE id = ?1;", [id])?;
        Ok(removed)
    }
}

fn parse_todo_row(row: &Row<'_>) -> StoreResult<Todo> {
    // databases created elsewhere may key todos by INTEGER
    let id = match row.get::<_, Value>("id")? {
        Value::Text(id) => id,
        Value::Integer(id) => id.to_string(),
        other => {
            return Err(StoreError::InvalidData(format!("invalid todo id {other:?}")));
        }
    };

    let priority_text: String = row.get("priority")?;
    let priority = priority_text.parse().map_err(|_| {
        StoreError::InvalidData(format!("invalid priority `{priority_text}` for todo `{id}`"))
    })?;

    let status_text: String = row.get("status")?;
    let status = status_text.parse().map_err(|_| {
        StoreError::InvalidData(format!("invalid status `{status_text}` for todo `{id}`"))
    })?;

    let category_text: String = row.get("category")?;
    let category = category_text.parse().map_err(|_| {
        StoreError::InvalidData(format!("invalid category `{category_text}` for todo `{id}`"))
    })?;

    // rows written by other tools may hold a non-canonical ISO date
    let due_text: String = row.get("due_date")?;
    let due_date = parse_date(&due_text).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid due_date `{due_text}` for todo `{id}`"))
    })?;

    Ok(Todo {
        todo: row.get("todo")?,
        id,
        priority,
        status,
        category,
        due_date,
    })
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
