//! Todo use-case service.
//!
//! # Design
//! `TodoService` validates every payload before touching the repository, so
//! a rejected request never writes. It is storage-agnostic: the server hands
//! it a `SqliteTodoRepository` borrowed from the shared connection for the
//! lifetime of one request.
//!
//! Updates and deletes on an unknown id are silent no-ops that still report
//! success; only `get` reports `NotFound`.

use chrono::NaiveDate;
use log::{debug, info};

use crate::error::TodoError;
use crate::repo::TodoRepository;
use crate::request::{AgendaQuery, CreateTodo, ListTodos, UpdateOutcome, UpdateTodo};
use crate::types::Todo;

pub const TODO_ADDED: &str = "Todo Successfully Added";
pub const TODO_DELETED: &str = "Todo Deleted";

pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists todos matching every supplied filter.
    pub fn list(&self, query: &ListTodos) -> Result<Vec<Todo>, TodoError> {
        let filter = query.validate().inspect_err(log_rejection("todo_list"))?;
        Ok(self.repo.list_todos(&filter)?)
    }

    pub fn get(&self, id: &str) -> Result<Todo, TodoError> {
        self.repo.get_todo(id)?.ok_or(TodoError::NotFound)
    }

    /// Lists todos due on exactly the requested date.
    pub fn agenda(&self, query: &AgendaQuery) -> Result<Vec<Todo>, TodoError> {
        let date = query.validate().inspect_err(log_rejection("todo_agenda"))?;
        self.due_on(date)
    }

    pub fn due_on(&self, date: NaiveDate) -> Result<Vec<Todo>, TodoError> {
        Ok(self.repo.list_due_on(date)?)
    }

    pub fn create(&self, input: CreateTodo) -> Result<(), TodoError> {
        let todo = input.validate().inspect_err(log_rejection("todo_create"))?;
        self.repo.insert_todo(&todo)?;
        info!("event=todo_create module=service status=ok id={}", todo.id);
        Ok(())
    }

    /// Applies the present fields in one write and reports the
    /// highest-precedence field that changed.
    pub fn update(&self, id: &str, input: &UpdateTodo) -> Result<UpdateOutcome, TodoError> {
        let patch = input.validate().inspect_err(log_rejection("todo_update"))?;
        let outcome = patch.outcome();
        if patch.is_empty() {
            debug!("event=todo_update module=service status=skipped id={id}");
            return Ok(outcome);
        }

        let changed = self.repo.update_todo(id, &patch)?;
        info!("event=todo_update module=service status=ok id={id} rows={changed} outcome={outcome:?}");
        Ok(outcome)
    }

    pub fn delete(&self, id: &str) -> Result<(), TodoError> {
        let removed = self.repo.delete_todo(id)?;
        info!("event=todo_delete module=service status=ok id={id} rows={removed}");
        Ok(())
    }
}

fn log_rejection(event: &'static str) -> impl Fn(&TodoError) {
    move |err: &TodoError| debug!("event={event} module=service status=rejected reason=\"{err}\"")
}
