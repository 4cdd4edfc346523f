//! Request payloads and their validation.
//!
//! # Design
//! Payloads carry every checked field as a raw `serde_json::Value` so that a
//! missing, wrong-typed or out-of-set value is reported as the
//! field-specific `TodoError` instead of a generic deserialization failure.
//! `validate` turns a payload into its typed counterpart and checks fields
//! in a fixed order, returning the first failure.
//!
//! For listing and partial updates a field that is absent, `null` or an
//! empty string counts as "not supplied". Any other non-string value is
//! invalid for its field.
//!
//! Query strings are collected from raw key/value pairs: a key given more
//! than once becomes an array, which no enum or date accepts.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::date::parse_date;
use crate::error::TodoError;
use crate::types::{Category, Priority, Status, Todo};

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTodos {
    pub status: Option<Value>,
    pub priority: Option<Value>,
    pub search_q: Option<Value>,
    pub category: Option<Value>,
}

/// Validated list filter. `None` fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
    pub category: Option<Category>,
}

impl ListTodos {
    /// Checks status, priority then category. `search_q` is never invalid.
    pub fn validate(&self) -> Result<TodoFilter, TodoError> {
        let status = checked(&self.status, parse_status)?;
        let priority = checked(&self.priority, parse_priority)?;
        let search = supplied(&self.search_q).map(search_text);
        let category = checked(&self.category, parse_category)?;
        Ok(TodoFilter {
            status,
            priority,
            search,
            category,
        })
    }
}

impl FromIterator<(String, String)> for ListTodos {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = ListTodos::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "status" => &mut query.status,
                "priority" => &mut query.priority,
                "search_q" => &mut query.search_q,
                "category" => &mut query.category,
                _ => continue,
            };
            push_param(slot, value);
        }
        query
    }
}

/// Query parameters accepted by the agenda endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgendaQuery {
    pub date: Option<Value>,
}

impl AgendaQuery {
    pub fn validate(&self) -> Result<NaiveDate, TodoError> {
        parse_due_date(text(&self.date))
    }
}

impl FromIterator<(String, String)> for AgendaQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = AgendaQuery::default();
        for (key, value) in pairs {
            if key == "date" {
                push_param(&mut query.date, value);
            }
        }
        query
    }
}

/// Request payload for creating a todo. `id` may be sent as a JSON string
/// or integer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub todo: String,
    pub priority: Option<Value>,
    pub status: Option<Value>,
    pub category: Option<Value>,
    pub due_date: Option<Value>,
}

impl CreateTodo {
    /// Checks status, priority, category then due date. A missing field is
    /// as invalid as a wrong one.
    pub fn validate(self) -> Result<Todo, TodoError> {
        let status = parse_status(text(&self.status))?;
        let priority = parse_priority(text(&self.priority))?;
        let category = parse_category(text(&self.category))?;
        let due_date = parse_due_date(text(&self.due_date))?;
        Ok(Todo {
            id: self.id,
            todo: self.todo,
            priority,
            status,
            category,
            due_date,
        })
    }
}

/// Request payload for a partial update. Only the fields present in the
/// JSON are applied; omitted fields remain unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Value>,
}

/// Validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub todo: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl UpdateTodo {
    /// Checks the present fields in order status, priority, category, due
    /// date. Todo text is never invalid; a non-string one is stored as its
    /// JSON text.
    pub fn validate(&self) -> Result<TodoPatch, TodoError> {
        let status = checked(&self.status, parse_status)?;
        let priority = checked(&self.priority, parse_priority)?;
        let category = checked(&self.category, parse_category)?;
        let due_date = checked(&self.due_date, parse_due_date)?;
        let todo = supplied(&self.todo)
            .map(|value| value.as_str().map_or_else(|| value.to_string(), str::to_string));
        Ok(TodoPatch {
            status,
            priority,
            category,
            todo,
            due_date,
        })
    }
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.outcome() == UpdateOutcome::Nothing
    }

    /// The single field reported back to the caller, whatever else changed.
    pub fn outcome(&self) -> UpdateOutcome {
        if self.status.is_some() {
            UpdateOutcome::Status
        } else if self.priority.is_some() {
            UpdateOutcome::Priority
        } else if self.category.is_some() {
            UpdateOutcome::Category
        } else if self.todo.is_some() {
            UpdateOutcome::Todo
        } else if self.due_date.is_some() {
            UpdateOutcome::DueDate
        } else {
            UpdateOutcome::Nothing
        }
    }
}

/// Which field an update reports, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Status,
    Priority,
    Category,
    Todo,
    DueDate,
    Nothing,
}

impl UpdateOutcome {
    pub fn message(self) -> &'static str {
        match self {
            UpdateOutcome::Status => "Status Updated",
            UpdateOutcome::Priority => "Priority Updated",
            UpdateOutcome::Category => "Category Updated",
            UpdateOutcome::Todo => "Todo Updated",
            UpdateOutcome::DueDate => "Due Date Updated",
            UpdateOutcome::Nothing => "Nothing to Update",
        }
    }
}

fn supplied(field: &Option<Value>) -> Option<&Value> {
    field
        .as_ref()
        .filter(|value| !value.is_null() && value.as_str() != Some(""))
}

fn text(field: &Option<Value>) -> Option<&str> {
    field.as_ref().and_then(Value::as_str)
}

fn checked<T>(
    field: &Option<Value>,
    parse: fn(Option<&str>) -> Result<T, TodoError>,
) -> Result<Option<T>, TodoError> {
    supplied(field).map(|value| parse(value.as_str())).transpose()
}

/// Repeated keys read as their values joined by commas.
fn search_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map_or_else(|| item.to_string(), str::to_string))
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

fn push_param(slot: &mut Option<Value>, value: String) {
    *slot = Some(match slot.take() {
        None => Value::String(value),
        Some(Value::Array(mut seen)) => {
            seen.push(Value::String(value));
            Value::Array(seen)
        }
        Some(first) => Value::Array(vec![first, Value::String(value)]),
    });
}

fn parse_status(raw: Option<&str>) -> Result<Status, TodoError> {
    raw.and_then(|s| s.parse().ok()).ok_or(TodoError::InvalidStatus)
}

fn parse_priority(raw: Option<&str>) -> Result<Priority, TodoError> {
    raw.and_then(|s| s.parse().ok()).ok_or(TodoError::InvalidPriority)
}

fn parse_category(raw: Option<&str>) -> Result<Category, TodoError> {
    raw.and_then(|s| s.parse().ok()).ok_or(TodoError::InvalidCategory)
}

fn parse_due_date(raw: Option<&str>) -> Result<NaiveDate, TodoError> {
    raw.and_then(parse_date).ok_or(TodoError::InvalidDueDate)
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Int(n) => n.to_string(),
    })
}
