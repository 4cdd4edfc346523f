//! Domain types for the todo store.
//!
//! # Design
//! `Status`, `Priority` and `Category` are closed enums. Raw strings coming
//! from a request are parsed with `FromStr` at the boundary, so nothing below
//! the validation layer ever sees an out-of-set value. Each enum serializes to
//! the exact text used on the wire and in the `todo` table.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Returned by the enum `FromStr` impls when the text is outside the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value `{}`", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "TO DO")]
    ToDo,
    #[serde(rename = "IN PROGRESS")]
    InProgress,
    #[serde(rename = "DONE")]
    Done,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::ToDo => "TO DO",
            Status::InProgress => "IN PROGRESS",
            Status::Done => "DONE",
        }
    }
}

impl FromStr for Status {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TO DO" => Ok(Status::ToDo),
            "IN PROGRESS" => Ok(Status::InProgress),
            "DONE" => Ok(Status::Done),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Work,
    Home,
    Learning,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "WORK",
            Category::Home => "HOME",
            Category::Learning => "LEARNING",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WORK" => Ok(Category::Work),
            "HOME" => Ok(Category::Home),
            "LEARNING" => Ok(Category::Learning),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single todo as returned by every read operation.
///
/// `due_date` is stored in the `due_date` column and exposed as `dueDate`,
/// always rendered `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub todo: String,
    pub priority: Priority,
    pub status: Status,
    pub category: Category,
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_parses_from_its_wire_value() {
        for status in [Status::ToDo, Status::InProgress, Status::Done] {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
        }
        for priority in [Priority::High, Priority::Medium, Priority::Low] {
            assert_eq!(priority.to_string().parse::<Priority>().unwrap(), priority);
        }
        for category in [Category::Work, Category::Home, Category::Learning] {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn enum_parsing_is_case_sensitive() {
        assert!("done".parse::<Status>().is_err());
        assert!("High".parse::<Priority>().is_err());
        assert!("work".parse::<Category>().is_err());
        assert!("TODO".parse::<Status>().is_err());
    }

    #[test]
    fn unknown_variant_keeps_input() {
        let err = "URGENT".parse::<Priority>().unwrap_err();
        assert_eq!(err, UnknownVariant("URGENT".to_string()));
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(serde_json::to_value(Status::InProgress).unwrap(), "IN PROGRESS");
        assert_eq!(serde_json::to_value(Priority::Medium).unwrap(), "MEDIUM");
        assert_eq!(serde_json::to_value(Category::Learning).unwrap(), "LEARNING");
    }

    #[test]
    fn todo_serializes_due_date_as_camel_case() {
        let todo = Todo {
            id: "1".to_string(),
            todo: "Buy milk".to_string(),
            priority: Priority::High,
            status: Status::ToDo,
            category: Category::Home,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["dueDate"], "2024-03-05");
        assert_eq!(json["status"], "TO DO");
        assert!(json.get("due_date").is_none());
    }
}
