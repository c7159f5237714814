use serde::{Deserialize, Serialize};

/// Item priority as stored by the backend (1=Low, 2=Medium, 3=High).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            other => Err(format!("invalid priority: {}", other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> u8 {
        priority as u8
    }
}

impl Priority {
    /// Display label for view layers.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

/// A todo item as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: i64,
    /// Owning list; immutable after creation.
    pub todo_list_id: i64,
    pub title: String,
    pub content: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    /// Due date as a `YYYY-MM-DD` string, if set.
    pub due_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TodoItem {
    /// Whether the due date has passed. Items without a due date, and
    /// completed items, are never overdue.
    pub fn is_overdue(&self) -> bool {
        !self.completed && crate::utils::is_overdue(self.due_date.as_deref())
    }
}

/// Fields accepted when creating an item. Only the title is required; the
/// server defaults priority to Medium and completed to false.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTodoItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Partial update for an item. Unset fields are omitted from the payload.
/// `due_date` distinguishes "leave unchanged" (`None`) from "clear the
/// date" (`Some(None)`, which serializes an explicit null).
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTodoItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodoItem {
    /// Partial update carrying only a new completed flag.
    pub fn completed(value: bool) -> Self {
        Self {
            completed: Some(value),
            ..Self::default()
        }
    }
}
