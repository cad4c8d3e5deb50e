use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::task::errors::TaskDescriptionError;
use crate::domain::task::errors::TaskIdError;
use crate::domain::task::errors::TaskStatusError;
use crate::domain::task::errors::TaskTitleError;
use crate::domain::user::models::UserId;

/// Task aggregate entity.
///
/// Owned by exactly one user; the owner id gates every operation on it.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub title: TaskTitle,
    pub description: Option<TaskDescription>,
    pub status: TaskStatus,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Task unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Generate a new random task ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a task ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TaskIdError> {
        Uuid::parse_str(s)
            .map(TaskId)
            .map_err(|e| TaskIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task title value type: non-blank, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid task title.
    ///
    /// # Errors
    /// * `Blank` - Title is empty or whitespace only
    /// * `TooLong` - Title longer than 255 characters
    pub fn new(title: String) -> Result<Self, TaskTitleError> {
        if title.trim().is_empty() {
            return Err(TaskTitleError::Blank);
        }
        if title.len() > Self::MAX_LENGTH {
            return Err(TaskTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: title.len(),
            });
        }
        Ok(Self(title))
    }

    /// Get title as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task description value type: at most 1000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescription(String);

impl TaskDescription {
    const MAX_LENGTH: usize = 1000;

    /// Create a new valid task description.
    ///
    /// # Errors
    /// * `TooLong` - Description longer than 1000 characters
    pub fn new(description: String) -> Result<Self, TaskDescriptionError> {
        if description.len() > Self::MAX_LENGTH {
            return Err(TaskDescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: description.len(),
            });
        }
        Ok(Self(description))
    }

    /// Get description as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Task lifecycle status.
///
/// Closed set; a task starts as `Todo` unless the creator says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "TODO"),
            TaskStatus::InProgress => write!(f, "IN_PROGRESS"),
            TaskStatus::Done => write!(f, "DONE"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = TaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(TaskStatus::Todo),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "DONE" => Ok(TaskStatus::Done),
            other => Err(TaskStatusError::Unknown(other.to_string())),
        }
    }
}

/// Command to create a new task with domain types.
#[derive(Debug)]
pub struct CreateTaskCommand {
    pub title: TaskTitle,
    pub description: Option<TaskDescription>,
    pub status: Option<TaskStatus>,
}

impl CreateTaskCommand {
    pub fn new(
        title: TaskTitle,
        description: Option<TaskDescription>,
        status: Option<TaskStatus>,
    ) -> Self {
        Self {
            title,
            description,
            status,
        }
    }
}

/// Command to update an existing task with optional validated fields.
///
/// All fields are optional to support partial updates. Only provided fields
/// will be updated.
#[derive(Debug)]
pub struct UpdateTaskCommand {
    pub title: Option<TaskTitle>,
    pub description: Option<TaskDescription>,
    pub status: Option<TaskStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_rejects_blank() {
        assert_eq!(TaskTitle::new("".to_string()), Err(TaskTitleError::Blank));
        assert_eq!(
            TaskTitle::new("   ".to_string()),
            Err(TaskTitleError::Blank)
        );
    }

    #[test]
    fn test_title_rejects_overlong() {
        assert!(matches!(
            TaskTitle::new("x".repeat(256)),
            Err(TaskTitleError::TooLong { .. })
        ));
        assert!(TaskTitle::new("x".repeat(255)).is_ok());
    }

    #[test]
    fn test_description_bounds() {
        assert!(TaskDescription::new("y".repeat(1000)).is_ok());
        assert!(matches!(
            TaskDescription::new("y".repeat(1001)),
            Err(TaskDescriptionError::TooLong { .. })
        ));
    }

    #[test]
    fn test_status_round_trips_through_from_str() {
        for status in [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(status.to_string().parse::<TaskStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        assert!(matches!(
            "SHIPPED".parse::<TaskStatus>(),
            Err(TaskStatusError::Unknown(_))
        ));
    }
}
