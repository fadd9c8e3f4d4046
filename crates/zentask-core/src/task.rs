use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::view::Bucket;

pub type TaskId = Uuid;
pub type SubtaskId = Uuid;

/// Board column a task sits in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Board columns in display order.
    pub const COLUMNS: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subtask {
    pub id: SubtaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    pub fn new(title: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            completed: false,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub important: bool,

    #[serde(default)]
    pub my_day: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    pub list_id: Bucket,

    #[serde(default)]
    pub order: u32,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Creates an open `todo` task. `created_at` is kept at millisecond
    /// precision so it survives the persisted format unchanged.
    pub fn new(title: impl Into<String>, list_id: Bucket, order: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            completed: false,
            important: false,
            my_day: false,
            due_date: None,
            list_id,
            order,
            status: TaskStatus::Todo,
            created_at: now.trunc_subsecs(3),
            subtasks: vec![],
        }
    }

    /// Flips completion and moves the task to `done` or back to `todo`.
    pub fn toggle_complete(&mut self) {
        self.completed = !self.completed;
        self.status = if self.completed {
            TaskStatus::Done
        } else {
            TaskStatus::Todo
        };
    }

    /// Sets the board status and derives `completed` from it.
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.completed = status == TaskStatus::Done;
    }

    /// Sets completion and derives the status. Reopening a task that is not
    /// `done` keeps its current column.
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        if completed {
            self.status = TaskStatus::Done;
        } else if self.status == TaskStatus::Done {
            self.status = TaskStatus::Todo;
        }
    }

    pub fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(important) = patch.important {
            self.important = important;
        }
        if let Some(my_day) = patch.my_day {
            self.my_day = my_day;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }

        match (patch.status, patch.completed) {
            (Some(status), _) => self.set_status(status),
            (None, Some(completed)) => self.set_completed(completed),
            (None, None) => {}
        }
    }

    pub fn subtask_mut(&mut self, id: SubtaskId) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|subtask| subtask.id == id)
    }

    /// `(completed, total)` subtask counts.
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|subtask| subtask.completed).count();
        (done, self.subtasks.len())
    }

    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Typed partial update for [`Task`].
///
/// `completed` and `status` are never written independently: `status` wins
/// when both are present and the other field is derived from it. The bucket
/// and `order` are owned by the reorder operations and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub important: Option<bool>,
    pub my_day: Option<bool>,
    /// `Some(None)` clears the due date.
    pub due_date: Option<Option<NaiveDate>>,
    pub completed: Option<bool>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
