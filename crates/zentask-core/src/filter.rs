//! Pure projections of the task collection into the list and board views.

use tracing::trace;

use crate::list::List;
use crate::task::{Task, TaskStatus};
use crate::view::{Bucket, ViewId};

/// Whether `task` belongs to `view`. Evaluated in a fixed priority order; a
/// task may show up in several pseudo-views at once.
pub fn matches_view(task: &Task, view: ViewId) -> bool {
    match view {
        ViewId::MyDay => task.my_day,
        ViewId::Important => task.important,
        ViewId::Planned => task.due_date.is_some(),
        ViewId::Tasks => task.list_id == Bucket::Tasks,
        ViewId::List(id) => task.list_id == Bucket::List(id),
    }
}

/// Tasks visible in `view`, ascending by `order`. Ties keep collection order.
pub fn visible_tasks(tasks: &[Task], view: ViewId) -> Vec<Task> {
    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|task| matches_view(task, view))
        .cloned()
        .collect();
    out.sort_by_key(|task| task.order);
    trace!(%view, count = out.len(), "projected visible tasks");
    out
}

/// Narrows an already projected set by a case-insensitive title/description
/// search. A blank query keeps everything.
pub fn apply_search(tasks: Vec<Task>, query: &str) -> Vec<Task> {
    let query = query.trim();
    if query.is_empty() {
        return tasks;
    }
    tasks
        .into_iter()
        .filter(|task| task.matches_search(query))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub pending: Vec<Task>,
    pub completed: Vec<Task>,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.completed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.completed.len()
    }
}

pub fn list_view(tasks: &[Task], view: ViewId, query: &str) -> ListView {
    let (completed, pending): (Vec<Task>, Vec<Task>) =
        apply_search(visible_tasks(tasks, view), query)
            .into_iter()
            .partition(|task| task.completed);
    ListView { pending, completed }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

impl BoardColumn {
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub columns: Vec<BoardColumn>,
}

impl BoardView {
    pub fn column(&self, status: TaskStatus) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.status == status)
    }
}

pub fn board_view(tasks: &[Task], view: ViewId, query: &str) -> BoardView {
    let visible = apply_search(visible_tasks(tasks, view), query);
    let columns = TaskStatus::COLUMNS
        .iter()
        .map(|&status| BoardColumn {
            status,
            tasks: visible
                .iter()
                .filter(|task| task.status == status)
                .cloned()
                .collect(),
        })
        .collect();
    BoardView { columns }
}

/// Heading shown for `view`. Unknown list ids fall back to `Tasks`.
pub fn view_title(lists: &[List], view: ViewId) -> String {
    match view {
        ViewId::MyDay => "My Day".to_string(),
        ViewId::Important => "Important".to_string(),
        ViewId::Planned => "Planned".to_string(),
        ViewId::Tasks => "Tasks".to_string(),
        ViewId::List(id) => lists
            .iter()
            .find(|list| list.id == id)
            .map(|list| list.title.clone())
            .unwrap_or_else(|| "Tasks".to_string()),
    }
}
