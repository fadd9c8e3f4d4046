//! Store engine: the single owner of lists, tasks and view state.
//!
//! # Invariants
//! - Every mutation is copy-on-write on an `Arc<Snapshot>`; snapshots handed
//!   out by [`Store::snapshot`] never change afterwards.
//! - Validation happens before the first write, so an operation is either
//!   fully applied or a no-op.
//! - `completed` is `true` exactly when `status` is `done`, after every
//!   operation.
//! - Every applied mutation of persisted fields saves the full record. Save
//!   failures are logged and reported to hooks, never propagated.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::datastore::{PersistedState, SnapshotStorage};
use crate::filter::{self, BoardView, ListView};
use crate::hooks::{HookRunner, StoreHooks};
use crate::list::{List, ListId, Theme};
use crate::reorder::{self, OrderPlan};
use crate::task::{Subtask, SubtaskId, Task, TaskId, TaskPatch, TaskStatus};
use crate::view::{Bucket, ViewId};

/// Complete store state at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub theme: Theme,
    pub lists: Vec<List>,
    pub tasks: Vec<Task>,
    pub active_view: ViewId,
    /// Task open in the detail pane. Session-only, never persisted.
    pub selected_task: Option<TaskId>,
}

impl Snapshot {
    pub fn from_persisted(state: PersistedState) -> Self {
        Self {
            theme: state.theme,
            lists: state.lists,
            tasks: state.tasks,
            active_view: state.active_list_id,
            selected_task: None,
        }
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            theme: self.theme,
            lists: self.lists.clone(),
            tasks: self.tasks.clone(),
            active_list_id: self.active_view,
        }
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn task_index(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

pub struct Store<S: SnapshotStorage> {
    current: Arc<Snapshot>,
    storage: S,
    hooks: HookRunner,
}

impl<S: SnapshotStorage> Store<S> {
    /// Loads the persisted record, falling back to defaults when it is
    /// absent or unreadable.
    pub fn load(storage: S) -> Self {
        Self::load_or(storage, PersistedState::default())
    }

    /// Like [`Store::load`] with caller-provided defaults.
    #[tracing::instrument(skip_all)]
    pub fn load_or(storage: S, defaults: PersistedState) -> Self {
        let state = match storage.load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                info!("no persisted state; starting from defaults");
                defaults
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "persisted state unreadable; starting from defaults");
                defaults
            }
        };

        debug!(
            lists = state.lists.len(),
            tasks = state.tasks.len(),
            active = %state.active_list_id,
            "store initialized"
        );

        Self {
            current: Arc::new(Snapshot::from_persisted(state)),
            storage,
            hooks: HookRunner::default(),
        }
    }

    pub fn add_hook(&mut self, hook: Box<dyn StoreHooks>) {
        self.hooks.register(hook);
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Immutable view of the current state, cheap to clone and hold.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    pub fn theme(&self) -> Theme {
        self.current.theme
    }

    pub fn lists(&self) -> &[List] {
        &self.current.lists
    }

    pub fn tasks(&self) -> &[Task] {
        &self.current.tasks
    }

    pub fn active_view(&self) -> ViewId {
        self.current.active_view
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.current.task(id)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.current.selected_task.and_then(|id| self.current.task(id))
    }

    pub fn visible_tasks(&self) -> Vec<Task> {
        filter::visible_tasks(&self.current.tasks, self.current.active_view)
    }

    pub fn list_view(&self, query: &str) -> ListView {
        filter::list_view(&self.current.tasks, self.current.active_view, query)
    }

    pub fn board_view(&self, query: &str) -> BoardView {
        filter::board_view(&self.current.tasks, self.current.active_view, query)
    }

    pub fn active_view_title(&self) -> String {
        filter::view_title(&self.current.lists, self.current.active_view)
    }

    fn state_mut(&mut self) -> &mut Snapshot {
        Arc::make_mut(&mut self.current)
    }

    fn commit(&mut self) {
        let state = self.current.to_persisted();
        if let Err(err) = self.storage.save(&state) {
            warn!(error = %format!("{err:#}"), "failed to persist snapshot; keeping in-memory state");
            self.hooks.persist_failed(&err);
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn set_theme(&mut self, theme: Theme) {
        let changed = self.current.theme != theme;
        if changed {
            self.state_mut().theme = theme;
            self.commit();
        }
        self.hooks.theme_changed(theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.current.theme.toggled();
        self.set_theme(next);
        next
    }

    #[tracing::instrument(skip(self))]
    pub fn set_active_view(&mut self, view: ViewId) {
        if self.current.active_view == view {
            return;
        }
        self.state_mut().active_view = view;
        self.commit();
    }

    /// Opens `id` in the detail pane, or closes it with `None`. Unknown ids
    /// are ignored.
    #[tracing::instrument(skip(self))]
    pub fn select_task(&mut self, id: Option<TaskId>) -> bool {
        if let Some(id) = id
            && self.current.task(id).is_none()
        {
            debug!(task = %id, "select ignored; task not found");
            return false;
        }
        if self.current.selected_task != id {
            self.state_mut().selected_task = id;
        }
        true
    }

    #[tracing::instrument(skip(self))]
    pub fn add_list(&mut self, title: &str, color: &str, icon: &str) -> Option<List> {
        let Some(list) = List::new(title, color, icon) else {
            debug!("add_list ignored; blank title");
            return None;
        };
        self.state_mut().lists.push(list.clone());
        self.commit();
        info!(list = %list.id, "list added");
        Some(list)
    }

    /// Removes a list and every task stored in it.
    #[tracing::instrument(skip(self))]
    pub fn remove_list(&mut self, id: ListId) -> bool {
        if !self.current.lists.iter().any(|list| list.id == id) {
            debug!(list = %id, "remove_list ignored; list not found");
            return false;
        }

        let bucket = Bucket::List(id);
        let state = self.state_mut();
        state.lists.retain(|list| list.id != id);
        let before = state.tasks.len();
        state.tasks.retain(|task| task.list_id != bucket);
        let removed = before - state.tasks.len();
        if state.active_view == ViewId::List(id) {
            state.active_view = ViewId::Tasks;
        }
        if let Some(selected) = state.selected_task
            && state.task(selected).is_none()
        {
            state.selected_task = None;
        }
        self.commit();
        info!(list = %id, removed_tasks = removed, "list removed");
        true
    }

    /// Creates a task from the given view. Pseudo-views store into the
    /// default bucket and pre-set their flag.
    #[tracing::instrument(skip(self))]
    pub fn add_task(&mut self, title: &str, target: ViewId) -> Option<Task> {
        let title = title.trim();
        if title.is_empty() {
            debug!("add_task ignored; blank title");
            return None;
        }

        let bucket = target.bucket();
        let order = reorder::next_order(&self.current.tasks, bucket);
        let mut task = Task::new(title, bucket, order, Utc::now());
        task.my_day = target == ViewId::MyDay;
        task.important = target == ViewId::Important;

        self.state_mut().tasks.push(task.clone());
        self.commit();
        info!(task = %task.id, %bucket, order, "task added");
        Some(task)
    }

    /// Merges `patch` into the task. Returns the updated task, or `None` if
    /// it does not exist.
    #[tracing::instrument(skip(self))]
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Option<Task> {
        let Some(index) = self.current.task_index(id) else {
            debug!(task = %id, "update ignored; task not found");
            return None;
        };
        if patch.is_empty() {
            return Some(self.current.tasks[index].clone());
        }

        let task = &mut self.state_mut().tasks[index];
        task.apply_patch(patch);
        let updated = task.clone();
        self.commit();
        Some(updated)
    }

    #[tracing::instrument(skip(self))]
    pub fn remove_task(&mut self, id: TaskId) -> bool {
        let Some(index) = self.current.task_index(id) else {
            debug!(task = %id, "remove ignored; task not found");
            return false;
        };
        let state = self.state_mut();
        state.tasks.remove(index);
        if state.selected_task == Some(id) {
            state.selected_task = None;
        }
        self.commit();
        true
    }

    fn modify_task(&mut self, id: TaskId, edit: impl FnOnce(&mut Task)) -> bool {
        let Some(index) = self.current.task_index(id) else {
            debug!(task = %id, "task edit ignored; task not found");
            return false;
        };
        edit(&mut self.state_mut().tasks[index]);
        self.commit();
        true
    }

    /// The only operation that flips completion and status together.
    #[tracing::instrument(skip(self))]
    pub fn toggle_complete(&mut self, id: TaskId) -> bool {
        self.modify_task(id, Task::toggle_complete)
    }

    #[tracing::instrument(skip(self))]
    pub fn toggle_important(&mut self, id: TaskId) -> bool {
        self.modify_task(id, |task| task.important = !task.important)
    }

    #[tracing::instrument(skip(self))]
    pub fn toggle_my_day(&mut self, id: TaskId) -> bool {
        self.modify_task(id, |task| task.my_day = !task.my_day)
    }

    #[tracing::instrument(skip(self))]
    pub fn add_subtask(&mut self, task: TaskId, title: &str) -> Option<Subtask> {
        let subtask = Subtask::new(title)?;
        let created = subtask.clone();
        self.modify_task(task, move |t| t.subtasks.push(subtask))
            .then_some(created)
    }

    #[tracing::instrument(skip(self))]
    pub fn toggle_subtask(&mut self, task: TaskId, subtask: SubtaskId) -> bool {
        let exists = self
            .current
            .task(task)
            .is_some_and(|t| t.subtasks.iter().any(|s| s.id == subtask));
        if !exists {
            debug!(%task, %subtask, "toggle_subtask ignored; not found");
            return false;
        }
        self.modify_task(task, |t| {
            if let Some(s) = t.subtask_mut(subtask) {
                s.completed = !s.completed;
            }
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn remove_subtask(&mut self, task: TaskId, subtask: SubtaskId) -> bool {
        let exists = self
            .current
            .task(task)
            .is_some_and(|t| t.subtasks.iter().any(|s| s.id == subtask));
        if !exists {
            debug!(%task, %subtask, "remove_subtask ignored; not found");
            return false;
        }
        self.modify_task(task, |t| t.subtasks.retain(|s| s.id != subtask))
    }

    fn apply_plan(&mut self, plan: Option<OrderPlan>) -> bool {
        let Some(plan) = plan else {
            return false;
        };
        if !plan.is_noop(&self.current.tasks) {
            plan.apply(&mut self.state_mut().tasks);
            self.commit();
        }
        true
    }

    /// Moves the bucket element at `from` to `to` and renumbers the bucket
    /// as `0..n`.
    #[tracing::instrument(skip(self))]
    pub fn reorder_tasks(&mut self, bucket: Bucket, from: usize, to: usize) -> bool {
        let plan = reorder::plan_reorder(&self.current.tasks, bucket, from, to);
        self.apply_plan(plan)
    }

    /// Renumbers `bucket` to follow an externally computed final order.
    #[tracing::instrument(skip(self, ids), fields(count = ids.len()))]
    pub fn set_bucket_order(&mut self, bucket: Bucket, ids: &[TaskId]) -> bool {
        let plan = reorder::plan_bucket_order(&self.current.tasks, bucket, ids);
        self.apply_plan(plan)
    }

    /// Puts the task at `index` of `destination`, moving it between buckets
    /// when needed.
    #[tracing::instrument(skip(self))]
    pub fn move_task(&mut self, id: TaskId, destination: Bucket, index: usize) -> bool {
        if let Bucket::List(list_id) = destination
            && !self.current.lists.iter().any(|list| list.id == list_id)
        {
            debug!(task = %id, list = %list_id, "move ignored; destination list not found");
            return false;
        }
        let plan = reorder::plan_move(&self.current.tasks, id, destination, index);
        self.apply_plan(plan)
    }

    /// Board drop onto `status`'s column.
    #[tracing::instrument(skip(self))]
    pub fn move_to_column(&mut self, id: TaskId, status: TaskStatus) -> bool {
        let Some(index) = self.current.task_index(id) else {
            debug!(task = %id, "column move ignored; task not found");
            return false;
        };
        let current = &self.current.tasks[index];
        if current.status == status && current.completed == (status == TaskStatus::Done) {
            return true;
        }
        if reorder::move_to_column(&mut self.state_mut().tasks[index], status) {
            self.commit();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::Store;
    use crate::datastore::{MemoryStorage, PersistedState, SnapshotStorage};
    use crate::hooks::StoreHooks;
    use crate::list::Theme;
    use crate::task::{Task, TaskPatch, TaskStatus};
    use crate::view::{Bucket, ViewId};

    fn store() -> Store<MemoryStorage> {
        Store::load(MemoryStorage::new())
    }

    #[test]
    fn starts_from_defaults() {
        let store = store();
        assert_eq!(store.theme(), Theme::Light);
        assert_eq!(store.active_view(), ViewId::MyDay);
        assert!(store.lists().is_empty());
        assert!(store.tasks().is_empty());
        assert!(store.storage().raw().is_none());
    }

    #[test]
    fn corrupt_record_falls_back_to_defaults() {
        let store = Store::load(MemoryStorage::with_raw("{\"tasks\": 42"));
        assert!(store.tasks().is_empty());
        assert_eq!(store.active_view(), ViewId::MyDay);
    }

    #[test]
    fn blank_titles_are_ignored() {
        let mut store = store();
        assert!(store.add_task("   ", ViewId::Tasks).is_none());
        assert!(store.add_list("\t", "#fff", "list").is_none());
        assert!(store.tasks().is_empty());
        assert!(store.storage().raw().is_none());
    }

    #[test]
    fn pseudo_view_creation_sets_flags_and_default_bucket() {
        let mut store = store();
        let milk = store.add_task("Buy milk", ViewId::Important).expect("task");
        assert!(milk.important);
        assert!(!milk.my_day);
        assert_eq!(milk.list_id, Bucket::Tasks);

        let trip = store.add_task("Plan trip", ViewId::MyDay).expect("task");
        assert!(trip.my_day);
        assert_eq!(trip.list_id, Bucket::Tasks);
        assert_eq!(trip.order, 1);
        assert_eq!(trip.status, TaskStatus::Todo);
    }

    #[test]
    fn order_counts_resolved_bucket() {
        let mut store = store();
        let list = store.add_list("Work", "#000", "list").expect("list");
        store.add_task("a", ViewId::Tasks);
        store.add_task("b", ViewId::Planned);
        let w = store.add_task("w", ViewId::List(list.id)).expect("task");
        assert_eq!(w.order, 0);
        let c = store.add_task("c", ViewId::Tasks).expect("task");
        assert_eq!(c.order, 2);
    }

    #[test]
    fn removing_list_cascades_and_resets_active_view() {
        let mut store = store();
        let list = store.add_list("Work", "#000", "list").expect("list");
        let keep = store.add_task("keep", ViewId::Tasks).expect("task");
        let gone = store.add_task("gone", ViewId::List(list.id)).expect("task");
        store.set_active_view(ViewId::List(list.id));
        assert!(store.select_task(Some(gone.id)));

        assert!(store.remove_list(list.id));
        assert!(store.lists().is_empty());
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, keep.id);
        assert_eq!(store.active_view(), ViewId::Tasks);
        assert!(store.selected_task().is_none());

        assert!(!store.remove_list(list.id));
    }

    #[test]
    fn removing_inactive_list_keeps_active_view() {
        let mut store = store();
        let list = store.add_list("Work", "#000", "list").expect("list");
        store.set_active_view(ViewId::Important);
        store.remove_list(list.id);
        assert_eq!(store.active_view(), ViewId::Important);
    }

    #[test]
    fn missing_ids_are_silent_noops() {
        let mut store = store();
        store.add_task("a", ViewId::Tasks);
        let before = store.snapshot();
        let ghost = Uuid::new_v4();

        assert!(store.update_task(ghost, TaskPatch::default()).is_none());
        assert!(!store.remove_task(ghost));
        assert!(!store.toggle_complete(ghost));
        assert!(!store.toggle_important(ghost));
        assert!(!store.toggle_my_day(ghost));
        assert!(!store.move_to_column(ghost, TaskStatus::Done));
        assert!(!store.select_task(Some(ghost)));
        assert!(store.add_subtask(ghost, "x").is_none());

        assert_eq!(*store.snapshot(), *before);
    }

    #[test]
    fn toggle_complete_is_an_involution() {
        let mut store = store();
        let task = store.add_task("a", ViewId::Tasks).expect("task");
        store.toggle_complete(task.id);
        let t = store.task(task.id).expect("task");
        assert!(t.completed);
        assert_eq!(t.status, TaskStatus::Done);

        store.toggle_complete(task.id);
        let t = store.task(task.id).expect("task");
        assert_eq!((t.completed, t.status), (task.completed, task.status));
    }

    #[test]
    fn flag_toggles_have_no_side_effects() {
        let mut store = store();
        let task = store.add_task("a", ViewId::Tasks).expect("task");
        store.toggle_important(task.id);
        store.toggle_my_day(task.id);
        let t = store.task(task.id).expect("task");
        assert!(t.important && t.my_day);
        assert_eq!((t.completed, t.status, t.order), (false, TaskStatus::Todo, 0));
    }

    #[test]
    fn planned_view_follows_due_date() {
        let mut store = store();
        let task = store.add_task("File taxes", ViewId::Tasks).expect("task");
        store.set_active_view(ViewId::Planned);
        assert!(store.visible_tasks().is_empty());

        let due = NaiveDate::from_ymd_opt(2026, 4, 15).expect("date");
        store.update_task(
            task.id,
            TaskPatch {
                due_date: Some(Some(due)),
                ..TaskPatch::default()
            },
        );
        assert_eq!(store.visible_tasks().len(), 1);

        let cleared = store
            .update_task(
                task.id,
                TaskPatch {
                    due_date: Some(None),
                    ..TaskPatch::default()
                },
            )
            .expect("task");
        assert!(store.visible_tasks().is_empty());
        assert_eq!(
            cleared,
            Task {
                due_date: None,
                ..task
            }
        );
    }

    #[test]
    fn reorder_renumbers_only_the_bucket() {
        let mut store = store();
        let list = store.add_list("Work", "#000", "list").expect("list");
        let a = store.add_task("a", ViewId::Tasks).expect("task");
        let w = store.add_task("w", ViewId::List(list.id)).expect("task");
        let b = store.add_task("b", ViewId::Tasks).expect("task");
        let c = store.add_task("c", ViewId::Tasks).expect("task");

        assert!(store.reorder_tasks(Bucket::Tasks, 2, 0));
        let order = |id| store.task(id).map(|t| t.order);
        assert_eq!(order(c.id), Some(0));
        assert_eq!(order(a.id), Some(1));
        assert_eq!(order(b.id), Some(2));
        assert_eq!(store.task(w.id), Some(&w));

        assert!(!store.reorder_tasks(Bucket::Tasks, 3, 0));
    }

    #[test]
    fn snapshots_are_not_mutated_by_later_writes() {
        let mut store = store();
        let task = store.add_task("a", ViewId::Tasks).expect("task");
        let held = store.snapshot();
        store.toggle_complete(task.id);
        store.update_task(
            task.id,
            TaskPatch {
                title: Some("renamed".to_string()),
                ..TaskPatch::default()
            },
        );

        assert_eq!(held.tasks[0].title, "a");
        assert!(!held.tasks[0].completed);
        assert_eq!(store.tasks()[0].title, "renamed");
    }

    #[test]
    fn board_drag_out_of_done_reopens() {
        let mut store = store();
        let task = store.add_task("a", ViewId::Tasks).expect("task");
        store.move_to_column(task.id, TaskStatus::Done);
        assert!(store.task(task.id).is_some_and(|t| t.completed));

        store.move_to_column(task.id, TaskStatus::InProgress);
        let t = store.task(task.id).expect("task");
        assert!(!t.completed);
        assert_eq!(t.status, TaskStatus::InProgress);
        assert_eq!(
            store
                .board_view("")
                .column(TaskStatus::InProgress)
                .map(|c| c.count()),
            Some(0),
            "default view is my-day and the task is not in it"
        );
        store.set_active_view(ViewId::Tasks);
        assert_eq!(
            store
                .board_view("")
                .column(TaskStatus::InProgress)
                .map(|c| c.count()),
            Some(1)
        );
    }

    #[test]
    fn move_into_unknown_list_is_rejected() {
        let mut store = store();
        let task = store.add_task("a", ViewId::Tasks).expect("task");
        let before = store.snapshot();

        assert!(!store.move_task(task.id, Bucket::List(Uuid::new_v4()), 0));
        assert!(std::sync::Arc::ptr_eq(&before, &store.snapshot()));

        store.set_active_view(ViewId::Tasks);
        assert_eq!(store.visible_tasks().len(), 1);
        assert_eq!(
            store.task(task.id).map(|t| t.list_id),
            Some(Bucket::Tasks)
        );
    }

    #[test]
    fn subtasks_are_edited_through_the_task() {
        let mut store = store();
        let task = store.add_task("Pack", ViewId::Tasks).expect("task");
        assert!(store.add_subtask(task.id, "  ").is_none());
        let socks = store.add_subtask(task.id, "socks").expect("subtask");
        let hat = store.add_subtask(task.id, "hat").expect("subtask");

        assert!(store.toggle_subtask(task.id, socks.id));
        assert_eq!(store.task(task.id).map(|t| t.subtask_progress()), Some((1, 2)));

        assert!(store.remove_subtask(task.id, hat.id));
        assert!(!store.remove_subtask(task.id, hat.id));
        let titles: Vec<_> = store
            .task(task.id)
            .expect("task")
            .subtasks
            .iter()
            .map(|s| s.title.clone())
            .collect();
        assert_eq!(titles, ["socks"]);
    }

    #[test]
    fn removing_selected_task_clears_selection() {
        let mut store = store();
        let task = store.add_task("a", ViewId::Tasks).expect("task");
        store.select_task(Some(task.id));
        assert_eq!(store.selected_task().map(|t| t.id), Some(task.id));
        store.remove_task(task.id);
        assert!(store.selected_task().is_none());
    }

    #[test]
    fn every_mutation_is_persisted() {
        let mut store = store();
        let list = store.add_list("Home", "#f00", "home").expect("list");
        let task = store.add_task("Sweep", ViewId::List(list.id)).expect("task");
        store.add_subtask(task.id, "kitchen");
        store.set_theme(Theme::Dark);
        store.set_active_view(ViewId::List(list.id));

        let saved = store.storage().load().expect("load").expect("record");
        assert_eq!(saved, store.snapshot().to_persisted());

        let reloaded = Store::load(MemoryStorage::with_raw(
            store.storage().raw().expect("raw record"),
        ));
        assert_eq!(reloaded.tasks(), store.tasks());
        assert_eq!(reloaded.lists(), store.lists());
        assert_eq!(reloaded.theme(), Theme::Dark);
        assert_eq!(reloaded.active_view_title(), "Home");
    }

    struct BrokenDisk;

    impl SnapshotStorage for BrokenDisk {
        fn load(&self) -> anyhow::Result<Option<PersistedState>> {
            Ok(None)
        }

        fn save(&self, _state: &PersistedState) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("disk full"))
        }
    }

    struct FailureCounter(Rc<Cell<usize>>);

    impl StoreHooks for FailureCounter {
        fn on_persist_failure(&self, _error: &anyhow::Error) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn save_failures_keep_in_memory_state() {
        let failures = Rc::new(Cell::new(0));
        let mut store = Store::load(BrokenDisk);
        store.add_hook(Box::new(FailureCounter(Rc::clone(&failures))));

        let task = store.add_task("still here", ViewId::Tasks).expect("task");
        assert_eq!(store.task(task.id).map(|t| t.title.as_str()), Some("still here"));
        assert_eq!(failures.get(), 1);
    }

    struct ThemeSpy(Rc<Cell<Option<Theme>>>);

    impl StoreHooks for ThemeSpy {
        fn on_theme_change(&self, theme: Theme) {
            self.0.set(Some(theme));
        }
    }

    #[test]
    fn theme_changes_are_signalled() {
        let seen = Rc::new(Cell::new(None));
        let mut store = store();
        store.add_hook(Box::new(ThemeSpy(Rc::clone(&seen))));

        assert_eq!(store.toggle_theme(), Theme::Dark);
        assert_eq!(seen.get(), Some(Theme::Dark));
        assert_eq!(store.theme(), Theme::Dark);
    }
}
