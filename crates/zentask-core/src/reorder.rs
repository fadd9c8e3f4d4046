//! Translates reorder and drag-drop gestures into `order`, bucket and status
//! changes.
//!
//! Planning is separate from applying: a plan is computed against a borrowed
//! task slice and is `None` whenever the gesture is invalid, so callers can
//! skip copying the collection for no-ops.

use std::collections::HashSet;

use tracing::debug;

use crate::task::{Task, TaskId, TaskStatus};
use crate::view::Bucket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Assignment {
    index: usize,
    bucket: Bucket,
    order: u32,
}

/// Set of bucket/order writes produced by a reorder gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPlan {
    assignments: Vec<Assignment>,
}

impl OrderPlan {
    fn dense(bucket: Bucket, positions: &[usize]) -> Self {
        let mut plan = Self::default();
        plan.extend_dense(bucket, positions);
        plan
    }

    fn extend_dense(&mut self, bucket: Bucket, positions: &[usize]) {
        self.assignments
            .extend(positions.iter().enumerate().map(|(order, &index)| Assignment {
                index,
                bucket,
                order: order as u32,
            }));
    }

    /// Whether applying the plan would leave `tasks` unchanged.
    pub fn is_noop(&self, tasks: &[Task]) -> bool {
        self.assignments.iter().all(|a| {
            tasks
                .get(a.index)
                .is_some_and(|task| task.list_id == a.bucket && task.order == a.order)
        })
    }

    pub fn apply(&self, tasks: &mut [Task]) {
        for a in &self.assignments {
            if let Some(task) = tasks.get_mut(a.index) {
                task.list_id = a.bucket;
                task.order = a.order;
            }
        }
    }
}

/// Collection indices of the bucket's tasks, ascending by `order`.
fn bucket_positions(tasks: &[Task], bucket: Bucket) -> Vec<usize> {
    let mut positions: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| task.list_id == bucket)
        .map(|(index, _)| index)
        .collect();
    positions.sort_by_key(|&index| tasks[index].order);
    positions
}

/// Order value for a task appended to `bucket`.
pub fn next_order(tasks: &[Task], bucket: Bucket) -> u32 {
    tasks.iter().filter(|task| task.list_id == bucket).count() as u32
}

/// Moves the bucket element at `from` to `to` (clamped to the end) and
/// renumbers the bucket densely. `None` when `from` is out of range.
pub fn plan_reorder(tasks: &[Task], bucket: Bucket, from: usize, to: usize) -> Option<OrderPlan> {
    let mut positions = bucket_positions(tasks, bucket);
    if from >= positions.len() {
        debug!(%bucket, from, len = positions.len(), "reorder source index out of range");
        return None;
    }
    let moved = positions.remove(from);
    positions.insert(to.min(positions.len()), moved);
    Some(OrderPlan::dense(bucket, &positions))
}

/// Renumbers `bucket` to follow `ids` exactly. `None` unless `ids` is a
/// permutation of the bucket's task ids.
pub fn plan_bucket_order(tasks: &[Task], bucket: Bucket, ids: &[TaskId]) -> Option<OrderPlan> {
    let members: HashSet<TaskId> = tasks
        .iter()
        .filter(|task| task.list_id == bucket)
        .map(|task| task.id)
        .collect();
    let requested: HashSet<TaskId> = ids.iter().copied().collect();
    if requested.len() != ids.len() || requested != members {
        debug!(%bucket, requested = ids.len(), members = members.len(), "bucket order does not match bucket members");
        return None;
    }

    let positions: Vec<usize> = ids
        .iter()
        .filter_map(|id| tasks.iter().position(|task| task.id == *id))
        .collect();
    Some(OrderPlan::dense(bucket, &positions))
}

/// Places task `id` at `index` (clamped) in `destination`, renumbering the
/// source and destination buckets densely. Applying the same move twice
/// gives the same result as applying it once.
pub fn plan_move(tasks: &[Task], id: TaskId, destination: Bucket, index: usize) -> Option<OrderPlan> {
    let moved = tasks.iter().position(|task| task.id == id)?;
    let source = tasks[moved].list_id;

    let mut plan = OrderPlan::default();
    if source != destination {
        let remaining: Vec<usize> = bucket_positions(tasks, source)
            .into_iter()
            .filter(|&position| position != moved)
            .collect();
        plan.extend_dense(source, &remaining);
    }

    let mut positions: Vec<usize> = bucket_positions(tasks, destination)
        .into_iter()
        .filter(|&position| position != moved)
        .collect();
    positions.insert(index.min(positions.len()), moved);
    plan.extend_dense(destination, &positions);
    Some(plan)
}

/// Board column drop. Status follows the column and `completed` is set only
/// for `done`, so dragging out of `done` reopens the task. `order` is left
/// alone. Returns whether anything changed.
pub fn move_to_column(task: &mut Task, status: TaskStatus) -> bool {
    let before = (task.status, task.completed);
    task.set_status(status);
    before != (task.status, task.completed)
}
