//! Client-side task list state.
//!
//! Holds the in-memory copy of the task collection between fetches. All
//! changes go through the pure [`TaskListState::apply`] reducer: entries are
//! keyed by task id, with a separate id list preserving insertion order for
//! display. Removal is keyed by id, never by list position.

use std::collections::HashMap;

/// A task as the UI renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: u32,
    pub text: String,
    pub completed: bool,
    pub add_by_admin: bool,
}

impl From<crate::api::TaskDto> for TaskItem {
    fn from(dto: crate::api::TaskDto) -> Self {
        Self {
            id: dto.id,
            text: dto.text,
            completed: dto.completed,
            add_by_admin: dto.add_by_admin,
        }
    }
}

/// Events the reducer understands, one per user-visible action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListEvent {
    /// The full collection arrived from the server; replaces local state.
    Loaded(Vec<TaskItem>),
    /// A created task came back with a generated id; appended at the end.
    Added(TaskItem),
    /// The locally flipped copy a toggle request was built from; it replaces
    /// the matching entry wholesale. The server's returned document is never
    /// consulted.
    Toggled(TaskItem),
    /// A task was removed, keyed by id.
    Removed(u32),
}

/// The task collection held between fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListState {
    order: Vec<u32>,
    entries: HashMap<u32, TaskItem>,
}

impl TaskListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an event to the prior state, returning the next state.
    /// Events referencing an unknown id leave the state unchanged.
    pub fn apply(&self, event: TaskListEvent) -> Self {
        let mut next = self.clone();
        match event {
            TaskListEvent::Loaded(tasks) => {
                next.order.clear();
                next.entries.clear();
                for task in tasks {
                    next.push(task);
                }
            }
            TaskListEvent::Added(task) => next.push(task),
            TaskListEvent::Toggled(task) => {
                if let Some(entry) = next.entries.get_mut(&task.id) {
                    *entry = task;
                }
            }
            TaskListEvent::Removed(id) => {
                next.order.retain(|&task_id| task_id != id);
                next.entries.remove(&id);
            }
        }
        next
    }

    fn push(&mut self, task: TaskItem) {
        let id = task.id;
        if self.entries.insert(id, task).is_none() {
            self.order.push(id);
        }
    }

    /// Tasks in insertion order, for display.
    pub fn iter(&self) -> impl Iterator<Item = &TaskItem> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn get(&self, id: u32) -> Option<&TaskItem> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Returns the text to submit for a new task, or `None` when the input is
/// empty or whitespace-only. Accepted text is submitted untrimmed.
pub fn prepare_new_task_text(input: &str) -> Option<String> {
    if input.trim().is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}
