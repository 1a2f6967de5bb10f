use crate::error::AppError;
use crate::model::{DEFAULT_PRIORITY, Task, TaskDraft};

/// Owns the ordered task collection for one running session.
///
/// Ids are allocated from a monotonic counter and never reused, so a
/// deleted task's id stays dead for the lifetime of the store.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    pending_delete: Option<String>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        let trimmed_id = id.trim();
        self.tasks.iter().find(|task| task.id == trimmed_id)
    }

    /// Validates the draft and appends a new task.
    ///
    /// Fails with `Unauthorized` when the caller is not signed in and
    /// with `InvalidInput` when a required field is empty; either way
    /// the collection is untouched and the draft keeps its fields.
    pub fn add_task(&mut self, draft: &TaskDraft, authorized: bool) -> Result<Task, AppError> {
        if !authorized {
            return Err(AppError::unauthorized("sign in to add a task"));
        }

        let title = draft.title.trim();
        if title.is_empty() {
            return Err(AppError::invalid_input("title is required"));
        }
        let description = draft.description.trim();
        if description.is_empty() {
            return Err(AppError::invalid_input("description is required"));
        }
        let scheduled_at = draft.scheduled_at.trim();
        if scheduled_at.is_empty() {
            return Err(AppError::invalid_input("scheduled date-time is required"));
        }
        let deadline = draft.deadline.trim();
        if deadline.is_empty() {
            return Err(AppError::invalid_input("deadline is required"));
        }

        let priority = match draft.priority.trim() {
            "" => DEFAULT_PRIORITY,
            label => label,
        };

        self.next_id += 1;
        let task = Task {
            id: format!("task-{}", self.next_id),
            title: title.to_string(),
            description: description.to_string(),
            scheduled_at: scheduled_at.to_string(),
            deadline: deadline.to_string(),
            priority: priority.to_string(),
            completed: false,
        };

        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Flips `completed` on the matching task. A missing id is a hard
    /// `NotFound` error, consistent with every other id lookup here.
    pub fn toggle_completion(&mut self, id: &str) -> Result<Task, AppError> {
        let trimmed_id = id.trim();
        if trimmed_id.is_empty() {
            return Err(AppError::invalid_input("id is required"));
        }

        for task in &mut self.tasks {
            if task.id == trimmed_id {
                task.completed = !task.completed;
                return Ok(task.clone());
            }
        }

        Err(AppError::not_found("task not found"))
    }

    /// First phase of delete: records the id awaiting confirmation and
    /// returns the task, if it still exists, so the caller can build
    /// its prompt. A missing id is not an error here; deleting an
    /// already-deleted task must stay a benign no-op end to end.
    pub fn request_delete(&mut self, id: &str) -> Result<Option<Task>, AppError> {
        let trimmed_id = id.trim();
        if trimmed_id.is_empty() {
            return Err(AppError::invalid_input("id is required"));
        }

        self.pending_delete = Some(trimmed_id.to_string());
        Ok(self
            .tasks
            .iter()
            .find(|task| task.id == trimmed_id)
            .cloned())
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Second phase of delete: removes the task named by the pending
    /// intent. Returns `None` when no intent is pending or the task is
    /// already gone; confirmation may race a prior delete and must not
    /// fail.
    pub fn confirm_delete(&mut self) -> Option<Task> {
        let id = self.pending_delete.take()?;
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Declined confirmation: drops the pending intent, nothing else.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}
