pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod store;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{Task, TaskDraft};

    #[test]
    fn task_has_required_fields() {
        let task = Task {
            id: "task-1".to_string(),
            title: "demo".to_string(),
            description: "a demo task".to_string(),
            scheduled_at: "2024-01-05 09:00".to_string(),
            deadline: "2024-01-06".to_string(),
            priority: "Todo".to_string(),
            completed: false,
        };

        assert_eq!(task.id, "task-1");
        assert_eq!(task.priority, "Todo");
        assert!(!task.completed);
    }

    #[test]
    fn draft_clear_restores_default_priority() {
        let mut draft = TaskDraft {
            title: "demo".to_string(),
            priority: "Urgent".to_string(),
            ..TaskDraft::default()
        };

        draft.clear();
        assert_eq!(draft, TaskDraft::default());
        assert_eq!(draft.priority, "Todo");
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::unauthorized("sign in first");
        assert_eq!(err.code(), "unauthorized");
        assert_eq!(err.to_string(), "unauthorized - sign in first");
    }
}
