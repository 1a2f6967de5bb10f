use tabled::{Table, Tabled};
use tasklist_core::config::Palette;
use tasklist_core::model::Task;

/// One display row per visible task, keyed by the task's id (never by
/// position) so filtered views keep stable row identity.
#[derive(Tabled)]
pub struct TaskRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "description")]
    description: String,
    #[tabled(rename = "scheduled")]
    scheduled: String,
    #[tabled(rename = "deadline")]
    deadline: String,
    #[tabled(rename = "priority")]
    priority: String,
}

impl TaskRow {
    pub fn from_task(task: &Task, palette: &Palette) -> Self {
        // Completed tasks show "Completed" in place of their priority
        // label and a muted title when a theme is active.
        let priority = if task.completed {
            "Completed".to_string()
        } else {
            task.priority.clone()
        };
        let title = if task.completed {
            palette.mutedize(&task.title)
        } else {
            task.title.clone()
        };

        Self {
            id: task.id.clone(),
            title,
            description: task.description.clone(),
            scheduled: task.scheduled_at.clone(),
            deadline: task.deadline.clone(),
            priority,
        }
    }
}

pub fn print_tasks_table(tasks: &[Task], palette: &Palette) {
    if tasks.is_empty() {
        println!("(no tasks)");
        return;
    }

    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|task| TaskRow::from_task(task, palette))
        .collect();
    println!("{}", Table::new(rows));
}

pub fn task_json(task: &Task) -> serde_json::Value {
    serde_json::json!({
        "id": task.id,
        "title": task.title,
        "description": task.description,
        "scheduled_at": task.scheduled_at,
        "deadline": task.deadline,
        "priority": task.priority,
        "completed": task.completed,
    })
}

pub fn print_task_json(task: &Task) {
    println!("{}", task_json(task));
}

pub fn print_tasks_json(tasks: &[Task]) {
    let payload: Vec<serde_json::Value> = tasks.iter().map(task_json).collect();
    println!("{}", serde_json::Value::Array(payload));
}

pub fn print_task_plain(task: &Task, palette: &Palette) {
    println!("{}", palette.accentize(&task.title));
    println!("  id:          {}", task.id);
    println!("  description: {}", task.description);
    println!("  scheduled:   {}", task.scheduled_at);
    println!("  deadline:    {}", task.deadline);
    if task.completed {
        println!("  priority:    Completed");
    } else {
        println!("  priority:    {}", task.priority);
    }
}
