use crate::model::Task;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(value: &str) -> Option<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value.trim(), &format).ok()
}

/// Lenient parse of a user-entered date-time.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD HH:MM`, or a bare
/// `YYYY-MM-DD` (taken as midnight). Anything else is `None`; stored
/// tasks keep their raw text either way.
pub fn parse_datetime(value: &str) -> Option<PrimitiveDateTime> {
    let trimmed = value.trim();

    let with_seconds = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, &with_seconds) {
        return Some(parsed);
    }

    let without_seconds = format_description!("[year]-[month]-[day] [hour]:[minute]");
    if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, &without_seconds) {
        return Some(parsed);
    }

    parse_date(trimmed).map(|date| date.with_time(Time::MIDNIGHT))
}

/// Derives the visible subset of `tasks`: case-insensitive substring
/// match of `search` against titles, and an inclusive calendar-date
/// range on the scheduled date-time. Stable and pure; the source slice
/// is never reordered or mutated.
///
/// A task whose `scheduled_at` does not parse is excluded from any
/// date-bounded query but still matches a text-only query.
pub fn filter_tasks(
    tasks: &[Task],
    search: &str,
    start: Option<Date>,
    end: Option<Date>,
) -> Vec<Task> {
    let needle = search.trim().to_lowercase();
    let mut filtered = Vec::new();

    for task in tasks {
        if !needle.is_empty() && !task.title.to_lowercase().contains(&needle) {
            continue;
        }

        if start.is_some() || end.is_some() {
            let scheduled = match parse_datetime(&task.scheduled_at) {
                Some(value) => value.date(),
                None => continue,
            };
            if let Some(start) = start
                && scheduled < start
            {
                continue;
            }
            if let Some(end) = end
                && scheduled > end
            {
                continue;
            }
        }

        filtered.push(task.clone());
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::{filter_tasks, parse_date, parse_datetime};
    use crate::model::Task;

    fn task(id: &str, title: &str, scheduled_at: &str) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: "details".to_string(),
            scheduled_at: scheduled_at.to_string(),
            deadline: "2024-02-01".to_string(),
            priority: "Todo".to_string(),
            completed: false,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task("task-1", "Buy milk", "2024-01-05 09:00"),
            task("task-2", "Pay rent", "2024-01-20"),
        ]
    }

    #[test]
    fn parse_datetime_accepts_documented_forms() {
        assert!(parse_datetime("2024-01-05 09:00:30").is_some());
        assert!(parse_datetime(" 2024-01-05 09:00 ").is_some());

        let midnight = parse_datetime("2024-01-05").unwrap();
        assert_eq!(midnight.hour(), 0);
        assert_eq!(midnight.minute(), 0);

        assert!(parse_datetime("next tuesday-ish").is_none());
        assert!(parse_datetime("2024-13-05").is_none());
    }

    #[test]
    fn no_predicates_returns_everything_in_order() {
        let tasks = sample();
        let visible = filter_tasks(&tasks, "", None, None);
        assert_eq!(visible, tasks);
    }

    #[test]
    fn search_matches_title_case_insensitively() {
        let tasks = sample();
        let visible = filter_tasks(&tasks, "MILK", None, None);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "task-1");
    }

    #[test]
    fn search_never_matches_description() {
        let tasks = sample();
        let visible = filter_tasks(&tasks, "details", None, None);
        assert!(visible.is_empty());
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let tasks = sample();

        let start = parse_date("2024-01-10");
        let end = parse_date("2024-01-31");
        let visible = filter_tasks(&tasks, "", start, end);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "task-2");

        // Bounds landing exactly on the scheduled date still match.
        let exact = filter_tasks(&tasks, "", parse_date("2024-01-05"), parse_date("2024-01-05"));
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].id, "task-1");
    }

    #[test]
    fn start_and_end_bounds_work_independently() {
        let tasks = sample();

        let from_only = filter_tasks(&tasks, "", parse_date("2024-01-10"), None);
        assert_eq!(from_only.len(), 1);
        assert_eq!(from_only[0].id, "task-2");

        let to_only = filter_tasks(&tasks, "", None, parse_date("2024-01-10"));
        assert_eq!(to_only.len(), 1);
        assert_eq!(to_only[0].id, "task-1");
    }

    #[test]
    fn all_predicates_must_pass() {
        let tasks = sample();
        let visible = filter_tasks(&tasks, "milk", parse_date("2024-01-10"), None);
        assert!(visible.is_empty());
    }

    #[test]
    fn unparsable_schedule_is_excluded_only_from_date_bounded_queries() {
        let mut tasks = sample();
        tasks.push(task("task-3", "Mystery errand", "whenever"));

        let text_only = filter_tasks(&tasks, "mystery", None, None);
        assert_eq!(text_only.len(), 1);
        assert_eq!(text_only[0].id, "task-3");

        let bounded = filter_tasks(&tasks, "", None, parse_date("2024-12-31"));
        let ids: Vec<&str> = bounded.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["task-1", "task-2"]);
    }

    #[test]
    fn filter_is_pure() {
        let tasks = sample();
        let first = filter_tasks(&tasks, "milk", None, None);
        let second = filter_tasks(&tasks, "milk", None, None);

        assert_eq!(first, second);
        assert_eq!(tasks, sample());
    }

    #[test]
    fn filter_preserves_source_order() {
        let tasks = vec![
            task("task-1", "alpha errand", "2024-01-01"),
            task("task-2", "beta errand", "2024-01-02"),
            task("task-3", "gamma errand", "2024-01-03"),
        ];

        let visible = filter_tasks(&tasks, "errand", None, None);
        let ids: Vec<&str> = visible.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["task-1", "task-2", "task-3"]);
    }
}
