//! Two-section CSV export of active and archived tasks.

use crate::task::domain::Task;

/// Column headers shared by both sections.
pub const CSV_HEADERS: [&str; 8] = [
    "Title",
    "Status",
    "Priority",
    "Category",
    "Due Date",
    "Created At",
    "Subtasks",
    "Comments",
];

const ACTIVE_SECTION: &str = "ACTIVE TASKS";
const ARCHIVED_SECTION: &str = "ARCHIVED TASKS";
const DATE_FORMAT: &str = "%Y-%m-%d";
const COMPLETED_MARKER: &str = " \u{2713}";
const ITEM_SEPARATOR: &str = "; ";

/// Quotes a field when it holds a comma, a double quote or a newline,
/// doubling any inner quotes. Other fields pass through unchanged.
#[must_use]
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// Renders one task as an escaped CSV row, without a line terminator.
#[must_use]
pub fn task_row(task: &Task) -> String {
    let subtasks = task
        .subtasks()
        .iter()
        .map(|subtask| {
            if subtask.is_completed() {
                format!("{}{COMPLETED_MARKER}", subtask.title())
            } else {
                subtask.title().to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(ITEM_SEPARATOR);
    let comments = task
        .comments()
        .iter()
        .map(|comment| comment.text())
        .collect::<Vec<_>>()
        .join(ITEM_SEPARATOR);

    let fields = [
        task.title().to_owned(),
        task.status().to_string(),
        task.priority().to_string(),
        task.category().to_string(),
        task.due_date().format(DATE_FORMAT).to_string(),
        task.created_at().format(DATE_FORMAT).to_string(),
        subtasks,
        comments,
    ];
    fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders the full export: the active section, a blank separator, then the
/// archived section. Tasks appear in the order given.
#[must_use]
pub fn render(active: &[&Task], archived: &[&Task]) -> String {
    let mut out = String::new();
    write_section(&mut out, ACTIVE_SECTION, active);
    out.push_str("\n\n");
    write_section(&mut out, ARCHIVED_SECTION, archived);
    out
}

fn write_section(out: &mut String, title: &str, tasks: &[&Task]) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&CSV_HEADERS.join(","));
    out.push('\n');
    for task in tasks {
        out.push_str(&task_row(task));
        out.push('\n');
    }
}
