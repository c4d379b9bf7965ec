//! # Export Encoder
//!
//! Encodes a task sequence as CSV. Every field is double-quoted, fields are
//! comma separated and rows are joined with `\n`. Embedded quotes are doubled.

use crate::model::{Category, Task};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use std::collections::HashMap;

pub const HEADERS: [&str; 8] = [
    "Title",
    "Description",
    "Due Date",
    "Priority",
    "Status",
    "Category",
    "Created At",
    "Completed At",
];

pub const UNCATEGORIZED: &str = "Uncategorized";

pub fn export_filename(date: NaiveDate) -> String {
    format!("taskflow-export-{}.csv", date.format("%Y-%m-%d"))
}

pub fn encode_csv<'a, I>(tasks: I, categories: &[Category]) -> String
where
    I: IntoIterator<Item = &'a Task>,
{
    let names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let mut lines = vec![encode_row(HEADERS.iter().copied())];
    for task in tasks {
        let priority = task.priority.to_string();
        let status = task.status.to_string();
        let category = names
            .get(task.category_id.as_str())
            .copied()
            .unwrap_or(UNCATEGORIZED);
        let created = timestamp(&task.created_at);
        let completed = task.completed_at.as_ref().map(timestamp).unwrap_or_default();

        lines.push(encode_row([
            task.title.as_str(),
            task.description.as_str(),
            task.due_date.as_str(),
            priority.as_str(),
            status.as_str(),
            category,
            created.as_str(),
            completed.as_str(),
        ]));
    }
    lines.join("\n")
}

fn encode_row<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields
        .into_iter()
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{default_categories, Status, TaskDraft};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_header_only_for_no_tasks() {
        let csv = encode_csv(Vec::<&Task>::new(), &[]);
        assert_eq!(
            csv,
            "\"Title\",\"Description\",\"Due Date\",\"Priority\",\"Status\",\"Category\",\"Created At\",\"Completed At\""
        );
    }

    #[test]
    fn test_row_resolves_category_name() {
        let categories = default_categories(now());
        let task = TaskDraft::new("Report", "2024-05-03")
            .with_description("Quarterly")
            .with_category("1")
            .into_task(now());

        let csv = encode_csv([&task], &categories);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"Report\",\"Quarterly\",\"2024-05-03\",\"Medium\",\"To Do\",\"Work\",\"2024-05-01T09:30:00.000Z\",\"\""
        );
    }

    #[test]
    fn test_unknown_category_is_uncategorized() {
        let categories = default_categories(now());
        let task = TaskDraft::new("Report", "2024-05-03")
            .with_category("missing")
            .into_task(now());

        let csv = encode_csv([&task], &categories);
        let fields: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(fields[5], "\"Uncategorized\"");
    }

    #[test]
    fn test_completed_at_is_written_for_done_tasks() {
        let task = TaskDraft::new("Done thing", "2024-05-03")
            .with_status(Status::Done)
            .into_task(now());
        let csv = encode_csv([&task], &[]);
        assert!(csv.ends_with("\"2024-05-01T09:30:00.000Z\",\"2024-05-01T09:30:00.000Z\""));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let task = TaskDraft::new("Say \"hi\"", "2024-05-03").into_task(now());
        let csv = encode_csv([&task], &[]);
        assert!(csv.lines().nth(1).unwrap().starts_with("\"Say \"\"hi\"\"\","));
    }

    #[test]
    fn test_rows_follow_input_order() {
        let a = TaskDraft::new("a", "2024-05-03").into_task(now());
        let b = TaskDraft::new("b", "2024-05-01").into_task(now());
        let csv = encode_csv([&b, &a], &[]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("\"b\""));
        assert!(lines[2].starts_with("\"a\""));
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(export_filename(date), "taskflow-export-2024-05-01.csv");
    }
}
