//! Terminal rendering. Every function builds a `String` so output can be
//! checked without a terminal; `commands.rs` does the printing.

use super::styles::{category_style, priority_style, status_style};
use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;
use std::collections::HashMap;
use taskflow::api::{CmdMessage, MessageLevel};
use taskflow::export::UNCATEGORIZED;
use taskflow::index::{DisplayCategory, DisplayTask};
use taskflow::model::{is_overdue, Category, Status};
use taskflow::stats::Statistics;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const PRIORITY_WIDTH: usize = 7;
const DUE_WIDTH: usize = 12;
const CATEGORY_WIDTH: usize = 15;
const SWATCH: &str = "■";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn status_marker(status: Status) -> &'static str {
    match status {
        Status::Todo => "[ ]",
        Status::InProgress => "[~]",
        Status::Done => "[x]",
    }
}

pub(super) fn render_task_list(
    tasks: &[DisplayTask],
    categories: &[Category],
    today: NaiveDate,
    filtered: bool,
) -> String {
    if tasks.is_empty() {
        return if filtered {
            "No tasks match the filters.\n".to_string()
        } else {
            "No tasks yet. Add one with `taskflow add <title> --due <date>`.\n".to_string()
        };
    }

    let by_id: HashMap<&str, &Category> = categories.iter().map(|c| (c.id.as_str(), c)).collect();
    let idx_width = tasks
        .iter()
        .map(|dt| dt.index.to_string().len())
        .max()
        .unwrap_or(1);

    let mut output = String::new();
    for dt in tasks {
        let task = &dt.task;
        let idx_str = format!("{:>width$}. ", dt.index, width = idx_width);
        let marker = format!("{} ", status_marker(task.status));

        let fixed = idx_str.width()
            + marker.width()
            + PRIORITY_WIDTH
            + DUE_WIDTH
            + CATEGORY_WIDTH
            + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);

        let preview: String = task
            .description
            .chars()
            .take(50)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let title_raw = truncate_to_width(&task.title, available);
        let preview_room = available.saturating_sub(title_raw.width() + 1);
        let preview = if preview.is_empty() || preview_room < 4 {
            String::new()
        } else {
            format!(" {}", truncate_to_width(&preview, preview_room))
        };
        let padding = available.saturating_sub(title_raw.width() + preview.width());

        let title = if task.is_done() {
            title_raw.dimmed().strikethrough().to_string()
        } else {
            title_raw.clone()
        };

        let priority = format!("{:<width$}", task.priority.to_string(), width = PRIORITY_WIDTH);
        let due = format!("{:<width$}", task.due_date, width = DUE_WIDTH);
        let due = if !task.is_done() && is_overdue(&task.due_date, today) {
            due.red().bold().to_string()
        } else {
            due
        };

        let (category_name, category_color) = match by_id.get(task.category_id.as_str()) {
            Some(c) => (c.name.as_str(), c.color.as_str()),
            None => (UNCATEGORIZED, ""),
        };
        let category_name = truncate_to_width(category_name, CATEGORY_WIDTH - 1);
        let category_pad = CATEGORY_WIDTH.saturating_sub(category_name.width());

        output.push_str(&format!(
            "{}{}{}{}{}{}{}{}{}{}\n",
            idx_str.yellow(),
            status_style(task.status).apply_to(marker),
            title,
            preview.dimmed(),
            " ".repeat(padding),
            priority_style(task.priority).apply_to(priority),
            due,
            category_style(category_color).apply_to(category_name),
            " ".repeat(category_pad),
            format_time_ago(task.created_at).dimmed(),
        ));
    }
    output
}

pub(super) fn render_category_list(categories: &[DisplayCategory]) -> String {
    if categories.is_empty() {
        return "No categories. Add one with `taskflow category add <name>`.\n".to_string();
    }

    let name_width = categories
        .iter()
        .map(|dc| dc.category.name.width())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for dc in categories {
        let name = &dc.category.name;
        let padding = name_width.saturating_sub(name.width());
        output.push_str(&format!(
            "{} {} {}{}  {}  {}\n",
            format!("{}.", dc.index).yellow(),
            category_style(&dc.category.color).apply_to(SWATCH),
            name.bold(),
            " ".repeat(padding),
            dc.category.color.dimmed(),
            format_task_count(dc.task_count),
        ));
    }
    output
}

fn format_task_count(count: usize) -> String {
    match count {
        1 => "1 task".to_string(),
        n => format!("{} tasks", n),
    }
}

pub(super) fn render_statistics(stats: &Statistics) -> String {
    let rows = [
        ("Total", stats.total_tasks.to_string()),
        (
            "Completed",
            format!("{} ({:.0}%)", stats.completed_tasks, stats.completion_rate),
        ),
        ("  today", stats.completed_today.to_string()),
        ("  this week", stats.completed_this_week.to_string()),
        ("Pending", stats.pending_tasks.to_string()),
        ("Overdue", stats.overdue_tasks.to_string()),
    ];

    let mut output = String::new();
    for (label, value) in rows {
        let value = if label == "Overdue" && stats.overdue_tasks > 0 {
            value.red().bold().to_string()
        } else {
            value
        };
        output.push_str(&format!("{:<12}{}\n", label, value));
    }
    output
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskflow::model::{default_categories, Priority, TaskDraft};

    fn plain() {
        colored::control::set_override(false);
        console::set_colors_enabled(false);
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn display(index: usize, draft: TaskDraft) -> DisplayTask {
        DisplayTask {
            index,
            task: draft.into_task(Utc::now()),
        }
    }

    #[test]
    fn task_rows_show_index_priority_and_category() {
        plain();
        let categories = default_categories(Utc::now());
        let tasks = vec![
            display(
                2,
                TaskDraft::new("Ship release", "2024-05-12")
                    .with_priority(Priority::High)
                    .with_category("1"),
            ),
            display(1, TaskDraft::new("Water plants", "2024-05-09").with_category("gone")),
        ];
        let output = render_task_list(&tasks, &categories, today(), false);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("2. [ ] Ship release"));
        assert!(lines[0].contains("High"));
        assert!(lines[0].contains("Work"));
        assert!(lines[1].contains("Uncategorized"));
        assert!(lines[1].contains("2024-05-09"));
    }

    #[test]
    fn empty_list_messages() {
        plain();
        assert!(render_task_list(&[], &[], today(), true).contains("match"));
        assert!(render_task_list(&[], &[], today(), false).contains("No tasks yet"));
    }

    #[test]
    fn long_titles_are_truncated() {
        plain();
        let long = "x".repeat(200);
        let tasks = vec![display(1, TaskDraft::new(long, "2024-05-12"))];
        let output = render_task_list(&tasks, &[], today(), false);
        assert!(output.contains('…'));
        assert!(output.lines().next().unwrap().width() <= LINE_WIDTH);
    }

    #[test]
    fn category_rows_include_counts() {
        plain();
        let categories: Vec<_> = default_categories(Utc::now())
            .into_iter()
            .enumerate()
            .map(|(i, category)| DisplayCategory {
                index: i + 1,
                category,
                task_count: i,
            })
            .collect();
        let output = render_category_list(&categories);
        assert!(output.contains("1. ■ Work"));
        assert!(output.contains("0 tasks"));
        assert!(output.contains("1 task\n"));
        assert!(output.contains("#F59E0B"));
    }

    #[test]
    fn statistics_block() {
        plain();
        let stats = Statistics {
            total_tasks: 4,
            completed_tasks: 1,
            completed_today: 1,
            completed_this_week: 1,
            pending_tasks: 3,
            overdue_tasks: 2,
            completion_rate: 25.0,
        };
        let output = render_statistics(&stats);
        assert!(output.contains("Total       4"));
        assert!(output.contains("Completed   1 (25%)"));
        assert!(output.contains("Overdue     2"));
    }

    #[test]
    fn truncation_respects_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
    }
}
