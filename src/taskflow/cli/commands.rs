use super::render::{print_messages, render_category_list, render_statistics, render_task_list};
use super::setup::{
    CategoryCommands, Cli, Commands, DataCommands, FilterArgs, MiscCommands, TaskCommands,
};
use super::styles::parse_hex;
use chrono::Local;
use clap::Parser;
use directories::ProjectDirs;
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Duration;
use taskflow::api::{
    CategoryUpdate, CmdMessage, ConfigAction, MessageLevel, TaskQuery, TaskUpdate, TaskflowApi,
};
use taskflow::config::TaskflowConfig;
use taskflow::error::{Result, TaskflowError};
use taskflow::index::{resolve, Selector};
use taskflow::model::{parse_due_date, CategoryDraft, TaskDraft};
use taskflow::notify::TerminalSink;
use taskflow::scheduler::ReminderTimer;
use taskflow::store::fs_backend::FsBackend;
use tracing::{debug, warn};

const HOME_ENV: &str = "TASKFLOW_HOME";

struct AppContext {
    api: TaskflowApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    taskflow::logging::init(cli.verbose);

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Task(cmd)) => match cmd {
            TaskCommands::List { filters } => handle_list(&mut ctx, filters),
            TaskCommands::Add {
                title,
                due,
                description,
                priority,
                status,
                category,
            } => {
                let mut draft = TaskDraft::new(title.join(" "), due);
                if let Some(description) = description {
                    draft = draft.with_description(description);
                }
                if let Some(priority) = priority {
                    draft = draft.with_priority(priority);
                }
                if let Some(status) = status {
                    draft = draft.with_status(status);
                }
                handle_add(&mut ctx, draft, category)
            }
            TaskCommands::Edit {
                index,
                title,
                description,
                due,
                priority,
                status,
                category,
            } => {
                let update = TaskUpdate {
                    title,
                    description,
                    due_date: due,
                    priority,
                    status,
                    category_id: category,
                };
                handle_edit(&mut ctx, index, update)
            }
            TaskCommands::Toggle { indexes } => handle_toggle(&mut ctx, indexes),
            TaskCommands::Delete { indexes, yes } => handle_delete(&mut ctx, indexes, yes),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Stats { json } => handle_stats(&mut ctx, json),
            DataCommands::Export { filters, output } => handle_export(&mut ctx, filters, output),
        },
        Some(Commands::Category(cmd)) => match cmd {
            CategoryCommands::List => handle_category_list(&mut ctx),
            CategoryCommands::Add { name, color } => handle_category_add(&mut ctx, name, color),
            CategoryCommands::Edit {
                category,
                name,
                color,
            } => handle_category_edit(&mut ctx, category, CategoryUpdate { name, color }),
            CategoryCommands::Delete { category, yes } => {
                handle_category_delete(&mut ctx, category, yes)
            }
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Notifications { state } => {
                handle_notifications(&mut ctx, state.map(|s| s.enabled()))
            }
            MiscCommands::Remind => handle_remind(&mut ctx),
            MiscCommands::Watch { interval, count } => handle_watch(&mut ctx, interval, count),
            MiscCommands::Config { key, value } => handle_config(&mut ctx, key, value),
        },
        None => handle_list(&mut ctx, FilterArgs::default()),
    }
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    debug!(data_dir = %data_dir.display(), "opening store");
    Ok(AppContext {
        api: TaskflowApi::open(data_dir),
    })
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "taskflow", "taskflow")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TaskflowError::Config("Could not determine a data directory".into()))
}

fn query_from(filters: FilterArgs) -> TaskQuery {
    TaskQuery {
        search: filters.search,
        status: filters.status,
        priority: filters.priority,
        category: filters.category,
    }
}

fn is_filtered(query: &TaskQuery) -> bool {
    query.search.as_deref().is_some_and(|s| !s.trim().is_empty())
        || query.status.is_some()
        || query.priority.is_some()
        || query.category.is_some()
}

fn handle_list(ctx: &mut AppContext, filters: FilterArgs) -> Result<()> {
    let query = query_from(filters);
    let filtered = is_filtered(&query);
    let result = ctx.api.list_tasks(query)?;
    let today = Local::now().date_naive();
    print!(
        "{}",
        render_task_list(
            &result.listed_tasks,
            ctx.api.store().categories(),
            today,
            filtered
        )
    );
    print_messages(&result.messages);
    Ok(())
}

/// Non-blocking: an unrecognized date is stored as typed and sorts last.
fn due_date_warning(due: &str) -> Option<CmdMessage> {
    if due.trim().is_empty() || parse_due_date(due).is_some() {
        return None;
    }
    Some(CmdMessage::warning(format!(
        "Due date '{}' is not a YYYY-MM-DD date; the task will sort last.",
        due.trim()
    )))
}

fn handle_add(ctx: &mut AppContext, draft: TaskDraft, category: Option<String>) -> Result<()> {
    let warning = due_date_warning(&draft.due_date);
    let result = ctx.api.add_task(draft, category.as_deref())?;
    print_messages(&result.messages);
    if !result.is_noop() {
        print_messages(warning.as_slice());
    }
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, index: String, update: TaskUpdate) -> Result<()> {
    let warning = update.due_date.as_deref().and_then(due_date_warning);
    let result = ctx.api.edit_task(&index, update)?;
    print_messages(&result.messages);
    if !result.is_noop() {
        print_messages(warning.as_slice());
    }
    Ok(())
}

fn handle_toggle(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.toggle_tasks(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, indexes: Vec<String>, yes: bool) -> Result<()> {
    if !yes {
        println!("This will permanently delete:");
        for input in &indexes {
            let found = input
                .parse::<Selector>()
                .ok()
                .and_then(|s| resolve(ctx.api.store().tasks(), &s));
            if let Some((index, task)) = found {
                println!("  {}. {}", index, task.title);
            }
        }
        if !confirm("Delete?")? {
            print_messages(&[CmdMessage::info("Operation cancelled.")]);
            return Ok(());
        }
    }

    let result = ctx.api.delete_tasks(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &mut AppContext, json: bool) -> Result<()> {
    let result = ctx.api.statistics()?;
    if let Some(stats) = &result.statistics {
        if json {
            println!("{}", serde_json::to_string_pretty(stats)?);
        } else {
            print!("{}", render_statistics(stats));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &mut AppContext, filters: FilterArgs, output: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export_tasks(query_from(filters), output)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_category_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list_categories()?;
    print!("{}", render_category_list(&result.listed_categories));
    print_messages(&result.messages);
    Ok(())
}

fn check_color(color: &Option<String>) -> Result<()> {
    match color {
        Some(c) if parse_hex(c).is_none() => Err(TaskflowError::Api(format!(
            "Invalid color '{}', expected #RRGGBB",
            c
        ))),
        _ => Ok(()),
    }
}

fn handle_category_add(ctx: &mut AppContext, name: String, color: Option<String>) -> Result<()> {
    check_color(&color)?;
    let mut draft = CategoryDraft::new(name);
    if let Some(color) = color {
        draft = draft.with_color(color);
    }
    let result = ctx.api.add_category(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_category_edit(ctx: &mut AppContext, category: String, update: CategoryUpdate) -> Result<()> {
    check_color(&update.color)?;
    let result = ctx.api.edit_category(&category, update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_category_delete(ctx: &mut AppContext, category: String, yes: bool) -> Result<()> {
    if !yes {
        let listing = ctx.api.list_categories()?;
        let target = listing.listed_categories.iter().find(|dc| {
            dc.category.name.eq_ignore_ascii_case(category.trim())
                || dc.index.to_string() == category.trim()
                || dc.category.id == category.trim()
        });
        if let Some(dc) = target {
            println!(
                "Category '{}' has {} task(s); they will move to the first remaining category.",
                dc.category.name, dc.task_count
            );
        }
        if !confirm("Delete category?")? {
            print_messages(&[CmdMessage::info("Operation cancelled.")]);
            return Ok(());
        }
    }

    let result = ctx.api.delete_category(&category)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_notifications(ctx: &mut AppContext, enabled: Option<bool>) -> Result<()> {
    let result = ctx.api.notifications(enabled)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remind(ctx: &mut AppContext) -> Result<()> {
    let mut sink = TerminalSink::stdout();
    let result = ctx.api.remind(&mut sink)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_watch(ctx: &mut AppContext, interval: Option<u64>, count: Option<usize>) -> Result<()> {
    if !ctx.api.store().notifications_enabled() {
        print_messages(&[CmdMessage::info(
            "Notifications are off. Turn them on with `taskflow notifications on`.",
        )]);
        return Ok(());
    }

    let data_dir = ctx.api.data_dir().to_path_buf();
    let interval = match interval {
        Some(secs) => Duration::from_secs(secs),
        None => TaskflowConfig::load(&data_dir)?.reminder_interval(),
    };
    println!(
        "Checking for tasks due tomorrow every {}s. Press Ctrl-C to stop.",
        interval.as_secs()
    );

    let mut sink = TerminalSink::stdout();
    let mut check = move || {
        // Reopen each pass so edits made by other invocations are seen
        let api = TaskflowApi::open(data_dir.clone());
        if !api.store().notifications_enabled() {
            print_messages(&[CmdMessage::info(
                "Notifications were turned off. Stopped watching.",
            )]);
            return ControlFlow::Break(());
        }
        match api.remind(&mut sink) {
            Ok(result) => {
                let shown: Vec<_> = result
                    .messages
                    .into_iter()
                    .filter(|m| m.level != MessageLevel::Info)
                    .collect();
                print_messages(&shown);
            }
            Err(e) => warn!(error = %e, "reminder check failed"),
        }
        ControlFlow::Continue(())
    };

    if check().is_break() {
        return Ok(());
    }
    let timer = match count {
        Some(n) if n <= 1 => return Ok(()),
        Some(n) => ReminderTimer::start_bounded(interval, n - 1, check),
        None => ReminderTimer::start(interval, check),
    };
    let ticks = timer.wait();
    debug!(ticks, "watch finished");
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = ctx.api.config(action)?;
    print_messages(&result.messages);
    Ok(())
}

/// Asks a y/N question on the terminal. Anything but "y"/"yes" declines.
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(matches!(
        input.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
