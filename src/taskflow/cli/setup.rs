use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskflow::model::{Priority, Status};

/// Returns the version string, with the git hash appended for builds from a checkout.
/// Format: "0.1.0" or "0.1.0@abc1234"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "taskflow", bin_name = "taskflow", version = get_version())]
#[command(about = "Track tasks with priorities, due dates and reminders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (diagnostics on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Task(TaskCommands),

    #[command(flatten)]
    Data(DataCommands),

    /// Manage categories
    #[command(subcommand, alias = "cat", display_order = 30)]
    Category(CategoryCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

/// View constraints shared by `list` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text to find in title or description
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only tasks with this status (todo, in-progress, done)
    #[arg(long)]
    pub status: Option<Status>,

    /// Only tasks with this priority (low, medium, high)
    #[arg(short, long)]
    pub priority: Option<Priority>,

    /// Only tasks in this category (name or index)
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks, highest priority and earliest due first
    #[command(alias = "ls", display_order = 1)]
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Add a task
    #[command(alias = "a", display_order = 2)]
    Add {
        /// Title words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: String,

        #[arg(short = 'D', long)]
        description: Option<String>,

        /// low, medium or high [default: medium]
        #[arg(short, long)]
        priority: Option<Priority>,

        /// todo, in-progress or done [default: todo]
        #[arg(long)]
        status: Option<Status>,

        /// Category name or index [default: first category]
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Change fields of a task
    #[command(alias = "e", display_order = 3)]
    Edit {
        /// Index of the task
        index: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,

        #[arg(short, long)]
        priority: Option<Priority>,

        #[arg(long)]
        status: Option<Status>,

        /// Category name or index
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Flip tasks between Done and To Do
    #[command(alias = "t", display_order = 4)]
    Toggle {
        /// Indexes of the tasks (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Delete tasks
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Indexes of the tasks (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show completion statistics
    #[command(display_order = 20)]
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the (filtered) task list as CSV
    #[command(display_order = 21)]
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Write to this file instead of the export directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories with their task counts
    #[command(alias = "ls")]
    List,

    /// Add a category
    Add {
        name: String,

        /// Display color (#RRGGBB)
        #[arg(long)]
        color: Option<String>,
    },

    /// Rename or recolor a category
    Edit {
        /// Category name or index
        category: String,

        #[arg(short, long)]
        name: Option<String>,

        /// Display color (#RRGGBB)
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a category; its tasks move to the first remaining one
    #[command(alias = "rm")]
    Delete {
        /// Category name or index
        category: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Show or change the reminder preference
    #[command(display_order = 40)]
    Notifications {
        /// on or off
        state: Option<Toggle>,
    },

    /// Check once for tasks due tomorrow
    #[command(display_order = 41)]
    Remind,

    /// Keep checking for tasks due tomorrow until interrupted
    #[command(display_order = 42)]
    Watch {
        /// Seconds between checks [default: reminder-interval config]
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,

        /// Stop after this many checks
        #[arg(short = 'n', long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        count: Option<usize>,
    },

    /// Get or set configuration
    #[command(display_order = 43)]
    Config {
        /// Configuration key (reminder-interval, export-dir)
        key: Option<String>,
        /// Value to set
        value: Option<String>,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}
