mod commands;
mod dates;
mod render;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use evcal_core::config::EvcalConfig;
use evcal_core::grid::CalendarView;
use evcal_core::storage::{FileStore, JsonPersistence};
use evcal_core::{EventColor, EventStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evcal")]
#[command(about = "Month-view event calendar kept in a local JSON file")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid (default command)
    Month {
        /// Any day in the month to show (YYYY-MM-DD or e.g. "march 1")
        #[arg(short, long)]
        date: Option<String>,

        /// Move forward this many months
        #[arg(long, default_value_t = 0, conflicts_with = "prev")]
        next: u32,

        /// Move back this many months
        #[arg(long, default_value_t = 0)]
        prev: u32,
    },
    /// List the events on one day
    Day {
        /// Day to list (defaults to today)
        date: Option<String>,
    },
    /// Create an event (prompts for anything missing)
    Add {
        /// Event title
        title: Option<String>,

        /// Day of the event (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Time of day, free-form (e.g. "09:00")
        #[arg(short, long)]
        time: Option<String>,

        /// Event description
        #[arg(long)]
        description: Option<String>,

        /// Chip color: blue, purple, pink, green, orange or red
        #[arg(short, long)]
        color: Option<EventColor>,

        /// Recurrence: none, daily, weekly, monthly or custom
        #[arg(short, long)]
        repeat: Option<String>,
    },
    /// Edit an event; fields not given keep their current value
    Edit {
        /// Event id (see `evcal day`)
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        time: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        color: Option<EventColor>,

        #[arg(short, long)]
        repeat: Option<String>,
    },
    /// Delete an event
    Delete {
        /// Event id (see `evcal day`)
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Move an event to another day
    Move {
        /// Event id (see `evcal day`)
        id: String,

        /// Target day
        date: String,
    },
    /// Show or change configuration
    Config {
        /// First day of the week in the month view (e.g. "sunday", "monday")
        #[arg(long)]
        week_start: Option<chrono::Weekday>,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let today = Local::now().date_naive();

    match cli.command.unwrap_or(Commands::Month {
        date: None,
        next: 0,
        prev: 0,
    }) {
        Commands::Month { date, next, prev } => {
            let (config, store) = open_calendar()?;
            let reference = match date {
                Some(d) => dates::parse_date(&d)?,
                None => today,
            };
            let mut view = CalendarView::new(reference, config.week_start);
            for _ in 0..next {
                view.next();
            }
            for _ in 0..prev {
                view.prev();
            }
            commands::month::run(&store, &view, today)
        }
        Commands::Day { date } => {
            let (_, store) = open_calendar()?;
            let day = match date {
                Some(d) => dates::parse_date(&d)?,
                None => today,
            };
            commands::day::run(&store, day)
        }
        Commands::Add {
            title,
            date,
            time,
            description,
            color,
            repeat,
        } => {
            let fields = commands::FormFields {
                title,
                date,
                time,
                description,
                color,
                repeat,
            };
            let (_, mut store) = open_calendar()?;
            commands::add::run(&mut store, fields, today)
        }
        Commands::Edit {
            id,
            title,
            date,
            time,
            description,
            color,
            repeat,
        } => {
            let fields = commands::FormFields {
                title,
                date,
                time,
                description,
                color,
                repeat,
            };
            let (_, mut store) = open_calendar()?;
            commands::edit::run(&mut store, &id, fields)
        }
        Commands::Delete { id, yes } => {
            let (_, mut store) = open_calendar()?;
            commands::delete::run(&mut store, &id, yes)
        }
        Commands::Move { id, date } => {
            let (_, mut store) = open_calendar()?;
            commands::relocate::run(&mut store, &id, &date)
        }
        Commands::Config { week_start } => commands::config::run(week_start),
    }
}

/// Load the config and open the event store it points at. `config` does not
/// go through here so it can still rewrite a config file that fails to parse.
fn open_calendar() -> Result<(EvcalConfig, EventStore<JsonPersistence<FileStore>>)> {
    let config = EvcalConfig::load()?;
    let mut store = config.open_store();
    store.subscribe(|events| tracing::debug!(count = events.len(), "calendar changed"));
    Ok((config, store))
}

/// Log to stderr, filtered by `EVCAL_LOG` (default: warnings only).
fn init_logging() {
    let filter = EnvFilter::try_from_env("EVCAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
