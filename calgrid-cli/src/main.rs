mod commands;
mod format;
mod render;
mod utils;

use anyhow::{Context, Result};
use calgrid_core::month::YearMonth;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::commands::App;

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "Month view, event form and event details for your local calendars")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid and the events of the selected day
    Month {
        /// Month to show (YYYY-MM)
        #[arg(short, long)]
        month: Option<YearMonth>,

        /// Day to select (YYYY-MM-DD)
        #[arg(short, long)]
        select: Option<NaiveDate>,
    },
    /// List the events of one day (default today)
    Day { date: Option<NaiveDate> },
    /// Browse months and days interactively
    Browse,
    /// Create an event
    New {
        title: Option<String>,

        /// Start date or date/time (e.g. "2025-03-20 15:00", or "2025-03-20" for all day)
        #[arg(short, long)]
        start: Option<String>,

        /// End date/time, or a time on the start day (e.g. "16:30")
        #[arg(short, long)]
        end: Option<String>,

        #[arg(long)]
        all_day: bool,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        location: Option<String>,
    },
    /// Show the details of an event
    Show { id: String },
    /// Delete an event
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List calendars, or create one
    Calendars {
        #[command(subcommand)]
        command: Option<CalendarCommands>,
    },
    /// Show or request access to the calendar directory
    Permission {
        #[arg(long)]
        request: bool,
    },
    /// Show config paths and preferences
    Config,
}

#[derive(Subcommand)]
enum CalendarCommands {
    /// Create a calendar
    New {
        id: String,

        #[arg(long)]
        title: Option<String>,

        /// Events cannot be added to this calendar
        #[arg(long)]
        read_only: bool,
    },
}

fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_env("CALGRID_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set up logging")?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    if let Commands::Config = cli.command {
        return commands::config::run();
    }

    let app = App::load()?;

    match cli.command {
        Commands::Month { month, select } => commands::month::run(&app, month, select).await,
        Commands::Day { date } => commands::day::run(&app, date).await,
        Commands::Browse => commands::browse::run(&app).await,
        Commands::New {
            title,
            start,
            end,
            all_day,
            description,
            location,
        } => {
            let args = commands::new::NewArgs {
                title,
                start,
                end,
                all_day,
                description,
                location,
            };
            commands::new::run(&app, args).await
        }
        Commands::Show { id } => commands::show::run(&app, &id).await,
        Commands::Delete { id, yes } => commands::delete::run(&app, &id, yes).await,
        Commands::Calendars { command } => match command {
            None => commands::calendars::list(&app).await,
            Some(CalendarCommands::New {
                id,
                title,
                read_only,
            }) => commands::calendars::create(&app, &id, title, read_only).await,
        },
        Commands::Permission { request } => commands::permission::run(&app, request).await,
        Commands::Config => commands::config::run(),
    }
}
