//! TimeGrid - conflict-free schedules and calendar grids
//!
//! Command-line entry point. Every subcommand prints its result as JSON on
//! stdout; logs go to stderr.

use std::io::Write;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use timegrid_domain::OwnerId;
use timegrid_infra::config;
use timegrid_lib::utils::logging::init_tracing;
use timegrid_lib::{
    add_schedule_item, get_daily_calendar, get_monthly_calendar, get_schedule_item,
    get_weekly_calendar, list_upcoming, migrate_database, remove_schedule_item,
    update_schedule_item, AppContext, ScheduleItemInput,
};

#[derive(Debug, Parser)]
#[command(name = "timegrid", version, about = "Per-owner schedules with overlap checks")]
struct Cli {
    /// Owner whose items are read or written
    #[arg(long, global = true, default_value = "default")]
    owner: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create or upgrade the database schema
    Migrate,
    /// Add a schedule item
    Add(ItemArgs),
    /// Replace every field of an existing item
    Update {
        id: String,
        #[command(flatten)]
        item: ItemArgs,
    },
    /// Delete an item
    Remove { id: String },
    /// Show one item
    Show { id: String },
    /// List the next items in start order
    Upcoming,
    /// Hour grid of one day
    Daily {
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Monday-to-Friday grid of one week
    Weekly {
        /// Any day of the week (YYYY-MM-DD), defaults to this week
        #[arg(long)]
        week_start: Option<String>,
    },
    /// Calendar page of one month
    Monthly {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
}

#[derive(Debug, Args)]
struct ItemArgs {
    #[arg(long)]
    title: String,
    /// YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// HH:MM
    #[arg(long)]
    time: String,
    /// Minutes, defaults to 60
    #[arg(long)]
    duration: Option<u32>,
    /// classes or work
    #[arg(long = "type")]
    item_type: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl From<ItemArgs> for ScheduleItemInput {
    fn from(args: ItemArgs) -> Self {
        Self {
            item_type: args.item_type,
            title: args.title,
            notes: args.notes,
            date: args.date,
            time: args.time,
            duration_minutes: args.duration,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before configuration so TIMEGRID_* overrides apply
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let loaded = config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_tracing(&config.logging);
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env file loaded"),
    }
    if let Err(err) = &loaded {
        tracing::warn!(error = %err, "no configuration found, using defaults");
    }

    let ctx =
        AppContext::new_with_config(config).context("failed to initialise application context")?;

    let owner = OwnerId::new(cli.owner);
    match cli.command {
        Command::Migrate => print_json(&migrate_database(&ctx)?),
        Command::Add(item) => print_json(&add_schedule_item(&ctx, &owner, item.into()).await?),
        Command::Update { id, item } => {
            print_json(&update_schedule_item(&ctx, &owner, &id, item.into()).await?)
        }
        Command::Remove { id } => {
            remove_schedule_item(&ctx, &owner, &id).await?;
            print_json(&serde_json::json!({ "removed": id }))
        }
        Command::Show { id } => print_json(&get_schedule_item(&ctx, &owner, &id).await?),
        Command::Upcoming => print_json(&list_upcoming(&ctx, &owner).await?),
        Command::Daily { date } => {
            print_json(&get_daily_calendar(&ctx, &owner, date.as_deref()).await?)
        }
        Command::Weekly { week_start } => {
            print_json(&get_weekly_calendar(&ctx, &owner, week_start.as_deref()).await?)
        }
        Command::Monthly { year, month } => {
            print_json(&get_monthly_calendar(&ctx, &owner, year, month).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("failed to write JSON output")?;
    writeln!(stdout)?;
    Ok(())
}
