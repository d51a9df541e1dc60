//! Logs command - inspect the local event log
//!
//! Entries never contain account details, so the output is safe to paste
//! into a bug report.

use anyhow::Result;
use chrono::{Duration, Local, TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use serde::Serialize;

use super::get_clipkart_dir;
use crate::output;
use clipkart_core::{EntryPoint, LogEntry, LoggingService};

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent events, newest first
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Only events that recorded a problem
        #[arg(long, conflicts_with = "event")]
        errors: bool,
        /// Only events with this name (e.g. login_failed)
        #[arg(long)]
        event: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete old events
    Clear {
        /// Keep events from the last N days
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarize the log by event
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct EventCount {
    event: String,
    count: u64,
}

#[derive(Serialize)]
struct LogStats {
    total: u64,
    problems: u64,
    events: Vec<EventCount>,
    path: String,
    size_bytes: u64,
}

fn open_log() -> Result<LoggingService> {
    let data_dir = get_clipkart_dir();
    std::fs::create_dir_all(&data_dir)?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
}

/// Local wall-clock time of an entry
fn when(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.with_timezone(&Local).format("%b %d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// "shop > cart", "cli > products", or just the entry point
fn origin(entry: &LogEntry) -> String {
    match entry.screen.as_deref().or(entry.command.as_deref()) {
        Some(place) => format!("{} > {}", entry.entry_point, place),
        None => entry.entry_point.clone(),
    }
}

fn problem(entry: &LogEntry) -> String {
    match (&entry.error_message, &entry.error_details) {
        (Some(message), Some(details)) => format!("{} ({})", message, details),
        (Some(message), None) => message.clone(),
        _ => String::new(),
    }
}

pub fn run(command: LogsCommands) -> Result<()> {
    let log = open_log()?;

    match command {
        LogsCommands::List {
            limit,
            errors,
            event,
            json,
        } => {
            let entries = match (&event, errors) {
                (Some(name), _) => log.get_by_event(name, limit)?,
                (None, true) => log.get_errors(limit)?,
                (None, false) => log.get_recent(limit)?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }
            if entries.is_empty() {
                output::info("Nothing logged yet.");
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["When", "Where", "Event", "Problem"]);
            for entry in &entries {
                table.add_row(vec![
                    when(entry.timestamp),
                    origin(entry),
                    entry.event.clone(),
                    problem(entry).red().to_string(),
                ]);
            }
            println!("{}", table);
        }

        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => {
            let cutoff = Utc::now() - Duration::days(older_than_days as i64);

            if !force && !json {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Delete events from before {}?",
                        cutoff.with_timezone(&Local).format("%b %d %Y")
                    ))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    output::warning("Kept all events.");
                    return Ok(());
                }
            }

            let deleted = log.delete_before(cutoff.timestamp_millis())?;
            if json {
                println!("{}", serde_json::json!({ "deleted": deleted }));
            } else {
                output::success(&format!("Removed {} event(s)", deleted));
            }
        }

        LogsCommands::Stats { json } => {
            let path = log.db_path().to_path_buf();
            let stats = LogStats {
                total: log.count()?,
                problems: log.count_errors()?,
                events: log
                    .event_counts()?
                    .into_iter()
                    .map(|(event, count)| EventCount { event, count })
                    .collect(),
                path: path.display().to_string(),
                size_bytes: std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            println!(
                "{} events, {} with problems ({})",
                stats.total.to_string().bold(),
                stats.problems.to_string().red(),
                output::format_size(stats.size_bytes)
            );
            if !stats.events.is_empty() {
                let mut table = output::create_table();
                table.set_header(vec!["Event", "Count"]);
                for row in &stats.events {
                    table.add_row(vec![row.event.clone(), row.count.to_string()]);
                }
                println!("{}", table);
            }
            println!("{}", stats.path.dimmed());
        }
    }

    Ok(())
}
