//! Demo command - switch between the live catalog and the offline demo catalog

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::{get_clipkart_dir, EventLog};
use clipkart_core::config::Config;
use clipkart_core::EntryPoint;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Use the built-in demo catalog
    #[command(name = "on")]
    On,
    /// Use the live catalog API
    #[command(name = "off")]
    Off,
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    EventLog::open(EntryPoint::Cli).command("demo");

    let data_dir = get_clipkart_dir();
    std::fs::create_dir_all(&data_dir)?;
    let mut config = Config::load(&data_dir)?;

    match command {
        Some(DemoCommands::On) => {
            config.enable_demo_mode();
            config.save(&data_dir)?;
            println!("{}", "Demo mode enabled".green());
            println!("Products now come from the offline demo catalog. Try 'ck products'.");
        }
        Some(DemoCommands::Off) => {
            config.disable_demo_mode();
            config.save(&data_dir)?;
            println!("{}", "Demo mode disabled".yellow());
        }
        Some(DemoCommands::Status) | None => {
            if config.demo_mode {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
                println!("Catalog: {}", config.catalog_url);
            }
        }
    }
    Ok(())
}
