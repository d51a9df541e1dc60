//! Color command - terminal colour preference
//!
//! The choice is stored in settings.json and applied at startup of every
//! `ck` invocation.

use anyhow::Result;
use clap::Subcommand;

use super::{get_clipkart_dir, EventLog};
use crate::output;
use clipkart_core::config::{ColorMode, Config};
use clipkart_core::EntryPoint;

#[derive(Subcommand)]
pub enum ColorCommands {
    /// Follow the terminal (NO_COLOR, pipes)
    Auto,
    /// Always use colours
    Always,
    /// Plain text only
    Never,
}

impl From<ColorCommands> for ColorMode {
    fn from(command: ColorCommands) -> Self {
        match command {
            ColorCommands::Auto => ColorMode::Auto,
            ColorCommands::Always => ColorMode::Always,
            ColorCommands::Never => ColorMode::Never,
        }
    }
}

pub fn run(command: Option<ColorCommands>) -> Result<()> {
    EventLog::open(EntryPoint::Cli).command("color");

    let data_dir = get_clipkart_dir();
    std::fs::create_dir_all(&data_dir)?;
    let mut config = Config::load(&data_dir)?;

    match command {
        Some(command) => {
            config.color_mode = command.into();
            config.save(&data_dir)?;
            output::apply_color_mode(config.color_mode);
            output::success(&format!("Colour mode set to {}", config.color_mode));
        }
        None => println!("Colour mode is {}", config.color_mode),
    }
    Ok(())
}
