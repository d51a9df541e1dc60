//! Clipkart CLI - shopping in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use clipkart_core::config::Config;
use commands::{color, demo, login, logs, products, register, reset_password, shop, stores};

/// Clipkart - shopping in your terminal
#[derive(Parser)]
#[command(name = "ck", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        /// Email address (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
        /// Full name (prompted if omitted)
        #[arg(long)]
        name: Option<String>,
        /// Password (prompted if omitted, or read from CLIPKART_PASSWORD)
        #[arg(long)]
        password: Option<String>,
        /// Password confirmation
        #[arg(long)]
        confirm_password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check your email and password
    Login {
        /// Email address (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted if omitted, or read from CLIPKART_PASSWORD)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a new password for an account
    ResetPassword {
        /// Email address (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
        /// New password (prompted if omitted, or read from CLIPKART_PASSWORD)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List products from the catalog
    Products {
        /// Number of pages to show
        #[arg(long, default_value = "1")]
        pages: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List store locations
    Stores {
        /// Show details for the store in this city
        #[arg(long)]
        city: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive shopping session
    Shop,

    /// Manage demo mode (offline catalog)
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// Show or set the terminal colour preference
    Color {
        #[command(subcommand)]
        command: Option<color::ColorCommands>,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(config) = Config::load(&commands::get_clipkart_dir()) {
        output::apply_color_mode(config.color_mode);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register {
            email,
            name,
            password,
            confirm_password,
            json,
        } => register::run(email, name, password, confirm_password, json),
        Commands::Login {
            email,
            password,
            json,
        } => login::run(email, password, json),
        Commands::ResetPassword {
            email,
            password,
            json,
        } => reset_password::run(email, password, json),
        Commands::Products { pages, json } => products::run(pages, json),
        Commands::Stores { city, json } => stores::run(city, json),
        Commands::Shop => shop::run(),
        Commands::Demo { command } => demo::run(command),
        Commands::Color { command } => color::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
