//! CLI command implementations

pub mod color;
pub mod demo;
pub mod login;
pub mod logs;
pub mod products;
pub mod register;
pub mod reset_password;
pub mod shop;
pub mod stores;

use std::env;
use std::future::Future;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clipkart_core::{AuthError, ClipkartContext, EntryPoint, Error, LoggingService, ValidationError};
use dialoguer::{Input, Password};

/// Environment variable supplying a password non-interactively
pub const PASSWORD_ENV: &str = "CLIPKART_PASSWORD";

/// Best-effort event log for a command
///
/// Opening or writing the log never fails a command; problems are dropped.
pub struct EventLog(Option<LoggingService>);

impl EventLog {
    pub fn open(entry_point: EntryPoint) -> Self {
        Self::in_dir(&get_clipkart_dir(), entry_point)
    }

    fn in_dir(data_dir: &Path, entry_point: EntryPoint) -> Self {
        let service = std::fs::create_dir_all(data_dir)
            .ok()
            .and_then(|_| LoggingService::new(data_dir, entry_point, env!("CARGO_PKG_VERSION")).ok());
        Self(service)
    }

    pub fn command(&self, command: &str) {
        if let Some(l) = &self.0 {
            let _ = l.log_command(command);
        }
    }

    pub fn screen(&self, screen: &str) {
        if let Some(l) = &self.0 {
            let _ = l.log_screen(screen);
        }
    }

    pub fn event(&self, event: &str) {
        if let Some(l) = &self.0 {
            let _ = l.log_event(event);
        }
    }

    pub fn error(&self, event: &str, message: &str, details: Option<&str>) {
        if let Some(l) = &self.0 {
            let _ = l.log_error(event, message, details);
        }
    }
}

/// Get the data directory from environment or default
pub fn get_clipkart_dir() -> PathBuf {
    if let Ok(dir) = env::var("CLIPKART_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .map(|home| home.join(".clipkart"))
            .unwrap_or_else(|| PathBuf::from(".clipkart"))
    }
}

/// Create the context, creating the data directory if needed
pub fn get_context() -> Result<ClipkartContext> {
    let data_dir = get_clipkart_dir();

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    ClipkartContext::new(&data_dir).context("Failed to initialize clipkart context")
}

/// Run a future to completion on a fresh single-threaded runtime
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

/// Read one line from stdin without the trailing newline
fn read_stdin_line() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Text field: flag value, piped stdin line, or interactive prompt
///
/// Empty answers are allowed so the core can report missing fields.
pub fn text_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(v) = value {
        return Ok(v);
    }
    if atty::isnt(atty::Stream::Stdin) {
        return read_stdin_line();
    }
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

/// Password field: flag value, `CLIPKART_PASSWORD`, piped stdin, or hidden prompt
pub fn password_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(p) = value {
        return Ok(p);
    }
    if let Ok(p) = env::var(PASSWORD_ENV) {
        return Ok(p);
    }
    if atty::isnt(atty::Stream::Stdin) {
        return read_stdin_line();
    }
    Ok(Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?)
}

/// Short, privacy-safe category of a core error for the event log
pub fn error_kind(error: &Error) -> &'static str {
    match error {
        Error::Validation(ValidationError::MissingCredentials) => "missing_credentials",
        Error::Validation(ValidationError::MissingFields) => "missing_fields",
        Error::Validation(ValidationError::PasswordMismatch) => "password_mismatch",
        Error::Validation(ValidationError::DuplicateEmail) => "duplicate_email",
        Error::Auth(AuthError::UnknownUser) => "unknown_user",
        Error::Auth(AuthError::StoreUnavailable(_)) => "store_unavailable",
        Error::Fetch(_) => "catalog_unavailable",
        Error::InvalidInput(_) => "invalid_input",
        _ => "internal",
    }
}
