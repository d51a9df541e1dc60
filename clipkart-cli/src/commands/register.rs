//! Register command - create an account

use anyhow::Result;
use clipkart_core::{EntryPoint, OperationResult, RegistrationForm};

use super::{error_kind, get_context, password_or_prompt, text_or_prompt, EventLog};
use crate::output;

pub fn run(
    email: Option<String>,
    full_name: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
    json: bool,
) -> Result<()> {
    let log = EventLog::open(EntryPoint::Cli);
    log.command("register");

    let ctx = get_context()?;

    let email = text_or_prompt(email, "Email")?;
    let full_name = text_or_prompt(full_name, "Full name")?;
    let password = password_or_prompt(password, "Password")?;
    // Piped/env passwords confirm themselves unless given explicitly
    let confirm_password = match confirm_password {
        Some(p) => p,
        None if atty::is(atty::Stream::Stdin) => password_or_prompt(None, "Confirm password")?,
        None => password.clone(),
    };

    let form = RegistrationForm::new(email, password, full_name, confirm_password);
    let result = ctx.auth_service.register(&form);

    match &result {
        Ok(_) => log.event("account_created"),
        Err(e) => log.error("registration_failed", error_kind(e), None),
    }

    if json {
        let op: OperationResult<_> = result.into();
        println!("{}", serde_json::to_string_pretty(&op)?);
        return match op.error {
            Some(e) => Err(anyhow::anyhow!(e)),
            None => Ok(()),
        };
    }

    let user = result?;
    output::success(&format!("Account created for {}", user.display_name()));
    output::info("Run 'ck login' or 'ck shop' to sign in.");
    Ok(())
}

