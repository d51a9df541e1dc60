//! Reset-password command - overwrite an account's password

use anyhow::Result;
use clipkart_core::{EntryPoint, OperationResult};

use super::{error_kind, get_context, password_or_prompt, text_or_prompt, EventLog};
use crate::output;

pub fn run(email: Option<String>, new_password: Option<String>, json: bool) -> Result<()> {
    let log = EventLog::open(EntryPoint::Cli);
    log.command("reset-password");

    let ctx = get_context()?;

    let email = text_or_prompt(email, "Email")?;
    let new_password = password_or_prompt(new_password, "New password")?;

    let result = ctx.auth_service.reset_password(&email, &new_password);
    match &result {
        Ok(()) => log.event("password_reset"),
        Err(e) => log.error("password_reset_failed", error_kind(e), None),
    }

    if json {
        let op: OperationResult<()> = result.into();
        println!("{}", serde_json::to_string_pretty(&op)?);
        return match op.error {
            Some(e) => Err(anyhow::anyhow!(e)),
            None => Ok(()),
        };
    }

    result?;
    output::success("Password updated. You can log in with your new password.");
    Ok(())
}
