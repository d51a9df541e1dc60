//! Login command - check credentials
//!
//! The session only lives as long as the process, so this verifies the
//! credentials and greets the user. Use `ck shop` for a signed-in session.

use anyhow::Result;
use clipkart_core::{EntryPoint, OperationResult};

use super::{error_kind, get_context, password_or_prompt, text_or_prompt, EventLog};
use crate::output;

pub fn run(email: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let log = EventLog::open(EntryPoint::Cli);
    log.command("login");

    let ctx = get_context()?;

    let email = text_or_prompt(email, "Email")?;
    let password = password_or_prompt(password, "Password")?;

    let result = ctx.auth_service.login(&email, &password);
    match &result {
        Ok(_) => log.event("login_succeeded"),
        Err(e) => log.error("login_failed", error_kind(e), None),
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
    output::success(&format!("Hi {}!", user.display_name()));
    Ok(())
}
