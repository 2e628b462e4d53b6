//! `deskchat clear` command implementation.

use crate::cli::Context;
use crate::core::SessionStore;
use crate::error::{Error, Result};

/// Run the clear command.
///
/// Removes every saved chat. Requires `yes` so a stray invocation does
/// nothing.
///
/// # Errors
///
/// Returns an error without `yes`, or if storage fails.
pub fn run(ctx: &Context, yes: bool) -> Result<()> {
    let mut session = SessionStore::open(&ctx.store);
    let count = session.histories().len();

    if count == 0 {
        println!("No chats to clear.");
        return Ok(());
    }
    if !yes {
        return Err(Error::NotConfirmed(format!(
            "refusing to delete {count} chat(s) without --yes"
        )));
    }

    session.clear_history()?;
    println!("Cleared {count} chat(s).");
    Ok(())
}
