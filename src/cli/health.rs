//! `deskchat health` command implementation.

use crate::cli::Context;
use crate::client::HttpClient;
use crate::error::Result;

/// Run the health command against the configured endpoint.
///
/// # Errors
///
/// Returns an error if the server cannot be reached or reports failure.
pub fn run(ctx: &Context) -> Result<()> {
    let prefs = ctx.preferences()?;
    let client = HttpClient::new(&prefs.api_url)?;
    let status = client.health()?;
    println!("{}: {status}", client.url());
    Ok(())
}
