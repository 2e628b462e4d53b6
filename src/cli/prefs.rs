//! `deskchat prefs` command implementation.

use crate::cli::Context;
use crate::error::Result;
use crate::prefs::{PrefKey, reset_preference, set_preference};

/// Show effective preferences.
///
/// # Errors
///
/// Returns an error if preferences cannot be loaded.
pub fn show(ctx: &Context) -> Result<()> {
    let prefs = ctx.preferences()?;
    println!("theme    {}", prefs.theme);
    println!("user-id  {}", prefs.user_id);
    println!("api-url  {}", prefs.api_url);
    Ok(())
}

/// Store a preference.
///
/// # Errors
///
/// Returns an error for an unknown key, an invalid value, or a storage failure.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let key: PrefKey = key.parse()?;
    set_preference(&ctx.store, key, value)?;
    println!("Saved {}.", key.storage_key());
    Ok(())
}

/// Forget a stored preference.
///
/// # Errors
///
/// Returns an error for an unknown key or a storage failure.
pub fn reset(ctx: &Context, key: &str) -> Result<()> {
    let key: PrefKey = key.parse()?;
    reset_preference(&ctx.store, key)?;
    println!("Reset {}.", key.storage_key());
    Ok(())
}
