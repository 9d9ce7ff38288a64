//! CLI subcommand implementations.

pub mod filer;
pub mod filers;
pub mod history;
pub mod ownerships;
pub mod prefs;
pub mod search;

use anyhow::{bail, Result};
use shareholding_lib::{ResourceId, ShareholdingError};

/// Turns a settled view error into the command's failure.
fn check_error(error: Option<String>) -> Result<()> {
    match error {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}

/// Rejects ids the views would silently ignore.
fn parse_id(raw: &str) -> Result<ResourceId> {
    let id = ResourceId::parse(raw);
    if !id.is_valid() {
        return Err(ShareholdingError::InvalidId.into());
    }
    Ok(id)
}
