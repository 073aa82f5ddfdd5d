//! Normalize command - canonicalize an override payload
//!
//! Exposed so the caller persisting release state can store and compare
//! payloads in the same canonical form the reconciler uses.

use std::path::Path;

use helmdrive_core::overrides;

use crate::commands::read_payload;
use crate::error::Result;

/// Run the normalize command
pub fn run(file: Option<&Path>, lenient: bool) -> Result<()> {
    // No file means stdin here, not an empty payload.
    let payload = read_payload(Some(file.unwrap_or(Path::new("-"))))?;

    let normalized = if lenient {
        overrides::normalize_lenient(&payload)
    } else {
        overrides::normalize(&payload)?
    };

    println!("{}", normalized);
    Ok(())
}
