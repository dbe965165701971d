//! Access gate: a plaintext shared-secret check in front of every run.
//!
//! No hashing, lockout, or rate limiting. An unconfigured secret is a fatal
//! configuration error, not an open door.

use anyhow::{bail, Result};
use tracing::warn;

pub fn check_access(configured: Option<&str>, supplied: Option<&str>) -> Result<()> {
    let Some(secret) = configured else {
        bail!("access password is not configured");
    };

    match supplied {
        Some(value) if value == secret => Ok(()),
        _ => {
            warn!("Access denied: password missing or incorrect");
            bail!("incorrect access password");
        }
    }
}
