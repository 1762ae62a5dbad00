//! CLI command implementations

pub mod check;
pub mod fix;

use std::path::PathBuf;

use anyhow::{Context, Result};
use vernorm_core::VernormContext;

/// Build the vernorm context for the current working directory
pub fn get_context(dir: Option<PathBuf>) -> Result<VernormContext> {
    let work_dir = std::env::current_dir().context("Failed to determine working directory")?;

    let ctx = VernormContext::new(&work_dir, dir).context("Failed to load vernorm configuration")?;
    tracing::debug!(dir = %ctx.config.migrations_dir.display(), "using migrations directory");
    Ok(ctx)
}
