//! Check command - report version groups without renaming

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub fn run(dir: Option<PathBuf>, json: bool) -> Result<()> {
    let ctx = get_context(dir)?;
    let report = ctx.normalize_service.check()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Migration Versions".bold());
    println!("Directory: {}", report.directory.display());
    println!(
        "{} ({} without a version)",
        output::plural(report.files, "migration file"),
        report.skipped
    );
    println!();

    if report.is_clean() {
        output::success("All versions are unique and fully timestamped");
        return Ok(());
    }

    if !report.date_only.is_empty() {
        println!("{}", output::group_table("Date-only version", &report.date_only));
        output::info("Run `vernorm fix` to expand these to 14-digit versions");
        println!();
    }

    if !report.collisions.is_empty() {
        println!("{}", output::group_table("Colliding version", &report.collisions));
        output::warning("These versions are not date-only and must be resolved by hand");
    }

    Ok(())
}
