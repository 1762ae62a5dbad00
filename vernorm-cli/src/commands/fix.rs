//! Fix command - rename date-only migrations in place

use std::path::PathBuf;

use anyhow::Result;
use vernorm_core::NormalizeEvent;

use super::get_context;
use crate::output;

pub fn run(dir: Option<PathBuf>, json: bool) -> Result<()> {
    let ctx = get_context(dir)?;
    let service = &ctx.normalize_service;

    let mut renamed = 0usize;
    let result = service.run_with(|event| match event {
        NormalizeEvent::GroupStarted(group) => {
            if !json {
                output::info(&output::group_line(group));
            }
        }
        NormalizeEvent::Renamed(op) => {
            renamed += 1;
            if !json {
                println!("{}", output::rename_line(op));
            }
        }
    });

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            if renamed > 0 {
                output::warning(&format!(
                    "{} renamed before the failure; the directory is partially normalized",
                    output::plural(renamed, "file")
                ));
            }
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.renamed.is_empty() {
        println!("Nothing to rename in {}", report.directory.display());
    } else {
        output::success(&format!(
            "Renamed {} in {}",
            output::plural(report.renamed.len(), "file"),
            output::plural(report.groups.len(), "version group")
        ));
    }

    Ok(())
}
