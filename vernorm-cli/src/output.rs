//! Console output for migration runs

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use vernorm_core::domain::GroupSummary;
use vernorm_core::RenameOp;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// "Processing version group 20240114 (2 files)"
pub fn group_line(group: &GroupSummary) -> String {
    format!(
        "Processing version group {} ({})",
        group.version,
        plural(group.files, "file")
    )
}

/// "Renaming 20240114_a.sql -> 20240114100000_a.sql", names shown lossily
pub fn rename_line(op: &RenameOp) -> String {
    format!(
        "Renaming {} -> {}",
        op.from.to_string_lossy(),
        op.to.to_string_lossy().bold()
    )
}

/// Version/file-count table for a list of groups
pub fn group_table(header: &str, groups: &[GroupSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![header, "Files"]);
    for group in groups {
        table.add_row(vec![group.version.clone(), group.files.to_string()]);
    }
    table
}

/// "1 file" / "3 files"
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
