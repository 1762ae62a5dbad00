//! Normalize service - expands date-only migration versions
//!
//! Lists the migrations directory, groups files by their leading digit run
//! and renames every `YYYYMMDD_*` file to `YYYYMMDDHHMMSS_*` with a synthetic
//! time derived from its rank within the day. Files with any other prefix
//! length are never touched.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::domain::{
    name_bytes, GroupSummary, MigrationFile, RenameOp, RenamePlan, VersionGroup, VersionGroups,
};

/// Progress notification emitted while renames are applied
#[derive(Debug, Clone, Copy)]
pub enum NormalizeEvent<'a> {
    /// About to rename the members of a date-only group
    GroupStarted(&'a GroupSummary),
    /// A single file was renamed
    Renamed(&'a RenameOp),
}

/// Outcome of a normalization run
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeReport {
    pub directory: PathBuf,
    pub groups: Vec<GroupSummary>,
    pub renamed: Vec<RenameOp>,
    /// Migration files without a leading version
    pub skipped: usize,
}

/// Read-only view of a migrations directory
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub directory: PathBuf,
    pub files: usize,
    pub skipped: usize,
    /// Date-only groups a run would expand
    pub date_only: Vec<GroupSummary>,
    /// Colliding groups of other lengths, left as they are
    pub collisions: Vec<GroupSummary>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.date_only.is_empty() && self.collisions.is_empty()
    }
}

/// One listing of the migrations directory
#[derive(Debug)]
struct Snapshot {
    /// Every entry name in the directory, migration or not
    entries: HashSet<OsString>,
    /// Parsed migration files in sorted name order
    files: Vec<MigrationFile>,
    skipped: usize,
}

/// Service for normalizing migration filenames
pub struct NormalizeService {
    migrations_dir: PathBuf,
    extension: String,
}

impl NormalizeService {
    pub fn new(config: &Config) -> Self {
        Self {
            migrations_dir: config.migrations_dir.clone(),
            extension: config.extension.clone(),
        }
    }

    pub fn migrations_dir(&self) -> &Path {
        &self.migrations_dir
    }

    /// Migration filenames in the directory, sorted
    pub fn enumerate(&self) -> Result<Vec<OsString>> {
        let entries = self.read_entries()?;
        Ok(self.migration_names(&entries))
    }

    /// Inspect the directory without renaming anything
    pub fn check(&self) -> Result<CheckReport> {
        let snapshot = self.snapshot()?;
        let groups = VersionGroups::from_files(snapshot.files.iter().cloned());

        let summarize = |g: VersionGroup| GroupSummary {
            files: g.len(),
            version: g.version,
        };

        Ok(CheckReport {
            directory: self.migrations_dir.clone(),
            files: snapshot.files.len() + snapshot.skipped,
            skipped: snapshot.skipped,
            date_only: groups.date_only().map(summarize).collect(),
            collisions: groups.unhandled_collisions().map(summarize).collect(),
        })
    }

    /// Normalize the directory
    pub fn run(&self) -> Result<NormalizeReport> {
        self.run_with(|_| {})
    }

    /// Normalize the directory, reporting each step to `on_event`
    ///
    /// The first failed rename aborts the batch. Files renamed before it keep
    /// their new names.
    pub fn run_with<F>(&self, mut on_event: F) -> Result<NormalizeReport>
    where
        F: FnMut(NormalizeEvent<'_>),
    {
        let snapshot = self.snapshot()?;
        let plan = self.plan_for(&snapshot)?;

        let mut renamed = Vec::with_capacity(plan.len());
        for group in &plan.groups {
            tracing::info!(version = %group.version, files = group.files, "processing version group");
            on_event(NormalizeEvent::GroupStarted(group));

            for op in plan.ops.iter().filter(|op| op.version == group.version) {
                self.rename(op)?;
                tracing::info!(
                    from = %op.from.to_string_lossy(),
                    to = %op.to.to_string_lossy(),
                    "renamed migration"
                );
                on_event(NormalizeEvent::Renamed(op));
                renamed.push(op.clone());
            }
        }

        Ok(NormalizeReport {
            directory: plan.directory,
            groups: plan.groups,
            renamed,
            skipped: snapshot.skipped,
        })
    }

    fn plan_for(&self, snapshot: &Snapshot) -> Result<RenamePlan> {
        let groups = VersionGroups::from_files(snapshot.files.iter().cloned());
        let plan = RenamePlan::build(self.migrations_dir.clone(), &groups)?;
        plan.validate(&snapshot.entries)?;
        Ok(plan)
    }

    fn snapshot(&self) -> Result<Snapshot> {
        let entries = self.read_entries()?;

        let mut files = Vec::new();
        let mut skipped = 0;
        for name in self.migration_names(&entries) {
            match MigrationFile::parse(&name) {
                Some(file) => files.push(file),
                None => {
                    tracing::debug!(name = %name.to_string_lossy(), "skipping file without version prefix");
                    skipped += 1;
                }
            }
        }

        Ok(Snapshot {
            entries,
            files,
            skipped,
        })
    }

    fn migration_names(&self, entries: &HashSet<OsString>) -> Vec<OsString> {
        let extension = self.extension.as_bytes();
        let mut names: Vec<OsString> = entries
            .iter()
            .filter(|name| match name_bytes(name) {
                Some(bytes) => bytes.ends_with(extension),
                None => {
                    tracing::warn!(name = ?name, "cannot read entry name on this platform");
                    false
                }
            })
            .cloned()
            .collect();
        names.sort();
        names
    }

    fn read_entries(&self) -> Result<HashSet<OsString>> {
        let access = |source: std::io::Error| Error::DirectoryAccess {
            path: self.migrations_dir.clone(),
            source,
        };

        let mut entries = HashSet::new();
        for entry in fs::read_dir(&self.migrations_dir).map_err(access)? {
            let entry = entry.map_err(access)?;
            entries.insert(entry.file_name());
        }
        Ok(entries)
    }

    fn rename(&self, op: &RenameOp) -> Result<()> {
        let src = self.migrations_dir.join(&op.from);
        let dst = self.migrations_dir.join(&op.to);

        // fs::rename replaces an existing destination on Unix
        if fs::symlink_metadata(&dst).is_ok() {
            return Err(op.conflict());
        }

        fs::rename(&src, &dst).map_err(|source| Error::Rename {
            from: op.from.to_string_lossy().into_owned(),
            to: op.to.to_string_lossy().into_owned(),
            source,
        })
    }
}
