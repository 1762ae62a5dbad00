//! Rename planning for date-only version groups
//!
//! Each file in an 8-digit group gets a synthetic `HHMMSS` starting at
//! 10:00:00, so expanded versions never land on `YYYYMMDD000000`, which is
//! left free for baseline migrations.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::PathBuf;

use serde::Serialize;

use super::migration_file::lossy_name;
use super::result::{Error, Result};
use super::version_group::{VersionGroup, VersionGroups};

/// First synthetic time handed out within a group (10:00:00)
pub const SYNTHETIC_TIME_BASE: u32 = 100_000;

/// Largest group a 6-digit synthetic time can address
pub const MAX_GROUP_SIZE: usize = (1_000_000 - SYNTHETIC_TIME_BASE) as usize;

/// Synthetic `HHMMSS` for the file at `index` within its group
pub fn synthetic_time(index: usize) -> String {
    format!("{:06}", SYNTHETIC_TIME_BASE as usize + index)
}

/// One planned rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameOp {
    #[serde(serialize_with = "lossy_name")]
    pub from: OsString,
    #[serde(serialize_with = "lossy_name")]
    pub to: OsString,
    /// Version group the file came from
    pub version: String,
    /// Zero-based rank within the group
    pub index: usize,
}

/// A processed version group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub version: String,
    pub files: usize,
}

/// All renames for one run, in application order
#[derive(Debug, Clone, Serialize)]
pub struct RenamePlan {
    pub directory: PathBuf,
    pub groups: Vec<GroupSummary>,
    pub ops: Vec<RenameOp>,
}

impl RenamePlan {
    /// Build the plan for every date-only group
    pub fn build(directory: PathBuf, groups: &VersionGroups) -> Result<Self> {
        let mut summaries = Vec::new();
        let mut ops = Vec::new();

        for group in groups.date_only() {
            summaries.push(GroupSummary {
                version: group.version.clone(),
                files: group.len(),
            });
            ops.extend(expand_group(&group)?);
        }

        Ok(Self {
            directory,
            groups: summaries,
            ops,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Fail on the first op whose destination is taken, either by an existing
    /// entry or by an earlier op in the plan
    pub fn validate(&self, existing: &HashSet<OsString>) -> Result<()> {
        let mut claimed: HashSet<&OsString> = HashSet::with_capacity(self.ops.len());
        for op in &self.ops {
            if existing.contains(&op.to) || !claimed.insert(&op.to) {
                return Err(op.conflict());
            }
        }
        Ok(())
    }
}

impl RenameOp {
    /// Conflict error for this op's destination
    pub fn conflict(&self) -> Error {
        Error::RenameConflict {
            from: self.from.to_string_lossy().into_owned(),
            to: self.to.to_string_lossy().into_owned(),
        }
    }
}

fn expand_group(group: &VersionGroup) -> Result<Vec<RenameOp>> {
    if group.len() > MAX_GROUP_SIZE {
        return Err(Error::GroupOverflow {
            version: group.version.clone(),
            size: group.len(),
        });
    }

    Ok(group
        .files
        .iter()
        .enumerate()
        .map(|(index, file)| {
            let new_version = format!("{}{}", group.version, synthetic_time(index));
            RenameOp {
                from: file.original_name.clone(),
                to: file.renamed(&new_version),
                version: group.version.clone(),
                index,
            }
        })
        .collect())
}
