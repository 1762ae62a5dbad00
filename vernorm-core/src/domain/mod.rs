//! Core domain entities
//!
//! Pure data structures and planning logic - no filesystem access.

mod migration_file;
pub mod plan;
pub mod result;
mod version_group;

pub use migration_file::{is_date_only, MigrationFile, DATE_ONLY_LEN};
pub(crate) use migration_file::name_bytes;
pub use plan::{synthetic_time, GroupSummary, RenameOp, RenamePlan, SYNTHETIC_TIME_BASE};
pub use version_group::{VersionGroup, VersionGroups};
