//! vernorm core - migration filename version normalization
//!
//! - **domain**: filename parsing, version grouping and rename planning
//! - **services**: directory listing and in-place renames
//! - **config**: settings file and environment overrides

pub mod config;
pub mod domain;
pub mod services;

use std::path::{Path, PathBuf};

use config::Config;
use services::NormalizeService;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{MigrationFile, RenameOp, RenamePlan, VersionGroup, VersionGroups};
pub use services::{CheckReport, NormalizeEvent, NormalizeReport};

/// Main context for vernorm operations
pub struct VernormContext {
    pub config: Config,
    pub normalize_service: NormalizeService,
}

impl VernormContext {
    /// Create a context for `work_dir`, optionally forcing the migrations
    /// directory
    pub fn new(work_dir: &Path, migrations_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::load(work_dir)?;
        if let Some(dir) = migrations_dir {
            config = config.with_migrations_dir(dir);
        }

        let normalize_service = NormalizeService::new(&config);

        Ok(Self {
            config,
            normalize_service,
        })
    }
}
