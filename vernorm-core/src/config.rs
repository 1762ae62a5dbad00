//! Configuration management
//!
//! Settings are read from an optional `vernorm.json` in the working directory:
//! ```json
//! { "migrationsDir": "supabase/migrations", "extension": ".sql" }
//! ```
//! `VERNORM_MIGRATIONS_DIR` overrides the directory from the file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;

/// Settings file name, looked up in the working directory
pub const SETTINGS_FILE: &str = "vernorm.json";

/// Environment override for the migrations directory
pub const DIR_ENV_VAR: &str = "VERNORM_MIGRATIONS_DIR";

pub const DEFAULT_MIGRATIONS_DIR: &str = "supabase/migrations";
pub const DEFAULT_EXTENSION: &str = ".sql";

/// Raw vernorm.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    migrations_dir: Option<PathBuf>,
    #[serde(default)]
    extension: Option<String>,
}

/// Normalizer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the migration files
    pub migrations_dir: PathBuf,
    /// Filename suffix that marks a migration file
    pub extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: PathBuf::from(DEFAULT_MIGRATIONS_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl Config {
    /// Load config from the given working directory
    ///
    /// A malformed settings file falls back to defaults. A relative
    /// `migrationsDir` is resolved against `work_dir`.
    pub fn load(work_dir: &Path) -> Result<Self> {
        Self::load_with_env(work_dir, std::env::var_os(DIR_ENV_VAR))
    }

    fn load_with_env(work_dir: &Path, env_dir: Option<OsString>) -> Result<Self> {
        let settings_path = work_dir.join(SETTINGS_FILE);

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %settings_path.display(), error = %e, "ignoring malformed settings file");
                SettingsFile::default()
            })
        } else {
            SettingsFile::default()
        };

        let migrations_dir = env_dir
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or(raw.migrations_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MIGRATIONS_DIR));

        let extension = raw
            .extension
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        Ok(Self {
            migrations_dir: work_dir.join(migrations_dir),
            extension,
        })
    }

    /// Replace the migrations directory (command-line override)
    pub fn with_migrations_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.migrations_dir = dir.into();
        self
    }
}
