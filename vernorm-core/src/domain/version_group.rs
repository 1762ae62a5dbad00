//! Grouping of migration files by version prefix

use std::collections::BTreeMap;

use serde::Serialize;

use super::migration_file::{is_date_only, MigrationFile};

/// Files sharing one version prefix, in sorted filename order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionGroup {
    pub version: String,
    pub files: Vec<MigrationFile>,
}

impl VersionGroup {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn is_date_only(&self) -> bool {
        is_date_only(&self.version)
    }

    /// More than one file claims this version
    pub fn is_collision(&self) -> bool {
        self.files.len() > 1
    }
}

/// All version groups of a directory snapshot, keyed by prefix
#[derive(Debug, Default)]
pub struct VersionGroups {
    groups: BTreeMap<String, Vec<MigrationFile>>,
}

impl VersionGroups {
    /// Group parsed files. Input order is kept within each group, so callers
    /// pass files already sorted by name.
    pub fn from_files(files: impl IntoIterator<Item = MigrationFile>) -> Self {
        let mut groups: BTreeMap<String, Vec<MigrationFile>> = BTreeMap::new();
        for file in files {
            groups
                .entry(file.version_prefix.clone())
                .or_default()
                .push(file);
        }
        Self { groups }
    }

    #[cfg(test)]
    fn get(&self, version: &str) -> Option<&[MigrationFile]> {
        self.groups.get(version).map(Vec::as_slice)
    }

    /// Groups in ascending version order
    pub fn iter(&self) -> impl Iterator<Item = VersionGroup> + '_ {
        self.groups.iter().map(|(version, files)| VersionGroup {
            version: version.clone(),
            files: files.clone(),
        })
    }

    /// Groups with an 8-digit prefix
    pub fn date_only(&self) -> impl Iterator<Item = VersionGroup> + '_ {
        self.iter().filter(VersionGroup::is_date_only)
    }

    /// Groups of any other length that still share a prefix
    pub fn unhandled_collisions(&self) -> impl Iterator<Item = VersionGroup> + '_ {
        self.iter().filter(|g| !g.is_date_only() && g.is_collision())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(names: &[&str]) -> Vec<MigrationFile> {
        names.iter().filter_map(|n| MigrationFile::parse(n)).collect()
    }

    #[test]
    fn test_groups_preserve_input_order() {
        let groups = VersionGroups::from_files(parse_all(&[
            "20240114_a.sql",
            "20240114_b.sql",
            "20240114000000_init.sql",
        ]));

        assert_eq!(groups.iter().count(), 2);
        let day = groups.get("20240114").unwrap();
        assert_eq!(day[0].original_name, "20240114_a.sql");
        assert_eq!(day[1].original_name, "20240114_b.sql");
        assert_eq!(groups.get("20240114000000").unwrap().len(), 1);
    }

    #[test]
    fn test_date_only_includes_singletons() {
        let groups = VersionGroups::from_files(parse_all(&[
            "20240101_only.sql",
            "20240102000000_x.sql",
        ]));
        let date_only: Vec<_> = groups.date_only().collect();
        assert_eq!(date_only.len(), 1);
        assert_eq!(date_only[0].version, "20240101");
        assert!(!date_only[0].is_collision());
    }

    #[test]
    fn test_unhandled_collisions() {
        let groups = VersionGroups::from_files(parse_all(&[
            "20240101000000_a.sql",
            "20240101000000_b.sql",
            "20240102_c.sql",
            "20240102_d.sql",
        ]));
        let unhandled: Vec<_> = groups.unhandled_collisions().collect();
        assert_eq!(unhandled.len(), 1);
        assert_eq!(unhandled[0].version, "20240101000000");
        assert_eq!(unhandled[0].len(), 2);
    }

    #[test]
    fn test_iter_is_sorted_by_version() {
        let groups = VersionGroups::from_files(parse_all(&["3_c.sql", "1_a.sql", "2_b.sql"]));
        let versions: Vec<_> = groups.iter().map(|g| g.version).collect();
        assert_eq!(versions, vec!["1", "2", "3"]);
    }
}
