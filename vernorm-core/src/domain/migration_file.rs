//! Migration file domain model
//!
//! Names stay `OsString` end to end so a migration whose name is not valid
//! UTF-8 is still parsed and renamed byte-for-byte.

use std::ffi::{OsStr, OsString};
use std::sync::OnceLock;

use regex::bytes::Regex;
use serde::{Serialize, Serializer};

/// Leading ASCII digit run, then any bytes
fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s-u)^([0-9]+)(.*)$").expect("valid version regex"))
}

/// Raw bytes of a file name
#[cfg(unix)]
pub(crate) fn name_bytes(name: &OsStr) -> Option<&[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Some(name.as_bytes())
}

/// Raw bytes of a file name; names that are not valid Unicode are unreadable
#[cfg(not(unix))]
pub(crate) fn name_bytes(name: &OsStr) -> Option<&[u8]> {
    name.to_str().map(str::as_bytes)
}

#[cfg(unix)]
fn name_from_bytes(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(bytes).to_os_string()
}

// Only reached with bytes taken from a valid `str` split on an ASCII boundary
#[cfg(not(unix))]
fn name_from_bytes(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Serialize a file name for reports, replacing invalid UTF-8
pub(crate) fn lossy_name<S: Serializer>(name: &OsString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&name.to_string_lossy())
}

/// A migration file split into its version prefix and the rest of its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationFile {
    /// Filename as found on disk (e.g., "20240114_add_users.sql")
    #[serde(serialize_with = "lossy_name")]
    pub original_name: OsString,
    /// Leading digit run (e.g., "20240114")
    pub version_prefix: String,
    /// Everything after the prefix, separator and extension included
    #[serde(serialize_with = "lossy_name")]
    pub suffix: OsString,
}

impl MigrationFile {
    /// Parse a filename. Returns None when the name has no leading digits.
    pub fn parse(name: impl AsRef<OsStr>) -> Option<Self> {
        let name = name.as_ref();
        let caps = version_pattern().captures(name_bytes(name)?)?;

        // The prefix is ASCII digits only
        let version_prefix = String::from_utf8_lossy(&caps[1]).into_owned();

        Some(Self {
            original_name: name.to_os_string(),
            version_prefix,
            suffix: name_from_bytes(&caps[2]),
        })
    }

    /// Filename with the version prefix replaced
    pub fn renamed(&self, new_prefix: &str) -> OsString {
        let mut name = OsString::from(new_prefix);
        name.push(&self.suffix);
        name
    }
}

/// Length of a date-only version prefix
pub const DATE_ONLY_LEN: usize = 8;

pub fn is_date_only(version: &str) -> bool {
    version.len() == DATE_ONLY_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let file = MigrationFile::parse("20240114_add_users.sql").unwrap();
        assert_eq!(file.version_prefix, "20240114");
        assert_eq!(file.suffix, "_add_users.sql");
        assert!(is_date_only(&file.version_prefix));
    }

    #[test]
    fn test_parse_full_timestamp() {
        let file = MigrationFile::parse("20240114000000_init.sql").unwrap();
        assert_eq!(file.version_prefix, "20240114000000");
        assert_eq!(file.suffix, "_init.sql");
        assert!(!is_date_only(&file.version_prefix));
    }

    #[test]
    fn test_parse_takes_maximal_digit_run() {
        let file = MigrationFile::parse("2024011412_x1.sql").unwrap();
        assert_eq!(file.version_prefix, "2024011412");
        assert_eq!(file.suffix, "_x1.sql");
    }

    #[test]
    fn test_parse_no_leading_digits() {
        assert!(MigrationFile::parse("README.sql").is_none());
        assert!(MigrationFile::parse("_20240114.sql").is_none());
    }

    #[test]
    fn test_parse_ignores_non_ascii_digits() {
        // Arabic-Indic digits are not version digits
        assert!(MigrationFile::parse("٢٠٢٤_a.sql").is_none());
    }

    #[test]
    fn test_name_is_prefix_plus_suffix() {
        for name in ["20240101_only.sql", "1.sql", "20240101", "20240101_a\nb.sql"] {
            let file = MigrationFile::parse(name).unwrap();
            let mut joined = OsString::from(&file.version_prefix);
            joined.push(&file.suffix);
            assert_eq!(joined, name);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_non_utf8_name() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"20240114_caf\xE9.sql");
        let file = MigrationFile::parse(name).unwrap();

        assert_eq!(file.version_prefix, "20240114");
        assert_eq!(file.suffix.as_bytes(), b"_caf\xE9.sql");
        assert_eq!(
            file.renamed("20240114100000").as_bytes(),
            b"20240114100000_caf\xE9.sql"
        );
    }

    #[test]
    fn test_renamed() {
        let file = MigrationFile::parse("20240101_only.sql").unwrap();
        assert_eq!(file.renamed("20240101100000"), "20240101100000_only.sql");
    }

    #[test]
    fn test_serializes_names_as_strings() {
        let file = MigrationFile::parse("20240101_only.sql").unwrap();
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["original_name"], "20240101_only.sql");
        assert_eq!(json["suffix"], "_only.sql");
    }
}
