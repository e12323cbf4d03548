use crate::domain::ConfigLookup;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_SECTION: &str = "Default";
pub const DEFAULT_CONFIG_FILE_NAME: &str = "brixdev.toml";
const CONFIG_EXTENSION: &str = "toml";

pub const CONFIG_DATABASE_USER_KEY: &str = "databaseuser";
pub const CONFIG_DATABASE_DB_KEY: &str = "databasedb";
pub const DEFAULT_DATABASE_USER: &str = "brixadmin";
pub const DEFAULT_DATABASE_DB: &str = "brixdb";

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/home/dev"))
        .join(".config/brixdev")
}

/// Sectioned key/value overrides loaded from `brixdev.toml`.
///
/// Only the `[Default]` section is consulted; other tables are kept so a
/// shared file can carry settings for other tools.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(transparent)]
pub struct ServiceConfig {
    sections: BTreeMap<String, toml::Table>,
}

impl ServiceConfig {
    /// Builds a config whose `[Default]` section holds the given pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let section: toml::Table = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), toml::Value::String(v.to_string())))
            .collect();

        let mut sections = BTreeMap::new();
        sections.insert(DEFAULT_SECTION.to_string(), section);
        Self { sections }
    }

    pub fn database_user(&self) -> &str {
        self.default_value(CONFIG_DATABASE_USER_KEY)
            .unwrap_or(DEFAULT_DATABASE_USER)
    }

    pub fn database_db(&self) -> &str {
        self.default_value(CONFIG_DATABASE_DB_KEY)
            .unwrap_or(DEFAULT_DATABASE_DB)
    }
}

impl ConfigLookup for ServiceConfig {
    /// Missing section, missing key and non-string values all read as absent
    fn default_value(&self, key: &str) -> Option<&str> {
        self.sections
            .get(DEFAULT_SECTION)
            .and_then(|section| section.get(key))
            .and_then(toml::Value::as_str)
    }
}

/// Picks the config file: an explicit `--config-file` (gaining a `.toml`
/// extension unless it already ends in one) or `brixdev.toml` inside
/// `config_dir`.
pub fn config_file_path(config_dir: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => {
            let expanded = shellexpand::tilde(path.to_string_lossy().as_ref()).into_owned();
            if Path::new(&expanded).extension() == Some(OsStr::new(CONFIG_EXTENSION)) {
                PathBuf::from(expanded)
            } else {
                PathBuf::from(format!("{expanded}.{CONFIG_EXTENSION}"))
            }
        }
        None => config_dir.join(DEFAULT_CONFIG_FILE_NAME),
    }
}

/// Loads the configuration. A file that is missing, unreadable or malformed
/// is fatal, whether it was named explicitly or not.
pub fn load_config(path: &Path) -> Result<ServiceConfig> {
    debug!("config_file_name={:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("{:?} is not a readable config file", path))?;

    parse_config(&content, path)
}

fn parse_config(content: &str, path: &Path) -> Result<ServiceConfig> {
    if content.trim().is_empty() {
        return Ok(ServiceConfig::default());
    }

    toml::from_str(content).with_context(|| format!("{:?} is not a proper config file", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_section() {
        let content = r#"
[Default]
databasename = "pg_dev"
activemqname = "amq_dev"
"#;
        let config = parse_config(content, Path::new("brixdev.toml")).unwrap();
        assert_eq!(config.default_value("databasename"), Some("pg_dev"));
        assert_eq!(config.default_value("activemqname"), Some("amq_dev"));
        assert_eq!(config.default_value("brixapp"), None);
    }

    #[test]
    fn missing_default_section_reads_as_absent() {
        let content = r#"
[Other]
databasename = "ignored"
"#;
        let config = parse_config(content, Path::new("brixdev.toml")).unwrap();
        assert_eq!(config.default_value("databasename"), None);
    }

    #[test]
    fn non_string_values_are_ignored() {
        let content = r#"
[Default]
databasename = 42
"#;
        let config = parse_config(content, Path::new("brixdev.toml")).unwrap();
        assert_eq!(config.default_value("databasename"), None);
    }

    #[test]
    fn rejects_malformed_file() {
        let err = parse_config("[Default\nfoo", Path::new("broken.toml")).unwrap_err();
        assert!(err.to_string().contains("is not a proper config file"));
    }

    #[test]
    fn empty_file_is_allowed() {
        let config = parse_config("   \n", Path::new("brixdev.toml")).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn database_settings_have_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.database_user(), DEFAULT_DATABASE_USER);
        assert_eq!(config.database_db(), DEFAULT_DATABASE_DB);

        let config = ServiceConfig::from_pairs([("databaseuser", "me"), ("databasedb", "mydb")]);
        assert_eq!(config.database_user(), "me");
        assert_eq!(config.database_db(), "mydb");
    }

    #[test]
    fn explicit_path_gets_extension() {
        let dir = Path::new("/etc/brixdev");
        assert_eq!(
            config_file_path(dir, Some(Path::new("/tmp/dev"))),
            PathBuf::from("/tmp/dev.toml")
        );
        assert_eq!(
            config_file_path(dir, Some(Path::new("/tmp/dev.toml"))),
            PathBuf::from("/tmp/dev.toml")
        );
        assert_eq!(
            config_file_path(dir, None),
            PathBuf::from("/etc/brixdev/brixdev.toml")
        );
    }

    #[test]
    fn explicit_path_with_other_extension_gets_toml() {
        let dir = Path::new("/etc/brixdev");
        assert_eq!(
            config_file_path(dir, Some(Path::new("/tmp/team.dev"))),
            PathBuf::from("/tmp/team.dev.toml")
        );
        assert_eq!(
            config_file_path(dir, Some(Path::new("/tmp/team.cfg"))),
            PathBuf::from("/tmp/team.cfg.toml")
        );
    }

    #[test]
    fn missing_default_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path(), None);

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("is not a readable config file"));
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE_NAME));
    }

    #[test]
    fn missing_explicit_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("absent");
        let path = config_file_path(dir.path(), Some(explicit.as_path()));
        assert!(load_config(&path).is_err());
    }
}
