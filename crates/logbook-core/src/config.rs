use crate::errors::{LogbookError, Result, io_error_with_path};
use crate::sections::{TypeEntry, TypeTable};
use crate::templates::expand;
use crate::writer::{GroupBy, NoteGroupSort};
use std::path::{Path, PathBuf};

/// Directory holding Logbook's configuration, relative to the project root.
pub const CONFIG_DIR: &str = ".logbook";
pub const CONFIG_FILE: &str = "config.toml";
/// The only `version` value this release understands.
pub const SUPPORTED_CONFIG_VERSION: u64 = 1;

pub const DEFAULT_TAG_PREFIX: &str = "v";
pub const DEFAULT_COMMIT_MESSAGE_FORMAT: &str = "chore(release): {{currentTag}}";
pub const DEFAULT_HEADER: &str =
    "# Changelog\n\nAll notable changes to this project will be documented in this file.\n";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

pub const DEFAULT_COMMIT_URL_FORMAT: &str = "{{host}}/{{owner}}/{{repository}}/commit/{{hash}}";
pub const DEFAULT_COMPARE_URL_FORMAT: &str =
    "{{host}}/{{owner}}/{{repository}}/compare/{{previousTag}}...{{currentTag}}";
pub const DEFAULT_ISSUE_URL_FORMAT: &str = "{{host}}/{{owner}}/{{repository}}/issues/{{id}}";
pub const DEFAULT_USER_URL_FORMAT: &str = "{{host}}/{{user}}";

/// URL format strings, expanded with `{{placeholder}}` substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlFormats {
    pub commit: String,
    pub compare: String,
    pub issue: String,
    pub user: String,
}

impl Default for UrlFormats {
    fn default() -> Self {
        Self {
            commit: DEFAULT_COMMIT_URL_FORMAT.to_string(),
            compare: DEFAULT_COMPARE_URL_FORMAT.to_string(),
            issue: DEFAULT_ISSUE_URL_FORMAT.to_string(),
            user: DEFAULT_USER_URL_FORMAT.to_string(),
        }
    }
}

/// Configuration for Logbook
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub version: u64,
    pub github_repository: Option<String>,
    pub tag_prefix: String,
    pub commit_message_format: String,
    /// Files whose version is bumped on release; consumed by external tooling.
    pub bump_files: Vec<String>,
    /// Files the current version is read from; consumed by external tooling.
    pub package_files: Vec<String>,
    pub urls: UrlFormats,
    pub header: String,
    pub templates_dir: PathBuf,
    pub group_by: GroupBy,
    pub commit_sort: Vec<String>,
    pub note_group_sort: NoteGroupSort,
    pub notes_sort: bool,
    pub types: TypeTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            github_repository: None,
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            commit_message_format: DEFAULT_COMMIT_MESSAGE_FORMAT.to_string(),
            bump_files: vec!["Cargo.toml".to_string()],
            package_files: vec!["Cargo.toml".to_string()],
            urls: UrlFormats::default(),
            header: DEFAULT_HEADER.to_string(),
            templates_dir: PathBuf::from(CONFIG_DIR).join(DEFAULT_TEMPLATES_DIR),
            group_by: GroupBy::Type,
            commit_sort: vec!["scope".to_string(), "subject".to_string()],
            note_group_sort: NoteGroupSort::Title,
            notes_sort: true,
            types: TypeTable::default(),
        }
    }
}

impl Config {
    /// Load configuration from .logbook/config.toml
    pub fn load(root: &Path) -> Result<Self> {
        let base = root.join(CONFIG_DIR);
        let path = base.join(CONFIG_FILE);
        let defaults = Self {
            templates_dir: base.join(DEFAULT_TEMPLATES_DIR),
            ..Self::default()
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(defaults);
        }

        let text = std::fs::read_to_string(&path).map_err(|e| io_error_with_path(e, &path))?;
        let config = Self::parse(&text, &base)?;
        tracing::debug!(
            path = %path.display(),
            types = config.types.entries().len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Parse configuration text; relative paths resolve against `base`.
    pub fn parse(text: &str, base: &Path) -> Result<Self> {
        let value: toml::Value = text
            .parse()
            .map_err(|e| LogbookError::Config(format!("invalid config.toml: {e}")))?;
        let defaults = Self::default();

        let version = match value.get("version") {
            None => SUPPORTED_CONFIG_VERSION,
            Some(raw) => raw
                .as_integer()
                .and_then(|v| u64::try_from(v).ok())
                .filter(|v| *v == SUPPORTED_CONFIG_VERSION)
                .ok_or_else(|| {
                    LogbookError::Config(format!(
                        "unsupported config version {raw}, expected {SUPPORTED_CONFIG_VERSION}"
                    ))
                })?,
        };

        let github_repository = string_at(&value, "github", "repository")?;

        let tag_prefix =
            string_at(&value, "release", "tag_prefix")?.unwrap_or(defaults.tag_prefix);
        let commit_message_format = string_at(&value, "release", "commit_message_format")?
            .unwrap_or(defaults.commit_message_format);
        let bump_files =
            string_list_at(&value, "release", "bump_files")?.unwrap_or(defaults.bump_files);
        let package_files =
            string_list_at(&value, "release", "package_files")?.unwrap_or(defaults.package_files);

        let urls = UrlFormats {
            commit: string_at(&value, "urls", "commit")?.unwrap_or(defaults.urls.commit),
            compare: string_at(&value, "urls", "compare")?.unwrap_or(defaults.urls.compare),
            issue: string_at(&value, "urls", "issue")?.unwrap_or(defaults.urls.issue),
            user: string_at(&value, "urls", "user")?.unwrap_or(defaults.urls.user),
        };

        let header = string_at(&value, "changelog", "header")?.unwrap_or(defaults.header);
        let templates_dir = base.join(
            string_at(&value, "changelog", "templates_dir")?
                .unwrap_or_else(|| DEFAULT_TEMPLATES_DIR.to_string()),
        );

        let group_by = match string_at(&value, "changelog", "group_by")? {
            Some(raw) => GroupBy::parse(&raw).ok_or_else(|| {
                LogbookError::Config(format!(
                    "changelog.group_by must be \"type\" or \"scope\", found \"{raw}\""
                ))
            })?,
            None => defaults.group_by,
        };

        let commit_sort =
            string_list_at(&value, "changelog", "commit_sort")?.unwrap_or(defaults.commit_sort);
        if let Some(empty) = commit_sort.iter().find(|key| key.trim().is_empty()) {
            return Err(LogbookError::Config(format!(
                "changelog.commit_sort contains an empty key: {empty:?}"
            )));
        }

        let note_group_sort = match string_at(&value, "changelog", "note_group_sort")? {
            Some(raw) => NoteGroupSort::parse(&raw).ok_or_else(|| {
                LogbookError::Config(format!(
                    "changelog.note_group_sort must be \"title\" or \"none\", found \"{raw}\""
                ))
            })?,
            None => defaults.note_group_sort,
        };

        let notes_sort = match section(&value, "changelog").and_then(|t| t.get("notes_sort")) {
            Some(v) => v.as_bool().ok_or_else(|| {
                LogbookError::Config("changelog.notes_sort must be a boolean".to_string())
            })?,
            None => defaults.notes_sort,
        };

        let types = match section(&value, "changelog").and_then(|t| t.get("types")) {
            Some(raw) => {
                let entries: Vec<TypeEntry> = raw.clone().try_into().map_err(|e| {
                    LogbookError::Config(format!(
                        "changelog.types must be an array of {{ type, section, hidden }} tables: {e}"
                    ))
                })?;
                TypeTable::new(entries)?
            }
            None => defaults.types,
        };

        Ok(Self {
            version,
            github_repository,
            tag_prefix,
            commit_message_format,
            bump_files,
            package_files,
            urls,
            header,
            templates_dir,
            group_by,
            commit_sort,
            note_group_sort,
            notes_sort,
            types,
        })
    }

    /// Tag name for a released version, e.g. `v1.2.0`.
    pub fn tag_for(&self, version: &str) -> String {
        format!("{}{}", self.tag_prefix, version)
    }

    /// Release commit message for a tag, e.g. `chore(release): v1.2.0`.
    pub fn release_commit_message(&self, tag: &str) -> String {
        expand(&self.commit_message_format, |key| {
            (key == "currentTag").then(|| tag.to_string())
        })
    }
}

fn section<'a>(value: &'a toml::Value, name: &str) -> Option<&'a toml::value::Table> {
    value.get(name).and_then(|v| v.as_table())
}

fn string_at(value: &toml::Value, table: &str, key: &str) -> Result<Option<String>> {
    match section(value, table).and_then(|t| t.get(key)) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| LogbookError::Config(format!("{table}.{key} must be a string"))),
    }
}

fn string_list_at(value: &toml::Value, table: &str, key: &str) -> Result<Option<Vec<String>>> {
    let Some(v) = section(value, table).and_then(|t| t.get(key)) else {
        return Ok(None);
    };
    let not_a_list = || LogbookError::Config(format!("{table}.{key} must be an array of strings"));
    let items = v.as_array().ok_or_else(not_a_list)?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(not_a_list))
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(root: &Path, text: &str) {
        fs::create_dir_all(root.join(CONFIG_DIR)).unwrap();
        fs::write(root.join(CONFIG_DIR).join(CONFIG_FILE), text).unwrap();
    }

    #[test]
    fn defaults_when_missing() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.version, 1);
        assert!(config.github_repository.is_none());
        assert_eq!(config.tag_prefix, "v");
        assert_eq!(config.types, TypeTable::default());
        assert_eq!(config.group_by, GroupBy::Type);
        assert_eq!(config.note_group_sort, NoteGroupSort::Title);
        assert!(config.notes_sort);
        assert_eq!(
            config.templates_dir,
            temp.path().join(".logbook").join("templates")
        );
    }

    #[test]
    fn rejects_unsupported_versions() {
        for text in ["version = 2\n", "version = -1\n", "version = \"1\"\n"] {
            let temp = tempfile::tempdir().unwrap();
            write_config(temp.path(), text);
            let error_msg = Config::load(temp.path()).unwrap_err().to_string();
            assert!(
                error_msg.contains("unsupported config version"),
                "{text}: {error_msg}"
            );
        }

        let temp = tempfile::tempdir().unwrap();
        write_config(temp.path(), "version = 1\n");
        assert_eq!(Config::load(temp.path()).unwrap().version, 1);
    }

    #[test]
    fn reads_release_and_url_options() {
        let temp = tempfile::tempdir().unwrap();
        write_config(
            temp.path(),
            r#"
[github]
repository = "owner/repo"

[release]
tag_prefix = "release-"
commit_message_format = "release: {{currentTag}} [skip ci]"
bump_files = ["Cargo.toml", "crates/cli/Cargo.toml"]

[urls]
commit = "{{host}}/{{owner}}/{{repository}}/-/commit/{{hash}}"
"#,
        );

        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.github_repository.as_deref(), Some("owner/repo"));
        assert_eq!(config.tag_prefix, "release-");
        assert_eq!(
            config.bump_files,
            vec!["Cargo.toml".to_string(), "crates/cli/Cargo.toml".to_string()]
        );
        assert_eq!(config.package_files, vec!["Cargo.toml".to_string()]);
        assert_eq!(
            config.urls.commit,
            "{{host}}/{{owner}}/{{repository}}/-/commit/{{hash}}"
        );
        assert_eq!(config.urls.compare, DEFAULT_COMPARE_URL_FORMAT);
        assert_eq!(config.tag_for("1.2.0"), "release-1.2.0");
        assert_eq!(
            config.release_commit_message("release-1.2.0"),
            "release: release-1.2.0 [skip ci]"
        );
    }

    #[test]
    fn default_release_commit_message() {
        let config = Config::default();
        let tag = config.tag_for("2.0.0");
        assert_eq!(tag, "v2.0.0");
        assert_eq!(config.release_commit_message(&tag), "chore(release): v2.0.0");
    }

    #[test]
    fn reads_changelog_writer_options() {
        let temp = tempfile::tempdir().unwrap();
        write_config(
            temp.path(),
            r##"
[changelog]
header = "# History\n"
templates_dir = "partials"
group_by = "scope"
commit_sort = ["subject"]
note_group_sort = "none"
notes_sort = false
"##,
        );

        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.header, "# History\n");
        assert_eq!(
            config.templates_dir,
            temp.path().join(".logbook").join("partials")
        );
        assert_eq!(config.group_by, GroupBy::Scope);
        assert_eq!(config.commit_sort, vec!["subject".to_string()]);
        assert_eq!(config.note_group_sort, NoteGroupSort::None);
        assert!(!config.notes_sort);
    }

    #[test]
    fn types_table_replaces_defaults() {
        let temp = tempfile::tempdir().unwrap();
        write_config(
            temp.path(),
            r#"
[[changelog.types]]
type = "feat"
section = "Features"

[[changelog.types]]
type = "chore"
section = "Chores"
hidden = true
"#,
        );

        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.types.entries().len(), 2);
        assert_eq!(config.types.section_for("feat"), Some("Features"));
        assert!(!config.types.is_hidden("feat"));
        assert!(config.types.is_hidden("chore"));
        assert!(config.types.section_for("fix").is_none());
    }

    #[test]
    fn rejects_duplicate_types() {
        let temp = tempfile::tempdir().unwrap();
        write_config(
            temp.path(),
            r#"
[[changelog.types]]
type = "chore"
section = "Chores"
hidden = true

[[changelog.types]]
type = "chore"
section = "Maintenance"
"#,
        );

        let error_msg = Config::load(temp.path()).unwrap_err().to_string();
        assert!(error_msg.contains("'chore' appears more than once"));
    }

    #[test]
    fn rejects_malformed_type_rows() {
        let temp = tempfile::tempdir().unwrap();
        write_config(
            temp.path(),
            "[[changelog.types]]\ntype = \"feat\"\nhidden = false\n",
        );

        let error_msg = Config::load(temp.path()).unwrap_err().to_string();
        assert!(error_msg.contains("changelog.types must be an array"));
    }

    #[test]
    fn rejects_wrong_value_types() {
        let temp = tempfile::tempdir().unwrap();
        write_config(temp.path(), "[release]\ntag_prefix = 3\n");
        let error_msg = Config::load(temp.path()).unwrap_err().to_string();
        assert!(error_msg.contains("release.tag_prefix must be a string"));

        write_config(temp.path(), "[release]\nbump_files = \"Cargo.toml\"\n");
        let error_msg = Config::load(temp.path()).unwrap_err().to_string();
        assert!(error_msg.contains("release.bump_files must be an array of strings"));

        write_config(temp.path(), "[changelog]\nnotes_sort = \"yes\"\n");
        let error_msg = Config::load(temp.path()).unwrap_err().to_string();
        assert!(error_msg.contains("notes_sort must be a boolean"));
    }

    #[test]
    fn rejects_unknown_group_by() {
        let temp = tempfile::tempdir().unwrap();
        write_config(temp.path(), "[changelog]\ngroup_by = \"author\"\n");
        let error_msg = Config::load(temp.path()).unwrap_err().to_string();
        assert!(error_msg.contains("group_by must be"));
    }

    #[test]
    fn rejects_invalid_toml() {
        let temp = tempfile::tempdir().unwrap();
        write_config(temp.path(), "[changelog\n");
        let error_msg = Config::load(temp.path()).unwrap_err().to_string();
        assert!(error_msg.contains("invalid config.toml"));
    }
}
