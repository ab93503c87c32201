use logbook_core::config::{CONFIG_DIR, CONFIG_FILE, DEFAULT_TEMPLATES_DIR};
use logbook_core::errors::Result;
use logbook_core::Templates;
use std::fs;
use std::path::{Path, PathBuf};

pub struct InitReport {
    pub root: PathBuf,
    pub created_dir: bool,
    pub created_config: bool,
    pub created_templates: Vec<PathBuf>,
}

/// Create `.logbook/` with a commented config and the default template
/// partials. Existing files are never overwritten.
pub fn init_at_root(root: &Path) -> Result<InitReport> {
    let dir = root.join(CONFIG_DIR);

    let mut created_dir = false;
    let mut created_config = false;
    let mut created_templates = Vec::new();

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
        created_dir = true;
    }

    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        fs::write(&config_path, DEFAULT_CONFIG)?;
        created_config = true;
    }

    let templates_dir = dir.join(DEFAULT_TEMPLATES_DIR);
    fs::create_dir_all(&templates_dir)?;
    let defaults = Templates::default();
    for (file, content) in defaults.files() {
        let path = templates_dir.join(file);
        if !path.exists() {
            fs::write(&path, content)?;
            created_templates.push(path);
        }
    }

    Ok(InitReport {
        root: root.to_path_buf(),
        created_dir,
        created_config,
        created_templates,
    })
}

const DEFAULT_CONFIG: &str = r#"# Logbook configuration
version = 1

[github]
# By default, Logbook tries to infer the repository from the git remote.
# You can override or clarify it here if needed.
# repository = "owner/repo"

[release]
# tag_prefix = "v" (default)
# commit_message_format = "chore(release): {{currentTag}}" (default)
# bump_files = ["Cargo.toml"] (default)
# package_files = ["Cargo.toml"] (default)

[urls]
# commit = "{{host}}/{{owner}}/{{repository}}/commit/{{hash}}"
# compare = "{{host}}/{{owner}}/{{repository}}/compare/{{previousTag}}...{{currentTag}}"
# issue = "{{host}}/{{owner}}/{{repository}}/issues/{{id}}"
# user = "{{host}}/{{user}}"

[changelog]
# templates_dir = "templates" (default, relative to .logbook/)
# group_by = "type" (default) or "scope"
# commit_sort = ["scope", "subject"] (default)
# note_group_sort = "title" (default) or "none"
# notes_sort = true (default)
#
# Declaring [[changelog.types]] replaces the built-in table entirely:
#
# [[changelog.types]]
# type = "feat"
# section = "Added"
#
# [[changelog.types]]
# type = "chore"
# section = "Chores"
# hidden = true
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use logbook_core::Config;

    #[test]
    fn init_creates_dir_and_files_idempotently() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();

        let r1 = init_at_root(root).unwrap();
        assert!(r1.created_dir);
        assert!(r1.created_config);
        assert_eq!(r1.created_templates.len(), 4);

        // Running again should not recreate existing files
        let r2 = init_at_root(root).unwrap();
        assert!(!r2.created_dir);
        assert!(!r2.created_config);
        assert!(r2.created_templates.is_empty());

        assert!(root.join(".logbook/config.toml").exists());
        assert!(root.join(".logbook/templates/commit.md").exists());
    }

    #[test]
    fn default_config_loads_as_defaults() {
        let temp = tempfile::tempdir().unwrap();
        init_at_root(temp.path()).unwrap();
        let loaded = Config::load(temp.path()).unwrap();
        let defaults = Config::load(tempfile::tempdir().unwrap().path()).unwrap();
        assert_eq!(loaded.types, defaults.types);
        assert_eq!(loaded.urls, defaults.urls);
        assert_eq!(loaded.tag_prefix, defaults.tag_prefix);
    }

    #[test]
    fn init_keeps_customized_partials() {
        let temp = tempfile::tempdir().unwrap();
        let templates = temp.path().join(".logbook/templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("header.md"), "# custom\n").unwrap();

        let report = init_at_root(temp.path()).unwrap();
        assert_eq!(report.created_templates.len(), 3);
        assert_eq!(
            fs::read_to_string(templates.join("header.md")).unwrap(),
            "# custom\n"
        );
    }
}
