use crate::ui::{log_hint, log_success_list, log_success_value, log_warning};
use logbook_core::config::{CONFIG_DIR, CONFIG_FILE};
use logbook_core::errors::Result;
use logbook_core::{Config, Templates, TypeTable};
use std::path::Path;

pub fn run(root: &Path) -> Result<()> {
    let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);
    let config = Config::load(root)?;
    if config_path.exists() {
        log_success_value("Configuration", &config_path.display().to_string());
    } else {
        log_hint("No .logbook/config.toml found, using built-in defaults. Run `logbook init` to create one.");
    }

    Templates::load(&config.templates_dir)?;
    if config.templates_dir.is_dir() {
        log_success_value("Templates", &config.templates_dir.display().to_string());
    } else {
        log_success_value("Templates", "built-in defaults");
    }

    let (visible, hidden) = split_types(&config.types);
    log_success_list("Visible types", &visible);
    log_success_list("Hidden types", &hidden);
    if visible.is_empty() {
        log_warning("Every configured type is hidden; only unknown types will reach the changelog.");
    }

    let tag = config.tag_for("1.0.0");
    log_success_value("Release tag", &tag);
    log_success_value("Release commit", &config.release_commit_message(&tag));
    Ok(())
}

/// `type → section` labels for visible rows, bare type names for hidden ones.
pub fn split_types(table: &TypeTable) -> (Vec<String>, Vec<String>) {
    let mut visible = Vec::new();
    let mut hidden = Vec::new();
    for entry in table.entries() {
        if entry.hidden {
            hidden.push(entry.commit_type.clone());
        } else {
            visible.push(format!("{} → {}", entry.commit_type, entry.section));
        }
    }
    (visible, hidden)
}
