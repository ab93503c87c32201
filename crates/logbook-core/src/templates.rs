//! Changelog template partials and `{{placeholder}}` expansion.
//!
//! Partials live as plain files in a fixed directory under `.logbook/`. Any
//! file that is missing falls back to the built-in default. Only plain
//! `{{name}}` placeholders are supported; block helpers, partial includes and
//! comments are rejected at load time.

use crate::errors::{LogbookError, Result, io_error_with_path};
use std::fs;
use std::path::Path;

pub const MAIN_TEMPLATE_FILE: &str = "template.md";
pub const HEADER_TEMPLATE_FILE: &str = "header.md";
pub const COMMIT_TEMPLATE_FILE: &str = "commit.md";
pub const FOOTER_TEMPLATE_FILE: &str = "footer.md";

pub const DEFAULT_MAIN_TEMPLATE: &str = "{{header}}\n{{sections}}{{footer}}";
pub const DEFAULT_HEADER_TEMPLATE: &str = "## {{versionLink}} ({{date}})\n";
pub const DEFAULT_COMMIT_TEMPLATE: &str = "{{scopePrefix}}{{subject}}{{commitLink}}";
pub const DEFAULT_FOOTER_TEMPLATE: &str = "### {{title}}\n\n{{notes}}\n";

/// The main template plus its header, commit and footer partials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub main: String,
    pub header: String,
    pub commit: String,
    pub footer: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            main: DEFAULT_MAIN_TEMPLATE.to_string(),
            header: DEFAULT_HEADER_TEMPLATE.to_string(),
            commit: DEFAULT_COMMIT_TEMPLATE.to_string(),
            footer: DEFAULT_FOOTER_TEMPLATE.to_string(),
        }
    }
}

impl Templates {
    /// Load partials from `dir`, using defaults for files that do not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            main: read_or_default(dir, MAIN_TEMPLATE_FILE, DEFAULT_MAIN_TEMPLATE)?,
            header: read_or_default(dir, HEADER_TEMPLATE_FILE, DEFAULT_HEADER_TEMPLATE)?,
            commit: read_or_default(dir, COMMIT_TEMPLATE_FILE, DEFAULT_COMMIT_TEMPLATE)?,
            footer: read_or_default(dir, FOOTER_TEMPLATE_FILE, DEFAULT_FOOTER_TEMPLATE)?,
        })
    }

    /// File name / content pairs, as written by `logbook init`.
    pub fn files(&self) -> [(&'static str, &str); 4] {
        [
            (MAIN_TEMPLATE_FILE, self.main.as_str()),
            (HEADER_TEMPLATE_FILE, self.header.as_str()),
            (COMMIT_TEMPLATE_FILE, self.commit.as_str()),
            (FOOTER_TEMPLATE_FILE, self.footer.as_str()),
        ]
    }
}

fn read_or_default(dir: &Path, file: &str, default: &str) -> Result<String> {
    let path = dir.join(file);
    if !path.exists() {
        return Ok(default.to_string());
    }
    tracing::debug!(path = %path.display(), "loading template partial");
    let text = fs::read_to_string(&path).map_err(|e| io_error_with_path(e, &path))?;
    validate(&text).map_err(|reason| {
        LogbookError::Template(format!("{}: {reason}", path.display()))
    })?;
    Ok(text)
}

/// Check that every `{{...}}` in `template` is a plain placeholder.
pub fn validate(template: &str) -> std::result::Result<(), String> {
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            return Ok(());
        };
        let name = after[..end].trim();
        let unsupported = name.starts_with(['#', '/', '>', '!', '^', '~'])
            || name == "else"
            || name.starts_with("else ");
        if unsupported {
            return Err(format!(
                "unsupported template syntax '{{{{{name}}}}}', only {{{{name}}}} placeholders are allowed"
            ));
        }
        rest = &after[end + 2..];
    }
    Ok(())
}

/// Substitute every `{{name}}` in `template` with `lookup(name)`.
///
/// Names are trimmed, so `{{ name }}` works too. Unknown names expand to an
/// empty string. An unterminated `{{` is copied verbatim.
pub fn expand<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        if let Some(value) = lookup(after[..end].trim()) {
            out.push_str(&value);
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}
