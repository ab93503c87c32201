//! The canonical commit type table.
//!
//! One ordered list of `{type, section, hidden}` rows is the single source of
//! truth. The type→section mapping and the hidden set used by the classifier
//! are views over it, so the declarative table and the transform always agree.

use crate::errors::{LogbookError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One row of the type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    #[serde(rename = "type")]
    pub commit_type: String,
    pub section: String,
    #[serde(default)]
    pub hidden: bool,
}

impl TypeEntry {
    pub fn new(commit_type: &str, section: &str, hidden: bool) -> Self {
        Self {
            commit_type: commit_type.to_string(),
            section: section.to_string(),
            hidden,
        }
    }
}

/// Built-in rows, in rendering order.
const DEFAULT_TYPES: &[(&str, &str, bool)] = &[
    ("feat", "Added", false),
    ("fix", "Fixed", false),
    ("perf", "Performance", false),
    ("docs", "Documentation", false),
    ("revert", "Reverted", false),
    ("security", "Security", false),
    ("deprecate", "Deprecated", false),
    ("remove", "Removed", false),
    ("refactor", "Changed", true),
    ("style", "Style", true),
    ("test", "Tests", true),
    ("build", "Build", true),
    ("ci", "Continuous Integration", true),
    ("chore", "Chores", true),
];

/// Validated, immutable type table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTable {
    entries: Vec<TypeEntry>,
    index: FxHashMap<String, usize>,
}

#[derive(Serialize)]
struct TypesDocument<'a> {
    types: &'a [TypeEntry],
}

impl TypeTable {
    /// Build a table, rejecting empty names and duplicate types.
    pub fn new(entries: Vec<TypeEntry>) -> Result<Self> {
        let mut index = FxHashMap::default();
        for (position, entry) in entries.iter().enumerate() {
            if entry.commit_type.trim().is_empty() {
                return Err(LogbookError::Config(format!(
                    "type entry #{} has an empty `type`",
                    position + 1
                )));
            }
            if entry.section.trim().is_empty() {
                return Err(LogbookError::Config(format!(
                    "type '{}' has an empty `section`",
                    entry.commit_type
                )));
            }
            if index.insert(entry.commit_type.clone(), position).is_some() {
                return Err(LogbookError::Config(format!(
                    "type '{}' appears more than once in the types table. Each type can only map to one section.",
                    entry.commit_type
                )));
            }
        }
        Ok(Self { entries, index })
    }

    /// The declarative `{type, section, hidden}` rows, in table order.
    pub fn entries(&self) -> &[TypeEntry] {
        &self.entries
    }

    pub fn get(&self, commit_type: &str) -> Option<&TypeEntry> {
        self.index.get(commit_type).map(|&i| &self.entries[i])
    }

    /// Section name a type is relabeled to, if the type is known.
    pub fn section_for(&self, commit_type: &str) -> Option<&str> {
        self.get(commit_type).map(|entry| entry.section.as_str())
    }

    pub fn is_hidden(&self, commit_type: &str) -> bool {
        self.get(commit_type).is_some_and(|entry| entry.hidden)
    }

    /// Types whose commits never reach the changelog.
    pub fn hidden_types(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.hidden)
            .map(|entry| entry.commit_type.as_str())
            .collect()
    }

    /// Type → section pairs, in table order.
    pub fn mapping(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.commit_type.as_str(), entry.section.as_str()))
            .collect()
    }

    /// Distinct sections of visible types, in first-appearance order.
    pub fn visible_sections(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for entry in self.entries.iter().filter(|entry| !entry.hidden) {
            if !out.contains(&entry.section.as_str()) {
                out.push(entry.section.as_str());
            }
        }
        out
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(&TypesDocument {
            types: &self.entries,
        })
        .map_err(|e| LogbookError::Config(format!("cannot serialize types table: {e}")))
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        let entries: Vec<TypeEntry> = DEFAULT_TYPES
            .iter()
            .map(|&(commit_type, section, hidden)| TypeEntry::new(commit_type, section, hidden))
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.commit_type.clone(), i))
            .collect();
        Self { entries, index }
    }
}
