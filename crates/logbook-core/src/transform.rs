//! Commit classification: drop hidden types, relabel the rest to their
//! changelog section and normalize the display fields.

use crate::sections::TypeTable;
use crate::types::{Classified, CommitRecord, RenderContext};

/// Length of a derived short hash.
pub const SHORT_HASH_LEN: usize = 7;

/// Classifies commits against an injected type table.
///
/// Holds no mutable state; one classifier can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    table: &'a TypeTable,
}

impl<'a> Classifier<'a> {
    pub fn new(table: &'a TypeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a TypeTable {
        self.table
    }

    /// Classify one commit.
    ///
    /// Never fails: missing or malformed optional fields are left as they are.
    /// The context is accepted for caller compatibility and not inspected.
    pub fn classify(&self, mut commit: CommitRecord, _context: &RenderContext) -> Classified {
        if self.table.is_hidden(&commit.commit_type) {
            tracing::trace!(commit_type = %commit.commit_type, "skipping hidden commit type");
            return Classified::Skip;
        }

        if let Some(section) = self.table.section_for(&commit.commit_type) {
            commit.commit_type = section.to_string();
        }

        if commit.short_hash.is_none()
            && let Some(hash) = commit.hash.as_deref()
        {
            commit.short_hash = Some(short_hash(hash));
            // a non-string shortHash kept as pass-through is superseded
            commit.extra.remove("shortHash");
        }

        if let Some(subject) = commit.subject.as_deref()
            && !subject.is_empty()
        {
            commit.subject = Some(capitalize_first(subject));
        }

        Classified::Keep(commit)
    }

    /// Classify a batch, keeping the surviving commits in input order.
    pub fn classify_all<I>(&self, commits: I, context: &RenderContext) -> Vec<CommitRecord>
    where
        I: IntoIterator<Item = CommitRecord>,
    {
        commits
            .into_iter()
            .filter_map(|commit| self.classify(commit, context).into_kept())
            .collect()
    }
}

/// One-off classification without holding a [`Classifier`].
pub fn transform(table: &TypeTable, commit: CommitRecord, context: &RenderContext) -> Classified {
    Classifier::new(table).classify(commit, context)
}

/// First [`SHORT_HASH_LEN`] characters of a hash; shorter input is returned whole.
pub fn short_hash(hash: &str) -> String {
    hash.chars().take(SHORT_HASH_LEN).collect()
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
