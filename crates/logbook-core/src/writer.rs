//! Release-notes writer: classifies commits, groups and sorts them, and
//! renders the result through the template partials.

use crate::config::{Config, UrlFormats};
use crate::markdown::{
    compose_markdown_with_affixes, format_markdown_list_item, linkify_references,
};
use crate::sections::TypeTable;
use crate::templates::{Templates, expand};
use crate::transform::Classifier;
use crate::types::{CommitRecord, Note, RenderContext};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Heading used for commits without a scope when grouping by scope.
pub const UNSCOPED_GROUP: &str = "Other";

/// Which commit field groups entries under a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// The commit type, i.e. the changelog section after classification.
    Type,
    Scope,
}

impl GroupBy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "type" => Some(Self::Type),
            "scope" => Some(Self::Scope),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Scope => "scope",
        }
    }
}

/// Ordering of note groups in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteGroupSort {
    /// Alphabetical by note title.
    Title,
    /// First-appearance order.
    None,
}

impl NoteGroupSort {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::None => "none",
        }
    }
}

/// Options handed to the writer alongside the transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    pub templates: Templates,
    pub group_by: GroupBy,
    pub commit_sort: Vec<String>,
    pub note_group_sort: NoteGroupSort,
    pub notes_sort: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            templates: Templates::default(),
            group_by: GroupBy::Type,
            commit_sort: vec!["scope".to_string(), "subject".to_string()],
            note_group_sort: NoteGroupSort::Title,
            notes_sort: true,
        }
    }
}

impl WriterOptions {
    pub fn from_config(config: &Config, templates: Templates) -> Self {
        Self {
            templates,
            group_by: config.group_by,
            commit_sort: config.commit_sort.clone(),
            note_group_sort: config.note_group_sort,
            notes_sort: config.notes_sort,
        }
    }
}

/// Renders one release section of a changelog.
#[derive(Debug, Clone)]
pub struct ChangelogWriter<'a> {
    options: WriterOptions,
    classifier: Classifier<'a>,
    urls: UrlFormats,
}

impl<'a> ChangelogWriter<'a> {
    pub fn new(options: WriterOptions, table: &'a TypeTable, urls: UrlFormats) -> Self {
        Self {
            options,
            classifier: Classifier::new(table),
            urls,
        }
    }

    /// Render the release section for `records`.
    pub fn render<I>(&self, records: I, context: &RenderContext) -> String
    where
        I: IntoIterator<Item = CommitRecord>,
    {
        let kept = self.classifier.classify_all(records, context);
        tracing::debug!(kept = kept.len(), "rendering release section");

        let notes = self.collect_notes(&kept);
        let groups = self.group(kept);

        let date = context
            .date
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
        let version = context
            .version
            .clone()
            .or_else(|| context.current_tag.clone())
            .unwrap_or_else(|| "Unreleased".to_string());
        let compare_url = self.compare_url(context);
        let version_link = match &compare_url {
            Some(url) => format!("[{version}]({url})"),
            None => version.clone(),
        };

        let mut header_vars: BTreeMap<&str, String> = BTreeMap::new();
        header_vars.insert("version", version);
        header_vars.insert("date", date);
        header_vars.insert("versionLink", version_link);
        header_vars.insert("compareUrl", compare_url.unwrap_or_default());
        let header = expand(&self.options.templates.header, |key| {
            lookup(&header_vars, context, key)
        });

        let mut sections = String::new();
        for (title, commits) in &groups {
            sections.push_str("### ");
            sections.push_str(title);
            sections.push_str("\n\n");
            for commit in commits {
                sections.push_str(&format_markdown_list_item(
                    &self.render_commit(commit, context),
                ));
            }
            sections.push('\n');
        }

        let mut footer = String::new();
        for (title, texts) in &notes {
            let list: String = texts
                .iter()
                .map(|text| format_markdown_list_item(&self.linkify(text, context)))
                .collect();
            let mut vars: BTreeMap<&str, String> = BTreeMap::new();
            vars.insert("title", title.clone());
            vars.insert("notes", list);
            footer.push_str(&expand(&self.options.templates.footer, |key| {
                lookup(&vars, context, key)
            }));
        }

        let mut main_vars: BTreeMap<&str, String> = BTreeMap::new();
        main_vars.insert("header", header);
        main_vars.insert("sections", sections);
        main_vars.insert("footer", footer);
        expand(&self.options.templates.main, |key| {
            lookup(&main_vars, context, key)
        })
    }

    fn render_commit(&self, commit: &CommitRecord, context: &RenderContext) -> String {
        let mut vars: BTreeMap<&str, String> = BTreeMap::new();
        let subject = self.linkify(commit.subject.as_deref().unwrap_or_default(), context);
        vars.insert("type", commit.commit_type.clone());
        if let Some(scope) = commit.scope() {
            vars.insert("scope", scope.to_string());
            vars.insert("scopePrefix", format!("**{scope}:** "));
        }
        if let Some(hash) = commit.hash.as_deref().filter(|h| !h.is_empty()) {
            vars.insert("hash", hash.to_string());
        }
        if let Some(short) = commit.short_hash.as_deref().filter(|s| !s.is_empty()) {
            vars.insert("shortHash", short.to_string());
            let link = match vars.get("hash") {
                Some(hash) if context.has_repository() => {
                    let url = expand(&self.urls.commit, |key| match key {
                        "hash" => Some(hash.clone()),
                        _ => context.lookup(key).map(str::to_string),
                    });
                    format!(" ([{short}]({url}))")
                }
                _ => format!(" ({short})"),
            };
            // a subject ending in a code fence pushes the link to its own line
            let composed = compose_markdown_with_affixes(&subject, "", &link);
            let link = composed
                .strip_prefix(subject.as_str())
                .map_or(link, str::to_string);
            vars.insert("commitLink", link);
        }
        vars.insert("subject", subject);
        expand(&self.options.templates.commit, |key| {
            lookup(&vars, context, key)
        })
    }

    fn linkify(&self, text: &str, context: &RenderContext) -> String {
        if !context.has_repository() {
            return text.to_string();
        }
        linkify_references(
            text,
            |id| Some(expand_with(&self.urls.issue, context, "id", id)),
            |user| Some(expand_with(&self.urls.user, context, "user", user)),
        )
    }

    fn compare_url(&self, context: &RenderContext) -> Option<String> {
        if !context.has_repository()
            || context.previous_tag.is_none()
            || context.current_tag.is_none()
        {
            return None;
        }
        Some(expand(&self.urls.compare, |key| {
            context.lookup(key).map(str::to_string)
        }))
    }

    fn group(&self, commits: Vec<CommitRecord>) -> Vec<(String, Vec<CommitRecord>)> {
        // `None` is the unscoped group, kept apart from a scope named like its heading
        let mut by_key: BTreeMap<Option<String>, Vec<CommitRecord>> = BTreeMap::new();
        for commit in commits {
            let key = match self.options.group_by {
                GroupBy::Type => Some(commit.commit_type.clone()),
                GroupBy::Scope => commit.scope().map(str::to_string),
            };
            by_key.entry(key).or_default().push(commit);
        }

        let mut groups: Vec<(Option<String>, Vec<CommitRecord>)> =
            by_key.into_iter().collect();
        match self.options.group_by {
            GroupBy::Type => {
                let order = self.classifier.table().visible_sections();
                let rank = |title: &str| order.iter().position(|s| *s == title);
                // known sections in table order, unknown ones alphabetically after
                groups.sort_by(|(a, _), (b, _)| {
                    let a = a.as_deref().unwrap_or_default();
                    let b = b.as_deref().unwrap_or_default();
                    match (rank(a), rank(b)) {
                        (Some(x), Some(y)) => x.cmp(&y),
                        (Some(_), None) => Ordering::Less,
                        (None, Some(_)) => Ordering::Greater,
                        (None, None) => a.cmp(b),
                    }
                });
            }
            GroupBy::Scope => {
                groups.sort_by(|(a, _), (b, _)| {
                    a.is_none().cmp(&b.is_none()).then_with(|| a.cmp(b))
                });
            }
        }

        let mut groups: Vec<(String, Vec<CommitRecord>)> = groups
            .into_iter()
            .map(|(key, commits)| (key.unwrap_or_else(|| UNSCOPED_GROUP.to_string()), commits))
            .collect();
        for (_, commits) in &mut groups {
            commits.sort_by(|a, b| compare_commits(a, b, &self.options.commit_sort));
        }
        groups
    }

    fn collect_notes(&self, commits: &[CommitRecord]) -> Vec<(String, Vec<String>)> {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for Note { title, text } in commits.iter().flat_map(CommitRecord::notes) {
            match groups.iter_mut().find(|(t, _)| *t == title) {
                Some((_, texts)) => texts.push(text),
                None => groups.push((title, vec![text])),
            }
        }
        if self.options.note_group_sort == NoteGroupSort::Title {
            groups.sort_by(|(a, _), (b, _)| a.cmp(b));
        }
        if self.options.notes_sort {
            for (_, texts) in &mut groups {
                texts.sort();
            }
        }
        groups
    }
}

/// Prepend the changelog document header to a rendered release section.
pub fn with_document_header(header: &str, section: &str) -> String {
    if header.is_empty() {
        return section.to_string();
    }
    format!("{}\n\n{}", header.trim_end(), section)
}

fn lookup(vars: &BTreeMap<&str, String>, context: &RenderContext, key: &str) -> Option<String> {
    vars.get(key)
        .cloned()
        .or_else(|| context.lookup(key).map(str::to_string))
}

fn expand_with(format: &str, context: &RenderContext, name: &str, value: &str) -> String {
    expand(format, |key| {
        if key == name {
            Some(value.to_string())
        } else {
            context.lookup(key).map(str::to_string)
        }
    })
}

fn sort_value<'c>(commit: &'c CommitRecord, key: &str) -> Option<&'c str> {
    match key {
        "type" => Some(commit.commit_type.as_str()),
        "hash" => commit.hash.as_deref(),
        "shortHash" => commit.short_hash.as_deref(),
        "subject" => commit.subject.as_deref(),
        other => commit.extra.get(other).and_then(|v| v.as_str()),
    }
}

fn compare_commits(a: &CommitRecord, b: &CommitRecord, keys: &[String]) -> Ordering {
    keys.iter()
        .map(|key| sort_value(a, key).cmp(&sort_value(b, key)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
