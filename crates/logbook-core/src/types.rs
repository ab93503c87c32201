use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed conventional commit as handed over by the commit parser.
///
/// Only `type` is required. Keys other than `type`, `hash`, `shortHash` and
/// `subject` are kept verbatim in `extra` and written back untouched. A known
/// optional key holding a non-string value is treated as absent and also
/// kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct CommitRecord {
    #[serde(rename = "type")]
    pub commit_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(rename = "shortHash", skip_serializing_if = "Option::is_none")]
    pub short_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommitRecord {
    pub fn new(commit_type: impl Into<String>) -> Self {
        Self {
            commit_type: commit_type.into(),
            hash: None,
            short_hash: None,
            subject: None,
            extra: Map::new(),
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn with_short_hash(mut self, short_hash: impl Into<String>) -> Self {
        self.short_hash = Some(short_hash.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Attach an arbitrary pass-through field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The commit scope, when the parser provided one as a string.
    pub fn scope(&self) -> Option<&str> {
        self.extra
            .get("scope")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Notes (e.g. `BREAKING CHANGE`) attached by the parser under `notes`.
    ///
    /// Entries without a string `title` and `text` are ignored.
    pub fn notes(&self) -> Vec<Note> {
        let Some(items) = self.extra.get("notes").and_then(Value::as_array) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| {
                let title = item.get("title")?.as_str()?;
                let text = item.get("text")?.as_str()?;
                Some(Note {
                    title: title.to_string(),
                    text: text.to_string(),
                })
            })
            .collect()
    }
}

impl TryFrom<Map<String, Value>> for CommitRecord {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut commit_type = None;
        let mut record = CommitRecord::new(String::new());

        for (key, value) in map {
            match (key.as_str(), value) {
                ("type", Value::String(s)) => commit_type = Some(s),
                ("type", other) => {
                    return Err(format!("commit `type` must be a string, found {other}"));
                }
                ("hash", Value::String(s)) => record.hash = Some(s),
                ("shortHash", Value::String(s)) => record.short_hash = Some(s),
                ("subject", Value::String(s)) => record.subject = Some(s),
                (_, value) => {
                    record.extra.insert(key, value);
                }
            }
        }

        record.commit_type =
            commit_type.ok_or_else(|| "commit record is missing `type`".to_string())?;
        Ok(record)
    }
}

/// A titled note carried by a commit, rendered in the changelog footer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Note {
    pub title: String,
    pub text: String,
}

/// Values known while rendering one release section.
///
/// The classifier receives it for signature compatibility only and never
/// looks inside; the writer uses it for headings and links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    pub version: Option<String>,
    pub current_tag: Option<String>,
    pub previous_tag: Option<String>,
    pub date: Option<String>,
    pub host: Option<String>,
    pub owner: Option<String>,
    pub repository: Option<String>,
}

impl RenderContext {
    /// Look up a context value by its template placeholder name.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let value = match key {
            "version" => &self.version,
            "currentTag" => &self.current_tag,
            "previousTag" => &self.previous_tag,
            "date" => &self.date,
            "host" => &self.host,
            "owner" => &self.owner,
            "repository" => &self.repository,
            _ => return None,
        };
        value.as_deref()
    }

    /// True when host, owner and repository are all known.
    pub fn has_repository(&self) -> bool {
        self.host.is_some() && self.owner.is_some() && self.repository.is_some()
    }
}

/// Outcome of classifying a single commit.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// The commit belongs in the changelog, normalized for display.
    Keep(CommitRecord),
    /// The commit's type is hidden; omit it from every section.
    Skip,
}

impl Classified {
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    pub fn into_kept(self) -> Option<CommitRecord> {
        match self {
            Self::Keep(record) => Some(record),
            Self::Skip => None,
        }
    }
}
