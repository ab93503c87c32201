pub mod config;
pub mod errors;
pub mod markdown;
pub mod repository;
pub mod sections;
pub mod templates;
pub mod transform;
pub mod types;
pub mod writer;

// Re-export commonly used items
pub use config::{CONFIG_DIR, CONFIG_FILE, Config, UrlFormats};
pub use errors::{LogbookError, Result};
pub use repository::{RepoSlug, detect_repo_slug};
pub use sections::{TypeEntry, TypeTable};
pub use templates::{Templates, expand};
pub use transform::{Classifier, capitalize_first, short_hash, transform};
pub use types::{Classified, CommitRecord, Note, RenderContext};
pub use writer::{ChangelogWriter, GroupBy, NoteGroupSort, WriterOptions, with_document_header};
