use crate::cli::RenderArgs;
use crate::input::read_records;
use crate::ui::{log_success_value, normalize_nonempty_string};
use logbook_core::errors::{LogbookError, Result, io_error_with_path};
use logbook_core::{
    ChangelogWriter, CommitRecord, Config, RenderContext, RepoSlug, Templates, WriterOptions,
    detect_repo_slug, with_document_header,
};
use std::fs;
use std::path::Path;

pub fn run(root: &Path, args: &RenderArgs) -> Result<()> {
    let config = Config::load(root)?;
    let templates = Templates::load(&config.templates_dir)?;
    let records = read_records(args.input.as_deref())?;
    let slug = detect_repo_slug(root, config.github_repository.as_deref());
    if slug.is_none() {
        tracing::info!("repository not detected, rendering without links");
    }

    let context = build_context(&config, args, slug)?;
    let section = render_section(&config, templates, records, &context, args.with_header);

    match &args.output {
        Some(path) => {
            fs::write(path, &section).map_err(|e| io_error_with_path(e, path))?;
            log_success_value("Wrote changelog section", &path.display().to_string());
        }
        None => print!("{section}"),
    }
    Ok(())
}

/// Validate the CLI inputs and assemble the render context.
pub fn build_context(
    config: &Config,
    args: &RenderArgs,
    slug: Option<RepoSlug>,
) -> Result<RenderContext> {
    let raw = args.release_version.trim();
    let version = semver::Version::parse(raw.strip_prefix('v').unwrap_or(raw)).map_err(|e| {
        LogbookError::InvalidData(format!(
            "invalid release version '{}': {e}",
            args.release_version
        ))
    })?;
    let version = version.to_string();

    let date = match normalize_nonempty_string(args.date.as_deref()) {
        Some(date) => {
            chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
                LogbookError::InvalidData(format!("invalid date '{date}' (expected YYYY-MM-DD): {e}"))
            })?;
            date
        }
        None => chrono::Local::now().format("%Y-%m-%d").to_string(),
    };

    let (host, owner, repository) = match slug {
        Some(slug) => (Some(slug.host), Some(slug.owner), Some(slug.repository)),
        None => (None, None, None),
    };

    Ok(RenderContext {
        current_tag: Some(config.tag_for(&version)),
        version: Some(version),
        previous_tag: normalize_nonempty_string(args.previous_tag.as_deref()),
        date: Some(date),
        host,
        owner,
        repository,
    })
}

pub fn render_section(
    config: &Config,
    templates: Templates,
    records: Vec<CommitRecord>,
    context: &RenderContext,
    with_header: bool,
) -> String {
    let writer = ChangelogWriter::new(
        WriterOptions::from_config(config, templates),
        &config.types,
        config.urls.clone(),
    );
    let section = writer.render(records, context);
    if with_header {
        with_document_header(&config.header, &section)
    } else {
        section
    }
}
