use crate::cli::TransformArgs;
use crate::input::read_records;
use logbook_core::errors::Result;
use logbook_core::{Classifier, CommitRecord, Config, RenderContext};
use std::path::Path;

pub fn run(root: &Path, args: &TransformArgs) -> Result<()> {
    let config = Config::load(root)?;
    let records = read_records(args.input.as_deref())?;
    let kept = transform_records(&config, records);
    println!("{}", serde_json::to_string_pretty(&kept)?);
    Ok(())
}

/// Classify records with the configured table, keeping those that survive.
pub fn transform_records(config: &Config, records: Vec<CommitRecord>) -> Vec<CommitRecord> {
    let total = records.len();
    let classifier = Classifier::new(&config.types);
    let kept = classifier.classify_all(records, &RenderContext::default());
    tracing::info!(total, kept = kept.len(), "classified commits");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_records;
    use serde_json::json;

    #[test]
    fn keeps_visible_commits_in_order() {
        let records = parse_records(
            r#"[
                {"type": "feat", "hash": "1234567890ab", "subject": "add widget"},
                {"type": "chore", "subject": "bump deps"},
                {"type": "unknown", "subject": "x"}
            ]"#,
        )
        .unwrap();
        let kept = transform_records(&Config::default(), records);
        assert_eq!(
            serde_json::to_value(&kept).unwrap(),
            json!([
                {"type": "Added", "hash": "1234567890ab", "shortHash": "1234567", "subject": "Add widget"},
                {"type": "unknown", "subject": "X"}
            ])
        );
    }
}
