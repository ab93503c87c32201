use crate::cli::{TypesArgs, TypesFormat};
use logbook_core::errors::Result;
use logbook_core::{Config, TypeTable};
use std::path::Path;

pub fn run(root: &Path, args: &TypesArgs) -> Result<()> {
    let config = Config::load(root)?;
    let out = match args.format {
        TypesFormat::Table => format_table(&config.types),
        TypesFormat::Json => config.types.to_json_string()? + "\n",
        TypesFormat::Toml => config.types.to_toml_string()?,
    };
    print!("{out}");
    Ok(())
}

/// Plain aligned columns: type, section, hidden.
pub fn format_table(table: &TypeTable) -> String {
    use std::fmt::Write as _;

    let type_width = table
        .entries()
        .iter()
        .map(|e| e.commit_type.chars().count())
        .chain(["TYPE".len()])
        .max()
        .unwrap_or_default();
    let section_width = table
        .entries()
        .iter()
        .map(|e| e.section.chars().count())
        .chain(["SECTION".len()])
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(out, "{:type_width$}  {:section_width$}  HIDDEN", "TYPE", "SECTION");
    for entry in table.entries() {
        let hidden = if entry.hidden { "yes" } else { "no" };
        let _ = writeln!(
            out,
            "{:type_width$}  {:section_width$}  {hidden}",
            entry.commit_type, entry.section
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use logbook_core::TypeEntry;

    #[test]
    fn formats_aligned_table() {
        let table = TypeTable::new(vec![
            TypeEntry::new("feat", "Added", false),
            TypeEntry::new("chore", "Chores", true),
        ])
        .unwrap();
        assert_eq!(
            format_table(&table),
            "TYPE   SECTION  HIDDEN\nfeat   Added    no\nchore  Chores   yes\n"
        );
    }

    #[test]
    fn aligns_non_ascii_sections_by_character() {
        let table = TypeTable::new(vec![
            TypeEntry::new("docs", "Änderungen", false),
            TypeEntry::new("fix", "Fixed", false),
        ])
        .unwrap();
        assert_eq!(
            format_table(&table),
            "TYPE  SECTION     HIDDEN\ndocs  Änderungen  no\nfix   Fixed       no\n"
        );
    }
}
