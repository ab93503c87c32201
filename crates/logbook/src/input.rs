use logbook_core::CommitRecord;
use logbook_core::errors::{LogbookError, Result, io_error_with_path};
use std::io::Read;
use std::path::Path;

/// Read commit records from a file, or from stdin when `path` is `None` or `-`.
pub fn read_records(path: Option<&Path>) -> Result<Vec<CommitRecord>> {
    let text = match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).map_err(|e| io_error_with_path(e, p))?
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_records(&text)
}

/// Parse a JSON array of records, or one JSON object per line.
pub fn parse_records(text: &str) -> Result<Vec<CommitRecord>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut out = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(line)
            .map_err(|e| LogbookError::InvalidData(format!("line {}: {e}", index + 1)))?;
        out.push(record);
    }
    Ok(out)
}
