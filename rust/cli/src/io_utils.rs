//! File helpers for hand history JSONL files.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::CliError;

/// Reads a whole text file, dropping a leading UTF-8 BOM if present.
pub fn read_text(path: &str) -> Result<String, CliError> {
    let mut content = std::fs::read_to_string(path)
        .map_err(|e| CliError::InvalidInput(format!("Failed to read {}: {}", path, e)))?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Appends one JSON value per line.
pub fn append_jsonl(path: &Path, records: &[serde_json::Value]) -> Result<(), CliError> {
    ensure_parent_dir(path)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for r in records {
        writeln!(file, "{}", serde_json::to_string(r)?)?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
