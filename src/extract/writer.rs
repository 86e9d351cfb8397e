use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Create `path` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))
}

/// Write raw bytes unchanged.
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("write {}", path.display()))
}

/// Validate `raw` as JSON and write it re-encoded with two-space indentation.
///
/// Object keys come out sorted, not in their original order.
pub fn write_pretty_json(path: &Path, raw: &[u8]) -> Result<()> {
    let value: serde_json::Value = serde_json::from_slice(raw)
        .with_context(|| format!("validate json for {}", path.display()))?;
    let pretty = serde_json::to_vec_pretty(&value)
        .with_context(|| format!("pretty-print json for {}", path.display()))?;
    write_file(path, &pretty)
}
