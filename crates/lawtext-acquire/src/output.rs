use anyhow::{Context, Result};
use lawtext_model::{DatasetManifest, ScrapedLawRecord, MANIFEST_FILE};
use std::fs;
use std::path::Path;

/// Write the scrape results as a pretty-printed JSON array.
///
/// Two-space indentation; non-ASCII text is written as-is. Parent
/// directories are created if missing.
pub fn write_records(path: impl AsRef<Path>, records: &[ScrapedLawRecord]) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, &json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "Wrote law records");

    Ok(())
}

/// Write the dataset manifest into `dest_dir`.
pub fn write_manifest(dest_dir: &Path, manifest: &DatasetManifest) -> Result<()> {
    fs::create_dir_all(dest_dir)?;
    let path = dest_dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(&path, &json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), files = manifest.files.len(), "Wrote dataset manifest");
    Ok(())
}

/// Create the parent directories of `path` if it has any.
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display())),
        _ => Ok(()),
    }
}
