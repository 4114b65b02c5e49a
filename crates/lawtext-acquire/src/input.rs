use anyhow::{Context, Result};
use lawtext_model::{LawRecord, ScrapedLawRecord};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read the JSON array of law records to scrape.
///
/// A leading byte-order mark is tolerated.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<LawRecord>> {
    read_json_array(path.as_ref())
}

/// Read a previously written scrape result file.
pub fn read_scraped_records(path: impl AsRef<Path>) -> Result<Vec<ScrapedLawRecord>> {
    read_json_array(path.as_ref())
}

fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    serde_json::from_str(text).with_context(|| format!("Failed to parse {}", path.display()))
}
