use serde::{Deserialize, Serialize};

/// File name of the manifest written next to a fetched dataset.
pub const MANIFEST_FILE: &str = "dataset_manifest.json";

/// Provenance record for a dataset snapshot written to disk.
///
/// Written last, so its presence means every listed file was stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    /// Hub identifier (e.g., "opennyaiorg/InJudgements_dataset").
    pub dataset: String,
    /// Revision that was requested (branch, tag or commit).
    pub revision: String,
    /// Commit the revision resolved to, when the hub reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    pub endpoint: String,
    /// RFC 3339 timestamp.
    pub fetched_at: String,
    pub files: Vec<DatasetFile>,
}

/// One file of the dataset repository, relative to the destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetFile {
    pub path: String,
    pub bytes: u64,
}

impl DatasetManifest {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let manifest = DatasetManifest {
            dataset: "opennyaiorg/InJudgements_dataset".to_string(),
            revision: "main".to_string(),
            sha: None,
            endpoint: "https://huggingface.co".to_string(),
            fetched_at: "2026-01-01T00:00:00+00:00".to_string(),
            files: vec![
                DatasetFile { path: "README.md".to_string(), bytes: 120 },
                DatasetFile { path: "data/train.parquet".to_string(), bytes: 4096 },
            ],
        };
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        assert!(!json.contains("\"sha\""));
        let parsed: DatasetManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.files, manifest.files);
        assert_eq!(parsed.total_bytes(), 4216);
    }
}
