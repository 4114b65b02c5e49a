use crate::output;
use anyhow::{Context, Result};
use lawtext_model::{DatasetFile, DatasetManifest};
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use url::Url;

pub const DEFAULT_DATASET: &str = "opennyaiorg/InJudgements_dataset";
pub const DEFAULT_DESTINATION: &str = "./InJudgements_dataset";
pub const DEFAULT_ENDPOINT: &str = "https://huggingface.co";

/// Where and how to fetch datasets from.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    /// Hub base URL (e.g., "https://huggingface.co").
    pub endpoint: String,
    /// Branch, tag or commit to fetch.
    pub revision: String,
    /// Bearer token for gated or private datasets.
    pub token: Option<String>,
    pub user_agent: String,
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            revision: "main".to_string(),
            token: None,
            user_agent: crate::scrape::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetPathError {
    #[error("empty file path in dataset listing")]
    Empty,

    #[error("unsafe file path in dataset listing: {0}")]
    Unsafe(String),
}

/// Listing returned by the hub for one dataset revision.
#[derive(Debug, Deserialize)]
struct DatasetInfo {
    sha: Option<String>,
    #[serde(default)]
    siblings: Vec<Sibling>,
}

#[derive(Debug, Deserialize)]
struct Sibling {
    rfilename: String,
}

/// Downloads dataset repositories from a dataset hub.
pub struct DatasetFetcher {
    client: reqwest::Client,
    source: DatasetSource,
}

impl DatasetFetcher {
    pub fn new(source: DatasetSource) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(source.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, source })
    }

    /// Download every file of `dataset` into `dest_dir` and write a manifest.
    ///
    /// Existing files are overwritten. Any failure aborts the fetch.
    pub async fn fetch(&self, dataset: &str, dest_dir: &str) -> Result<DatasetManifest> {
        anyhow::ensure!(!dataset.trim().is_empty(), "Dataset identifier must not be empty");

        let info_url = self.info_url(dataset)?;
        tracing::info!(url = %info_url, dataset = %dataset, "Fetching dataset listing");
        let body = self.get(info_url).await?.bytes().await.context("Failed to read dataset listing")?;
        let info: DatasetInfo =
            serde_json::from_slice(&body).context("Failed to parse dataset listing")?;
        tracing::info!(files = info.siblings.len(), sha = ?info.sha, "Received dataset listing");

        // Check every path before anything is written.
        let paths = info
            .siblings
            .iter()
            .map(|s| safe_relative_path(&s.rfilename).map(|p| (s.rfilename.as_str(), p)))
            .collect::<Result<Vec<_>, _>>()?;

        let dest = Path::new(dest_dir);
        let mut files = Vec::with_capacity(paths.len());
        for (name, relative) in paths {
            let bytes = self.download_file(dataset, name, &dest.join(&relative)).await?;
            files.push(DatasetFile {
                path: name.to_string(),
                bytes,
            });
        }

        let manifest = DatasetManifest {
            dataset: dataset.to_string(),
            revision: self.source.revision.clone(),
            sha: info.sha,
            endpoint: self.source.endpoint.clone(),
            fetched_at: chrono::Utc::now().to_rfc3339(),
            files,
        };
        output::write_manifest(dest, &manifest)?;

        tracing::info!(
            dataset = %dataset,
            path = %dest.display(),
            files = manifest.files.len(),
            bytes = manifest.total_bytes(),
            "Dataset saved"
        );

        Ok(manifest)
    }

    async fn download_file(&self, dataset: &str, name: &str, target: &Path) -> Result<u64> {
        let url = self.file_url(dataset, name)?;
        tracing::info!(file = %name, "Downloading dataset file");

        let mut response = self.get(url).await?;

        output::ensure_parent(target)?;
        let mut file = tokio::fs::File::create(target)
            .await
            .with_context(|| format!("Failed to create {}", target.display()))?;

        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .with_context(|| format!("Failed to read {name}"))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!(file = %name, bytes = written, "Downloaded dataset file");
        Ok(written)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.source.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        let status = response.status();
        anyhow::ensure!(status.is_success(), "HTTP {status} for {url}");

        Ok(response)
    }

    /// `{endpoint}/api/datasets/{dataset}/revision/{revision}`
    fn info_url(&self, dataset: &str) -> Result<Url> {
        self.endpoint_url(|segments| {
            segments
                .extend(["api", "datasets"])
                .extend(dataset.split('/'))
                .push("revision")
                .push(&self.source.revision);
        })
    }

    /// `{endpoint}/datasets/{dataset}/resolve/{revision}/{path}`
    fn file_url(&self, dataset: &str, path: &str) -> Result<Url> {
        self.endpoint_url(|segments| {
            segments
                .push("datasets")
                .extend(dataset.split('/'))
                .push("resolve")
                .push(&self.source.revision)
                .extend(path.split('/'));
        })
    }

    fn endpoint_url(&self, build: impl FnOnce(&mut url::PathSegmentsMut<'_>)) -> Result<Url> {
        let mut url = Url::parse(&self.source.endpoint)
            .with_context(|| format!("Invalid hub endpoint: {}", self.source.endpoint))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow::anyhow!("Invalid hub endpoint: {}", self.source.endpoint))?;
            segments.pop_if_empty();
            build(&mut segments);
        }
        Ok(url)
    }
}

/// Fetch `dataset` from `source` into `dest_dir`.
pub async fn fetch_dataset(dataset: &str, dest_dir: &str, source: DatasetSource) -> Result<DatasetManifest> {
    DatasetFetcher::new(source)?.fetch(dataset, dest_dir).await
}

/// Turn a file name from the hub listing into a path that stays inside the destination.
pub fn safe_relative_path(name: &str) -> Result<PathBuf, DatasetPathError> {
    if name.is_empty() {
        return Err(DatasetPathError::Empty);
    }

    let path = Path::new(name);
    if !path.components().all(|c| matches!(c, Component::Normal(_))) {
        return Err(DatasetPathError::Unsafe(name.to_string()));
    }

    Ok(path.to_path_buf())
}
