use crate::extract;
use crate::input;
use crate::output;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use lawtext_model::{LawRecord, LawText, OutcomeCounts, ScrapedLawRecord};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("lawtext/", env!("CARGO_PKG_VERSION"));

/// Settings for a scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Upper bound on each request, connect through body.
    pub timeout: Duration,
    pub user_agent: String,
    /// Maximum fetches in flight. 1 means strictly sequential.
    pub concurrency: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            concurrency: 1,
        }
    }
}

/// Fetches law pages and turns each record into an enriched record.
pub struct LawScraper {
    client: reqwest::Client,
    concurrency: usize,
}

impl LawScraper {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            concurrency: config.concurrency.max(1),
        })
    }

    /// Scrape every record, yielding exactly one output per input in input order.
    ///
    /// A failing record never stops the run; its failure is carried in
    /// its `law_text`.
    pub async fn scrape_all(&self, records: Vec<LawRecord>) -> Vec<ScrapedLawRecord> {
        stream::iter(records)
            .map(|record| async move {
                let text = self.scrape_record(&record).await;
                ScrapedLawRecord::new(record, text)
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Fetch one record's page and extract its law section.
    pub async fn scrape_record(&self, record: &LawRecord) -> LawText {
        tracing::info!(url = %record.link, "Scraping");

        match self.fetch_page(&record.link).await {
            Ok(html) => match extract::extract_law_text(&html) {
                Some(text) => LawText::Extracted(text),
                None => {
                    tracing::debug!(url = %record.link, "No law section on page");
                    LawText::NotFound
                }
            },
            Err(e) => {
                let message = format!("{e:#}");
                tracing::warn!(url = %record.link, error = %message, "Failed to fetch");
                LawText::Errored(message)
            }
        }
    }

    // Status is not inspected: error pages are parsed like any other body.
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        tracing::debug!(url = %url, status = %response.status(), "Received response");
        Ok(response.text().await?)
    }
}

/// Scrape the law records in `input_file` and write the enriched records to `output_file`.
///
/// Only reading the input and writing the output can fail; per-record
/// failures are recorded in the output.
pub async fn scrape(input_file: &str, output_file: &str, config: &ScrapeConfig) -> Result<OutcomeCounts> {
    let records = input::read_records(input_file)?;
    tracing::info!(
        path = %input_file,
        records = records.len(),
        concurrency = config.concurrency,
        "Loaded law records"
    );

    let scraper = LawScraper::new(config)?;
    let results = scraper.scrape_all(records).await;

    output::write_records(output_file, &results)?;

    let counts = OutcomeCounts::tally(&results);
    tracing::info!(
        path = %output_file,
        extracted = counts.extracted,
        not_found = counts.not_found,
        errored = counts.errored,
        "Scraping completed"
    );

    Ok(counts)
}
