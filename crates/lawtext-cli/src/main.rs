use anyhow::Result;
use clap::{Parser, Subcommand};
use lawtext_acquire::dataset::{self, DatasetSource};
use lawtext_acquire::scrape::{self, ScrapeConfig};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "lawtext")]
#[command(about = "Law text scraping and legal dataset download tool")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch each law record's page and extract its law section text
    Scrape {
        /// JSON array of records with title, summary and link
        #[arg(short, long, default_value = "KANOON.json")]
        input: String,

        /// Output file for the enriched records
        #[arg(short, long, default_value = "output.json")]
        output: String,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,

        /// Maximum pages fetched at once (output order is unaffected)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
        concurrency: u16,

        /// User-Agent header sent with each request
        #[arg(long, default_value = scrape::DEFAULT_USER_AGENT)]
        user_agent: String,
    },

    /// Download a dataset from the dataset hub to a local directory
    FetchDataset {
        /// Dataset identifier on the hub
        #[arg(short, long, default_value = dataset::DEFAULT_DATASET)]
        dataset: String,

        /// Destination directory
        #[arg(short = 'O', long, default_value = dataset::DEFAULT_DESTINATION)]
        output_dir: String,

        /// Branch, tag or commit to fetch
        #[arg(long, default_value = "main")]
        revision: String,

        /// Hub base URL
        #[arg(long, env = "HF_ENDPOINT", default_value = dataset::DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Access token for gated datasets
        #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Check a scrape output file against the input it was built from
    Verify {
        /// Input records file given to `scrape`
        #[arg(short, long)]
        input: String,

        /// Output file written by `scrape`
        #[arg(short, long)]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn,hyper_util=info",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn,hyper_util=info",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    match cli.command {
        Commands::Scrape {
            input,
            output,
            timeout_secs,
            concurrency,
            user_agent,
        } => {
            tracing::info!(input = %input, output = %output, "Scraping law texts");
            let config = ScrapeConfig {
                timeout: Duration::from_secs(timeout_secs),
                user_agent,
                concurrency: usize::from(concurrency),
            };
            scrape::scrape(&input, &output, &config).await?;
        }
        Commands::FetchDataset {
            dataset,
            output_dir,
            revision,
            endpoint,
            token,
        } => {
            tracing::info!(dataset = %dataset, output_dir = %output_dir, "Fetching dataset");
            let source = DatasetSource {
                endpoint,
                revision,
                token,
                ..DatasetSource::default()
            };
            lawtext_acquire::fetch_dataset(&dataset, &output_dir, source).await?;
        }
        Commands::Verify { input, output } => {
            tracing::info!(input = %input, output = %output, "Verifying");
            let report = lawtext_validate::verify(&input, &output)?;
            if !report.is_valid() {
                anyhow::bail!("{} verification errors", report.errors.len());
            }
            tracing::info!("Output is consistent with input");
        }
    }

    Ok(())
}
