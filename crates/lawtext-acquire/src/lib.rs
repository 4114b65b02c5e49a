pub mod dataset;
pub mod extract;
pub mod input;
pub mod output;
pub mod scrape;

pub use dataset::{fetch_dataset, DatasetFetcher, DatasetSource};
pub use scrape::{scrape, LawScraper, ScrapeConfig};
