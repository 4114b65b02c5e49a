use serde::{Deserialize, Serialize};

/// Placeholder written when a page was fetched but had no law section.
pub const NOT_FOUND_SENTINEL: &str = "Law text not found";

/// Prefix of the placeholder written when a page could not be fetched.
pub const ERROR_PREFIX: &str = "Error: ";

/// A law entry as exported by a prior crawl.
///
/// Only the three fields below are read; anything else in the source
/// object is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LawRecord {
    pub title: String,
    pub summary: String,
    /// Absolute URL of the page holding the law text.
    pub link: String,
}

/// A law entry enriched with the text extracted from its page.
///
/// Field order here is the field order of the written JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapedLawRecord {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub law_text: String,
}

/// What scraping a single record produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LawText {
    /// The law section was found; holds its normalized text.
    Extracted(String),
    /// The page was fetched but held no law section.
    NotFound,
    /// The request failed; holds the error description.
    Errored(String),
}

/// Outcome classification without the payload, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Extracted,
    NotFound,
    Errored,
}

impl LawText {
    pub fn outcome(&self) -> Outcome {
        match self {
            LawText::Extracted(_) => Outcome::Extracted,
            LawText::NotFound => Outcome::NotFound,
            LawText::Errored(_) => Outcome::Errored,
        }
    }

    /// Collapse into the string stored in the `law_text` field.
    pub fn into_field(self) -> String {
        match self {
            LawText::Extracted(text) => text,
            LawText::NotFound => NOT_FOUND_SENTINEL.to_string(),
            LawText::Errored(message) => format!("{ERROR_PREFIX}{message}"),
        }
    }
}

impl ScrapedLawRecord {
    /// Build the output record for `record`, copying its fields unchanged.
    pub fn new(record: LawRecord, text: LawText) -> Self {
        Self {
            title: record.title,
            summary: record.summary,
            link: record.link,
            law_text: text.into_field(),
        }
    }

    /// Recover the outcome from the stored `law_text` string.
    ///
    /// Extracted text that happens to start with the error prefix is
    /// indistinguishable from an error here.
    pub fn outcome(&self) -> Outcome {
        if self.law_text == NOT_FOUND_SENTINEL {
            Outcome::NotFound
        } else if self.law_text.starts_with(ERROR_PREFIX) {
            Outcome::Errored
        } else {
            Outcome::Extracted
        }
    }

    /// True if `title`, `summary` and `link` match the input record.
    pub fn matches_source(&self, record: &LawRecord) -> bool {
        self.title == record.title && self.summary == record.summary && self.link == record.link
    }
}

/// Count of records per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub extracted: usize,
    pub not_found: usize,
    pub errored: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Extracted => self.extracted += 1,
            Outcome::NotFound => self.not_found += 1,
            Outcome::Errored => self.errored += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.extracted + self.not_found + self.errored
    }

    pub fn tally(records: &[ScrapedLawRecord]) -> Self {
        let mut counts = Self::default();
        for r in records {
            counts.record(r.outcome());
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> LawRecord {
        LawRecord {
            title: "The Indian Contract Act, 1872".to_string(),
            summary: "An Act to define and amend certain parts of the law relating to contracts."
                .to_string(),
            link: "https://www.indiacode.nic.in/show-data?actid=AC_CEN_3_20_00003".to_string(),
        }
    }

    #[test]
    fn test_into_field() {
        assert_eq!(LawText::Extracted("Section 1".into()).into_field(), "Section 1");
        assert_eq!(LawText::NotFound.into_field(), "Law text not found");
        assert_eq!(
            LawText::Errored("operation timed out".into()).into_field(),
            "Error: operation timed out"
        );
    }

    #[test]
    fn test_new_copies_source_fields() {
        let record = sample_record();
        let scraped = ScrapedLawRecord::new(record.clone(), LawText::NotFound);
        assert!(scraped.matches_source(&record));
        assert_eq!(scraped.law_text, NOT_FOUND_SENTINEL);
    }

    #[test]
    fn test_outcome_recovered_from_field() {
        let record = sample_record();
        for text in [
            LawText::Extracted("1. Short title.".into()),
            LawText::NotFound,
            LawText::Errored("connection refused".into()),
        ] {
            let expected = text.outcome();
            let scraped = ScrapedLawRecord::new(record.clone(), text);
            assert_eq!(scraped.outcome(), expected);
        }
    }

    #[test]
    fn test_input_ignores_extra_fields() {
        let json = r#"{"title":"T","summary":"S","link":"http://example.com/a","year":1872}"#;
        let record: LawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "T");
        assert_eq!(record.link, "http://example.com/a");
    }

    #[test]
    fn test_output_field_order() {
        let scraped = ScrapedLawRecord::new(
            LawRecord {
                title: "T".into(),
                summary: "S".into(),
                link: "http://example.com/a".into(),
            },
            LawText::Extracted("Hello World".into()),
        );
        let json = serde_json::to_string(&scraped).unwrap();
        assert_eq!(
            json,
            r#"{"title":"T","summary":"S","link":"http://example.com/a","law_text":"Hello World"}"#
        );
    }

    #[test]
    fn test_tally() {
        let record = sample_record();
        let records = vec![
            ScrapedLawRecord::new(record.clone(), LawText::Extracted("a".into())),
            ScrapedLawRecord::new(record.clone(), LawText::NotFound),
            ScrapedLawRecord::new(record.clone(), LawText::NotFound),
            ScrapedLawRecord::new(record, LawText::Errored("boom".into())),
        ];
        let counts = OutcomeCounts::tally(&records);
        assert_eq!(counts.extracted, 1);
        assert_eq!(counts.not_found, 2);
        assert_eq!(counts.errored, 1);
        assert_eq!(counts.total(), 4);
    }
}
