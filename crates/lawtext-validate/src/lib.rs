use anyhow::Result;
use lawtext_acquire::input::{read_records, read_scraped_records};
use lawtext_model::{LawRecord, OutcomeCounts, ScrapedLawRecord};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    #[error("output has {output} records but input has {input}")]
    LengthMismatch { input: usize, output: usize },

    #[error("record {index}: {field} differs from input")]
    FieldMismatch { index: usize, field: &'static str },
}

/// Result of checking a scrape output against its input.
#[derive(Debug)]
pub struct VerificationReport {
    pub errors: Vec<VerificationError>,
    pub counts: OutcomeCounts,
}

impl VerificationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Verify the scrape output file against the input file it was built from.
pub fn verify(input_path: &str, output_path: &str) -> Result<VerificationReport> {
    let input = read_records(input_path)?;
    let output = read_scraped_records(output_path)?;

    let errors = verify_records(&input, &output);
    let counts = OutcomeCounts::tally(&output);

    for e in &errors {
        tracing::warn!("{e}");
    }
    tracing::info!(
        records = output.len(),
        extracted = counts.extracted,
        not_found = counts.not_found,
        errored = counts.errored,
        errors = errors.len(),
        "Verified scrape output"
    );

    Ok(VerificationReport { errors, counts })
}

/// Check that `output` has one record per `input` record, in order, with
/// `title`, `summary` and `link` unchanged.
pub fn verify_records(input: &[LawRecord], output: &[ScrapedLawRecord]) -> Vec<VerificationError> {
    let mut errors = Vec::new();

    if input.len() != output.len() {
        errors.push(VerificationError::LengthMismatch {
            input: input.len(),
            output: output.len(),
        });
    }

    for (index, (source, scraped)) in input.iter().zip(output).enumerate() {
        if scraped.title != source.title {
            errors.push(VerificationError::FieldMismatch { index, field: "title" });
        }
        if scraped.summary != source.summary {
            errors.push(VerificationError::FieldMismatch { index, field: "summary" });
        }
        if scraped.link != source.link {
            errors.push(VerificationError::FieldMismatch { index, field: "link" });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawtext_model::LawText;
    use std::fs;

    fn sample_input() -> Vec<LawRecord> {
        (0..3)
            .map(|i| LawRecord {
                title: format!("Act {i}"),
                summary: format!("Summary {i}"),
                link: format!("https://www.indiacode.nic.in/act/{i}"),
            })
            .collect()
    }

    fn scraped(input: &[LawRecord]) -> Vec<ScrapedLawRecord> {
        input
            .iter()
            .cloned()
            .map(|r| ScrapedLawRecord::new(r, LawText::NotFound))
            .collect()
    }

    #[test]
    fn test_valid_output() {
        let input = sample_input();
        let output = scraped(&input);
        assert!(verify_records(&input, &output).is_empty());
    }

    #[test]
    fn test_length_mismatch() {
        let input = sample_input();
        let output = scraped(&input[..2]);
        let errors = verify_records(&input, &output);
        assert_eq!(errors, vec![VerificationError::LengthMismatch { input: 3, output: 2 }]);
    }

    #[test]
    fn test_reordered_output() {
        let input = sample_input();
        let mut output = scraped(&input);
        output.swap(0, 1);
        let errors = verify_records(&input, &output);
        assert!(errors.contains(&VerificationError::FieldMismatch { index: 0, field: "title" }));
        assert!(errors.contains(&VerificationError::FieldMismatch { index: 1, field: "link" }));
        assert!(!errors.iter().any(|e| matches!(e, VerificationError::FieldMismatch { index: 2, .. })));
    }

    #[test]
    fn test_changed_summary() {
        let input = sample_input();
        let mut output = scraped(&input);
        output[2].summary.push(' ');
        let errors = verify_records(&input, &output);
        assert_eq!(errors, vec![VerificationError::FieldMismatch { index: 2, field: "summary" }]);
    }

    #[test]
    fn test_verify_files() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("input.json");
        let output_path = dir.path().join("output.json");

        let input = sample_input();
        let mut output = scraped(&input);
        output[0].law_text = "Error: operation timed out".to_string();
        output[1].law_text = "1. Short title.".to_string();
        fs::write(&input_path, serde_json::to_string(&input).unwrap()).unwrap();
        fs::write(&output_path, serde_json::to_string_pretty(&output).unwrap()).unwrap();

        let report = verify(input_path.to_str().unwrap(), output_path.to_str().unwrap()).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.counts.errored, 1);
        assert_eq!(report.counts.extracted, 1);
        assert_eq!(report.counts.not_found, 1);
    }
}
