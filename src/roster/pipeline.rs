use std::path::Path;

use anyhow::Result;
use thiserror::Error;
use tracing::{debug, info};

use super::dedupe::dedupe;
use super::filter::is_roster_line;
use super::parse::RecordParser;
use crate::model::{ExtractionStats, RawLine, Record};
use crate::ocr::{OcrEngine, OcrError};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("OCR failed on {image}")]
    OcrFailure {
        image: String,
        #[source]
        source: OcrError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterExtraction {
    pub records: Vec<Record>,
    pub stats: ExtractionStats,
}

#[derive(Debug, Clone)]
pub struct RosterExtractor {
    parser: RecordParser,
}

impl RosterExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: RecordParser::new()?,
        })
    }

    pub fn run_extraction(
        &self,
        engine: &dyn OcrEngine,
        image: &Path,
        lang: &str,
    ) -> Result<RosterExtraction, ExtractError> {
        let lines = engine
            .recognize(image, lang)
            .map_err(|source| ExtractError::OcrFailure {
                image: image.display().to_string(),
                source,
            })?;

        info!(
            engine = engine.name(),
            lines = lines.len(),
            "OCR returned lines"
        );

        Ok(self.extract_roster(&lines))
    }

    pub fn extract_roster(&self, lines: &[RawLine]) -> RosterExtraction {
        let mut stats = ExtractionStats {
            lines_total: lines.len(),
            ..ExtractionStats::default()
        };
        let mut records = Vec::with_capacity(lines.len());

        for line in lines {
            let text = line.text.trim();
            if text.is_empty() {
                stats.skipped_empty += 1;
                continue;
            }

            let normalized = self.parser.normalizer().clean_line_text(text);
            if !is_roster_line(&normalized) {
                debug!(line = %text, normalized = %normalized, "skipping line without Arabic text");
                stats.skipped_non_arabic += 1;
                continue;
            }

            let parsed = self.parser.classify(&normalized);
            if parsed.name().is_empty() {
                debug!(line = %text, "skipping line with empty name");
                stats.skipped_empty_name += 1;
                continue;
            }

            debug!(name = %parsed.name(), code = %parsed.code(), "accepted roster line");
            records.push(parsed.into_record());
        }

        let collected = records.len();
        let records = dedupe(records);
        stats.duplicates_dropped = collected - records.len();
        stats.records = records.len();

        RosterExtraction { records, stats }
    }
}
