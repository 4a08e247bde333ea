use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use common::{error::AppError, utils::config::AppConfig};
use tracing::{debug, info};

use crate::{reference::ReferenceIndex, results::TaggedLine};

/// A result file produced by entity detection and the query-text file it becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultFile {
    pub source: &'static str,
    pub target: &'static str,
}

pub const RESULT_FILES: [ResultFile; 2] = [
    ResultFile {
        source: "main-valid-results",
        target: "val",
    },
    ResultFile {
        source: "main-test-results",
        target: "test",
    },
];

impl ResultFile {
    pub fn input_path(&self, result_dir: &Path) -> PathBuf {
        result_dir.join(format!("{}.txt", self.source))
    }

    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.txt", self.target))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub dataset: String,
    pub total: usize,
    /// Never incremented. Kept so the per-file summary reads the same as
    /// earlier runs; `question_fallbacks` is the real fallback count.
    pub not_found: usize,
    pub question_fallbacks: usize,
}

impl ConversionSummary {
    fn new(dataset: &str) -> Self {
        Self {
            dataset: dataset.to_string(),
            total: 0,
            not_found: 0,
            question_fallbacks: 0,
        }
    }

    pub fn found(&self) -> usize {
        self.total.saturating_sub(self.not_found)
    }
}

pub struct Converter<'a> {
    index: &'a ReferenceIndex,
    settings: &'a AppConfig,
}

impl<'a> Converter<'a> {
    pub fn new(index: &'a ReferenceIndex, settings: &'a AppConfig) -> Self {
        Self { index, settings }
    }

    /// Rewrites every result line of `reader` as `<id><delim><query text>`.
    ///
    /// The first malformed line aborts the conversion; lines before it have
    /// already been handed to `writer`.
    pub fn convert<R: BufRead, W: Write>(
        &self,
        dataset: &str,
        reader: R,
        writer: &mut W,
    ) -> Result<ConversionSummary, AppError> {
        let mut summary = ConversionSummary::new(dataset);

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            summary.total = summary.total.saturating_add(1);
            if line_idx.checked_rem(self.settings.progress_interval) == Some(0) {
                info!(dataset, line = line_idx, "line: {line_idx}");
            }

            let line_number = line_idx.saturating_add(1);
            let tagged = TaggedLine::parse(&line, &self.settings.delimiter, line_number)?;

            let mut query_text = tagged.query_text(&self.settings.entity_tag);
            // no entity tokens: the whole question becomes the query
            if query_text.trim().is_empty() {
                query_text = self
                    .index
                    .question(tagged.id)
                    .ok_or_else(|| AppError::MissingQuestion {
                        id: tagged.id.to_string(),
                        line_number,
                    })?
                    .to_string();
                summary.question_fallbacks = summary.question_fallbacks.saturating_add(1);
            }

            writeln!(
                writer,
                "{}{}{}",
                tagged.id, self.settings.delimiter, query_text
            )?;
        }

        Ok(summary)
    }

    pub fn convert_file(
        &self,
        file: ResultFile,
        result_dir: &Path,
        output_dir: &Path,
    ) -> Result<ConversionSummary> {
        let in_path = file.input_path(result_dir);
        let out_path = file.output_path(output_dir);

        let outfile = File::create(&out_path)
            .with_context(|| format!("creating query text file {}", out_path.display()))?;
        let mut writer = BufWriter::new(outfile);

        println!("processing dataset: {}", file.target);
        let infile = File::open(&in_path)
            .with_context(|| format!("opening result file {}", in_path.display()))?;

        let summary = self
            .convert(file.target, BufReader::new(infile), &mut writer)
            .with_context(|| format!("converting {}", in_path.display()))?;
        writer
            .flush()
            .with_context(|| format!("flushing {}", out_path.display()))?;

        debug!(
            dataset = file.target,
            output = %out_path.display(),
            "Query text written"
        );
        Ok(summary)
    }

    pub fn convert_all(&self, result_dir: &Path, output_dir: &Path) -> Result<Vec<ConversionSummary>> {
        let mut summaries = Vec::with_capacity(RESULT_FILES.len());

        for file in RESULT_FILES {
            let summary = self.convert_file(file, result_dir, output_dir)?;

            println!("done with dataset: {}", summary.dataset);
            println!("notfound: {}", summary.not_found);
            println!("found: {}", summary.found());
            println!("{}", "-".repeat(60));
            info!(
                dataset = summary.dataset.as_str(),
                total = summary.total,
                question_fallbacks = summary.question_fallbacks,
                "Finished result file"
            );

            summaries.push(summary);
        }

        Ok(summaries)
    }
}
