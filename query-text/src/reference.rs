use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use common::error::AppError;
use tracing::{info, warn};

/// Column of the question text in a reference line.
const QUESTION_FIELD: usize = 4;

/// Original question text keyed by line id, loaded once per run.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    questions: HashMap<String, String>,
}

impl ReferenceIndex {
    pub fn load(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "getting questions...");
        let file = File::open(path)
            .with_context(|| format!("opening reference dataset at {}", path.display()))?;

        let index = Self::read_from(BufReader::new(file))
            .with_context(|| format!("loading reference questions from {}", path.display()))?;

        if index.is_empty() {
            warn!(path = %path.display(), "Reference dataset contains no questions");
        }
        info!(questions = index.len(), "Reference questions loaded");
        Ok(index)
    }

    /// Reads `id \t subject \t predicate \t object \t question` lines.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self, AppError> {
        let mut questions = HashMap::new();

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = line_idx.saturating_add(1);
            let items: Vec<&str> = line.trim().split('\t').collect();

            let (Some(lineid), Some(question)) = (items.first(), items.get(QUESTION_FIELD))
            else {
                return Err(AppError::MalformedReference {
                    line_number,
                    fields: items.len(),
                });
            };
            let lineid = lineid.trim();
            let question = question.trim();

            info!("{lineid}   -   {question}");
            questions.insert(lineid.to_string(), question.to_string());
        }

        Ok(Self { questions })
    }

    pub fn question(&self, id: &str) -> Option<&str> {
        self.questions.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_id_to_question_text() {
        let raw = "5\tsubj1\tpred1\tobj1\twhat is the capital\n\
                   6\tm.0abc\tpeople/person/place_of_birth\tm.0xyz\t where was he born \n";

        let index = ReferenceIndex::read_from(raw.as_bytes()).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.question("5"), Some("what is the capital"));
        assert_eq!(index.question("6"), Some("where was he born"));
        assert_eq!(index.question("7"), None);
    }

    #[test]
    fn later_duplicates_overwrite_earlier_ones() {
        let raw = "1\ts\tp\to\tfirst\n1\ts\tp\to\tsecond\n";

        let index = ReferenceIndex::read_from(raw.as_bytes()).unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.question("1"), Some("second"));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let raw = "1\ts\tp\to\tq\textra\n";

        let index = ReferenceIndex::read_from(raw.as_bytes()).unwrap();

        assert_eq!(index.question("1"), Some("q"));
    }

    #[test]
    fn short_line_is_fatal() {
        let raw = "1\ts\tp\to\tq\n2\ts\tp\n";

        let err = ReferenceIndex::read_from(raw.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            AppError::MalformedReference {
                line_number: 2,
                fields: 3
            }
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReferenceIndex::load(&dir.path().join("all.txt")).unwrap_err();

        assert!(err.to_string().contains("opening reference dataset"));
    }
}
