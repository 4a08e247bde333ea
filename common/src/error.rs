use thiserror::Error;

// Core conversion errors
#[derive(Error, Debug)]
pub enum AppError {
    /// A result line that does not split into id, tokens and tags.
    #[error("Format error on line {line_number}: {raw_line}")]
    Format { line_number: usize, raw_line: String },
    #[error("Malformed reference line {line_number}: expected at least 5 tab-separated fields, found {fields}")]
    MalformedReference { line_number: usize, fields: usize },
    #[error("No reference question for id '{id}' (result line {line_number})")]
    MissingQuestion { id: String, line_number: usize },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// The offending raw line when this is a result format error.
    pub fn format_line(&self) -> Option<&str> {
        match self {
            Self::Format { raw_line, .. } => Some(raw_line),
            _ => None,
        }
    }
}
