use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;

#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Separator between id, tokens and tags in a result line.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Tag value marking a token as inside the entity span.
    #[serde(default = "default_entity_tag")]
    pub entity_tag: String,
    /// Log a progress line every N result lines; 0 disables it.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

fn default_delimiter() -> String {
    " %%%% ".to_string()
}

fn default_entity_tag() -> String {
    "I".to_string()
}

fn default_progress_interval() -> usize {
    1_000_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            entity_tag: default_entity_tag(),
            progress_interval: default_progress_interval(),
        }
    }
}

impl AppConfig {
    pub fn validate(self) -> Result<Self, AppError> {
        // fields are trimmed and tags are whitespace-split
        if self.delimiter.trim().is_empty() {
            return Err(AppError::Validation(
                "delimiter must contain a non-whitespace character".to_string(),
            ));
        }
        if self.entity_tag.is_empty() || self.entity_tag.contains(char::is_whitespace) {
            return Err(AppError::Validation(
                "entity_tag must be a single non-empty tag without whitespace".to_string(),
            ));
        }
        Ok(self)
    }
}

pub fn get_config() -> Result<AppConfig, AppError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::with_prefix("QUERY_TEXT"))
        .build()?;

    let parsed: AppConfig = config.try_deserialize()?;
    debug!(?parsed, "Loaded settings");
    parsed.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sources_fall_back_to_defaults() {
        let config = Config::builder().build().unwrap();
        let parsed: AppConfig = config.try_deserialize().unwrap();

        assert_eq!(parsed, AppConfig::default());
        assert_eq!(parsed.delimiter, " %%%% ");
        assert_eq!(parsed.entity_tag, "I");
        assert_eq!(parsed.progress_interval, 1_000_000);
    }

    #[test]
    fn file_source_overrides_single_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "progress_interval = 10\n").unwrap();

        let config = Config::builder()
            .add_source(File::from(path.as_path()))
            .build()
            .unwrap();
        let parsed: AppConfig = config.try_deserialize().unwrap();

        assert_eq!(parsed.progress_interval, 10);
        assert_eq!(parsed.delimiter, " %%%% ");
    }

    #[test]
    fn rejects_empty_delimiter_and_tag() {
        let no_delimiter = AppConfig {
            delimiter: String::new(),
            ..AppConfig::default()
        };
        assert!(matches!(
            no_delimiter.validate(),
            Err(AppError::Validation(_))
        ));

        let no_tag = AppConfig {
            entity_tag: "  ".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(no_tag.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn rejects_whitespace_only_delimiter_and_split_tag() {
        for delimiter in [" ", "\t", "  \t "] {
            let config = AppConfig {
                delimiter: delimiter.to_string(),
                ..AppConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(AppError::Validation(_))),
                "{delimiter:?} should be rejected"
            );
        }

        for entity_tag in ["I O", " I", "I\t"] {
            let config = AppConfig {
                entity_tag: entity_tag.to_string(),
                ..AppConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(AppError::Validation(_))),
                "{entity_tag:?} should be rejected"
            );
        }

        let custom = AppConfig {
            delimiter: " || ".to_string(),
            entity_tag: "B-ENT".to_string(),
            ..AppConfig::default()
        };
        assert!(custom.validate().is_ok());
    }
}
