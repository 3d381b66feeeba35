use std::path::PathBuf;

use log::{debug, warn};
use serde_json::Value;

use crate::error::{ConfigurationError, RecordValidationError};
use crate::model::{final_segment, Catalog, DirectoryEntry, FALLBACK_KEYWORD};
use crate::preferences::{FixedSlots, PreferenceLines};

pub trait CatalogSource {
    fn source_name(&self) -> &'static str;
    fn load(&self) -> Result<Catalog, ConfigurationError>;
}

/// Loads `source`, logging and swallowing every failure. The result is an
/// empty catalog when the source as a whole is unusable.
pub fn load_catalog(source: &dyn CatalogSource) -> Catalog {
    match source.load() {
        Ok(catalog) => {
            debug!(
                "{} source loaded {} entries",
                source.source_name(),
                catalog.len()
            );
            catalog
        }
        Err(error) => {
            warn!("{} source unavailable: {error}", source.source_name());
            Catalog::new()
        }
    }
}

pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileSource {
    fn source_name(&self) -> &'static str {
        "json_file"
    }

    fn load(&self) -> Result<Catalog, ConfigurationError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigurationError::Missing(self.path.clone())
            } else {
                ConfigurationError::Unreadable {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        let document: Value =
            serde_json::from_str(&raw).map_err(|source| ConfigurationError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        let Value::Array(records) = document else {
            return Err(ConfigurationError::NotAnArray(self.path.clone()));
        };

        let (catalog, rejected) = parse_json_records(&records);
        log_rejected(self.source_name(), &rejected);
        Ok(catalog)
    }
}

/// Validates each raw JSON record independently.
pub fn parse_json_records(records: &[Value]) -> (Catalog, Vec<RecordValidationError>) {
    let mut catalog = Catalog::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match parse_json_record(index, record) {
            Ok(entry) => catalog.push(entry),
            Err(error) => rejected.push(error),
        }
    }
    (catalog, rejected)
}

fn parse_json_record(
    index: usize,
    record: &Value,
) -> Result<DirectoryEntry, RecordValidationError> {
    let Value::Object(fields) = record else {
        return Err(RecordValidationError::NotAnObject { index });
    };
    let keyword = non_blank_str(fields.get("keyword"))
        .ok_or(RecordValidationError::MissingKeyword { index })?;
    let path =
        non_blank_str(fields.get("path")).ok_or(RecordValidationError::MissingPath { index })?;
    let description = fields.get("description").and_then(Value::as_str);

    Ok(DirectoryEntry::new(keyword, path, description))
}

fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
}

pub struct PreferenceLinesSource {
    prefs: PreferenceLines,
}

impl PreferenceLinesSource {
    pub fn new(prefs: PreferenceLines) -> Self {
        Self { prefs }
    }
}

impl CatalogSource for PreferenceLinesSource {
    fn source_name(&self) -> &'static str {
        "preference_lines"
    }

    fn load(&self) -> Result<Catalog, ConfigurationError> {
        let lines = self
            .prefs
            .lines
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()));
        let (catalog, rejected) = parse_lines(lines, KeywordFallback::Literal);
        log_rejected(self.source_name(), &rejected);
        Ok(catalog)
    }
}

pub struct FixedSlotSource {
    prefs: FixedSlots,
}

impl FixedSlotSource {
    pub fn new(prefs: FixedSlots) -> Self {
        Self { prefs }
    }
}

impl CatalogSource for FixedSlotSource {
    fn source_name(&self) -> &'static str {
        "fixed_slots"
    }

    fn load(&self) -> Result<Catalog, ConfigurationError> {
        let slots: Vec<(String, &str)> = self.prefs.iter().collect();
        let lines = slots.iter().map(|(key, value)| (key.as_str(), *value));
        let (catalog, rejected) = parse_lines(lines, KeywordFallback::SegmentOnly);
        log_rejected(self.source_name(), &rejected);
        Ok(catalog)
    }
}

/// What a bare-path line uses as keyword when the path has no final segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordFallback {
    Literal,
    SegmentOnly,
}

pub fn parse_lines<'a, I>(
    lines: I,
    fallback: KeywordFallback,
) -> (Catalog, Vec<RecordValidationError>)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut catalog = Catalog::new();
    let mut rejected = Vec::new();
    for (key, value) in lines {
        if value.trim().is_empty() {
            continue;
        }
        match parse_line(key, value, fallback) {
            Ok(entry) => catalog.push(entry),
            Err(error) => rejected.push(error),
        }
    }
    (catalog, rejected)
}

/// Parses `keyword=path` (split on the first `=`) or a bare `path`.
pub fn parse_line(
    key: &str,
    value: &str,
    fallback: KeywordFallback,
) -> Result<DirectoryEntry, RecordValidationError> {
    let (keyword, path) = match value.split_once('=') {
        Some((keyword, path)) => (keyword.trim(), path.trim()),
        None => ("", value.trim()),
    };
    if path.is_empty() {
        return Err(RecordValidationError::EmptyPath {
            key: key.to_string(),
        });
    }

    let keyword = if keyword.is_empty() {
        match (final_segment(path), fallback) {
            (Some(segment), _) => segment,
            (None, KeywordFallback::Literal) => FALLBACK_KEYWORD.to_string(),
            (None, KeywordFallback::SegmentOnly) => {
                return Err(RecordValidationError::UnderivableKeyword {
                    key: key.to_string(),
                })
            }
        }
    } else {
        keyword.to_string()
    };

    Ok(DirectoryEntry::new(&keyword, path, None))
}

fn log_rejected(source_name: &str, rejected: &[RecordValidationError]) {
    for error in rejected {
        warn!("{source_name}: skipping invalid entry: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_line, KeywordFallback};
    use crate::error::RecordValidationError;

    #[test]
    fn splits_on_first_equals_only() {
        let entry = parse_line("a", " work = /srv/a=b ", KeywordFallback::Literal).unwrap();
        assert_eq!(entry.keyword(), "work");
        assert_eq!(entry.path(), "/srv/a=b");
        assert_eq!(entry.description(), "/srv/a=b");
    }

    #[test]
    fn root_path_uses_literal_fallback_only_for_free_form_lines() {
        let free_form = parse_line("a", "/", KeywordFallback::Literal).unwrap();
        assert_eq!(free_form.keyword(), "Folder");

        let slot = parse_line("item1", "/", KeywordFallback::SegmentOnly);
        assert_eq!(
            slot,
            Err(RecordValidationError::UnderivableKeyword {
                key: "item1".to_string()
            })
        );
    }

    #[test]
    fn blank_keyword_side_derives_from_path() {
        let entry = parse_line("a", "=/home/u/Videos", KeywordFallback::Literal).unwrap();
        assert_eq!(entry.keyword(), "Videos");
    }

    #[test]
    fn blank_path_side_is_rejected() {
        let result = parse_line("a", "music=  ", KeywordFallback::Literal);
        assert_eq!(
            result,
            Err(RecordValidationError::EmptyPath {
                key: "a".to_string()
            })
        );
    }
}
