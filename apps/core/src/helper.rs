//! Companion helper that appends a directory to the JSON catalog file.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HelperError {
    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in '{}': {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("expected a json array of directories in '{}'", .0.display())]
    NotAnArray(PathBuf),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDirectory {
    pub keyword: String,
    pub path: String,
    pub description: Option<String>,
}

impl NewDirectory {
    fn validated(&self) -> Result<(String, String, String), HelperError> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() {
            return Err(HelperError::MissingField("keyword"));
        }
        let path = self.path.trim();
        if path.is_empty() {
            return Err(HelperError::MissingField("path"));
        }
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(path);
        Ok((keyword.to_string(), path.to_string(), description.to_string()))
    }
}

/// Appends `entry` to the array in `json_path` and rewrites the file with
/// four-space indentation. Existing records are kept untouched, even ones
/// the loader would reject.
pub fn append_entry(json_path: &Path, entry: &NewDirectory) -> Result<usize, HelperError> {
    let (keyword, path, description) = entry.validated()?;
    let mut records = read_records(json_path)?;

    let mut record = Map::new();
    record.insert("keyword".into(), Value::String(keyword));
    record.insert("path".into(), Value::String(path));
    record.insert("description".into(), Value::String(description));
    records.push(Value::Object(record));

    write_records(json_path, &records)?;
    Ok(records.len())
}

fn read_records(json_path: &Path) -> Result<Vec<Value>, HelperError> {
    let raw = match std::fs::read_to_string(json_path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(HelperError::Io {
                path: json_path.to_path_buf(),
                source,
            })
        }
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str(&raw) {
        Ok(Value::Array(records)) => Ok(records),
        Ok(_) => Err(HelperError::NotAnArray(json_path.to_path_buf())),
        Err(source) => Err(HelperError::Malformed {
            path: json_path.to_path_buf(),
            source,
        }),
    }
}

fn write_records(json_path: &Path, records: &[Value]) -> Result<(), HelperError> {
    let io_error = |source| HelperError::Io {
        path: json_path.to_path_buf(),
        source,
    };

    let mut encoded = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut encoded, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut serializer)
        .map_err(|source| HelperError::Malformed {
            path: json_path.to_path_buf(),
            source,
        })?;

    if let Some(parent) = json_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(json_path, encoded).map_err(io_error)
}

/// Asks for every field not already supplied.
pub fn prompt_missing<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    partial: NewDirectory,
) -> Result<NewDirectory, HelperError> {
    let mut entry = partial;
    if entry.keyword.trim().is_empty() {
        entry.keyword = prompt(&mut input, &mut output, "Enter keyword (e.g., 'photos'): ")?;
    }
    if entry.path.trim().is_empty() {
        entry.path = prompt(&mut input, &mut output, "Enter full path: ")?;
    }
    if entry.description.is_none() {
        let description = prompt(&mut input, &mut output, "Enter description (optional): ")?;
        entry.description = Some(description);
    }
    Ok(entry)
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<String, HelperError> {
    write!(output, "{label}").map_err(HelperError::Prompt)?;
    output.flush().map_err(HelperError::Prompt)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(HelperError::Prompt)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
