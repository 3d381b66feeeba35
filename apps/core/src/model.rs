use std::path::Path;

/// Keyword used by the free-form preference variant when a bare path has no
/// usable final segment.
pub const FALLBACK_KEYWORD: &str = "Folder";

/// One loaded directory. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    keyword: String,
    path: String,
    description: String,
    folded_keyword: String,
}

impl DirectoryEntry {
    /// Builds an entry; a blank description falls back to the path.
    pub fn new(keyword: &str, path: &str, description: Option<&str>) -> Self {
        let description = description
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(path);
        Self {
            keyword: keyword.to_string(),
            path: path.to_string(),
            description: description.to_string(),
            folded_keyword: fold_case(keyword),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn folded_keyword(&self) -> &str {
        &self.folded_keyword
    }
}

pub type Catalog = Vec<DirectoryEntry>;

pub fn fold_case(input: &str) -> String {
    input.to_lowercase()
}

/// Final segment of `path`, if it has one (`/home/u/Music/` yields `Music`).
pub fn final_segment(path: &str) -> Option<String> {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}
