use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::config::SourceKind;
use crate::model::DirectoryEntry;

const DIRECTORY_ICON: &str = "images/dir.png";
const EXTENSION_ICON: &str = "images/icon.png";
const ICON_ASSETS: &[&str] = &[DIRECTORY_ICON, EXTENSION_ICON];

/// Item icon. On the wire it is the asset path the host renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Directory,
    Extension,
}

impl Icon {
    pub fn asset_path(self) -> &'static str {
        match self {
            Self::Directory => DIRECTORY_ICON,
            Self::Extension => EXTENSION_ICON,
        }
    }

    pub fn from_asset_path(path: &str) -> Option<Self> {
        match path {
            DIRECTORY_ICON => Some(Self::Directory),
            EXTENSION_ICON => Some(Self::Extension),
            _ => None,
        }
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.asset_path())
    }
}

impl<'de> Deserialize<'de> for Icon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_asset_path(&raw)
            .ok_or_else(|| de::Error::unknown_variant(&raw, ICON_ASSETS))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemAction {
    OpenPath { path: String },
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub icon: Icon,
    pub title: String,
    pub subtitle: String,
    pub action: ItemAction,
}

impl DisplayItem {
    fn placeholder(icon: Icon, title: &str, subtitle: &str) -> Self {
        Self {
            icon,
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            action: ItemAction::NoOp,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.action == ItemAction::NoOp
    }
}

impl From<&DirectoryEntry> for DisplayItem {
    fn from(entry: &DirectoryEntry) -> Self {
        let subtitle = if entry.description().is_empty() {
            entry.path()
        } else {
            entry.description()
        };
        Self {
            icon: Icon::Directory,
            title: entry.keyword().to_string(),
            subtitle: subtitle.to_string(),
            action: ItemAction::OpenPath {
                path: entry.path().to_string(),
            },
        }
    }
}

/// Placeholder wording. The JSON file variant and the preference variants
/// word their hints differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderText {
    pub no_match_title: &'static str,
    pub no_match_hint: &'static str,
    pub unconfigured_title: &'static str,
    pub unconfigured_hint: &'static str,
    pub empty_query_title: &'static str,
    pub empty_query_hint: &'static str,
}

const JSON_FILE_TEXT: PlaceholderText = PlaceholderText {
    no_match_title: "No matching directories found",
    no_match_hint: "Try a different search term",
    unconfigured_title: "No directories configured",
    unconfigured_hint: "Edit directories.json to add your folders",
    empty_query_title: "Type a keyword to search your directories",
    empty_query_hint: "Matches any part of a configured keyword",
};

const PREFERENCES_TEXT: PlaceholderText = PlaceholderText {
    no_match_title: "No matching favorite directory found",
    no_match_hint: "Try a different search term",
    unconfigured_title: "No favorite directories configured",
    unconfigured_hint: "Add directories in the extension preferences",
    empty_query_title: "Type a keyword to search your favorite directories",
    empty_query_hint: "Matches any part of a configured keyword",
};

impl PlaceholderText {
    pub fn for_source(kind: SourceKind) -> Self {
        match kind {
            SourceKind::JsonFile => JSON_FILE_TEXT,
            SourceKind::PreferenceLines | SourceKind::FixedSlots => PREFERENCES_TEXT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presenter {
    pub text: PlaceholderText,
    pub browse_on_empty_query: bool,
}

impl Presenter {
    pub fn new(kind: SourceKind, browse_on_empty_query: bool) -> Self {
        Self {
            text: PlaceholderText::for_source(kind),
            browse_on_empty_query,
        }
    }

    /// Always yields at least one item.
    pub fn present(
        &self,
        catalog: &[DirectoryEntry],
        query: &str,
        results: &[DirectoryEntry],
    ) -> Vec<DisplayItem> {
        if catalog.is_empty() {
            return vec![DisplayItem::placeholder(
                Icon::Directory,
                self.text.unconfigured_title,
                self.text.unconfigured_hint,
            )];
        }

        if query.is_empty() && !self.browse_on_empty_query {
            return vec![DisplayItem::placeholder(
                Icon::Extension,
                self.text.empty_query_title,
                self.text.empty_query_hint,
            )];
        }

        if results.is_empty() {
            return vec![DisplayItem::placeholder(
                Icon::Extension,
                self.text.no_match_title,
                self.text.no_match_hint,
            )];
        }

        results.iter().map(DisplayItem::from).collect()
    }
}
