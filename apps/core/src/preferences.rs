//! Typed snapshots of the host-supplied preference mapping.
//!
//! The raw mapping is validated once at this boundary: non-string values and
//! keys the fixed-slot layout does not know are reported instead of being
//! silently defaulted.

use crate::error::RecordValidationError;

/// Reserved key holding the launcher activation keyword. Never a directory.
pub const ACTIVATION_KEYWORD_KEY: &str = "favdirs_keyword";
pub const SLOT_COUNT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceLines {
    pub activation_keyword: Option<String>,
    pub lines: Vec<(String, String)>,
}

impl PreferenceLines {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut prefs = Self::default();
        for (key, value) in pairs {
            prefs.push(key, value);
        }
        prefs
    }

    pub fn from_table(table: &toml::Table) -> (Self, Vec<RecordValidationError>) {
        let mut prefs = Self::default();
        let mut rejected = Vec::new();
        for (key, value) in table {
            match value.as_str() {
                Some(value) => prefs.push(key, value),
                None => rejected.push(RecordValidationError::NonStringPreference {
                    key: key.clone(),
                }),
            }
        }
        (prefs, rejected)
    }

    fn push(&mut self, key: &str, value: &str) {
        if key == ACTIVATION_KEYWORD_KEY {
            self.activation_keyword = Some(value.to_string());
        } else {
            self.lines.push((key.to_string(), value.to_string()));
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedSlots {
    pub activation_keyword: Option<String>,
    slots: [Option<String>; SLOT_COUNT],
}

impl FixedSlots {
    /// Values for slots `item1`..`item10`, in slot order.
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut prefs = Self::default();
        for (index, value) in values.into_iter().take(SLOT_COUNT).enumerate() {
            prefs.slots[index] = Some(value.to_string());
        }
        prefs
    }

    pub fn from_table(table: &toml::Table) -> (Self, Vec<RecordValidationError>) {
        let mut prefs = Self::default();
        let mut rejected = Vec::new();
        for (key, value) in table {
            let Some(value) = value.as_str() else {
                rejected.push(RecordValidationError::NonStringPreference { key: key.clone() });
                continue;
            };
            if key == ACTIVATION_KEYWORD_KEY {
                prefs.activation_keyword = Some(value.to_string());
                continue;
            }
            match slot_number(key) {
                Some(number) => prefs.slots[number - 1] = Some(value.to_string()),
                None => {
                    rejected.push(RecordValidationError::UnknownPreferenceKey { key: key.clone() })
                }
            }
        }
        (prefs, rejected)
    }

    pub fn set(&mut self, number: usize, value: &str) {
        if (1..=SLOT_COUNT).contains(&number) {
            self.slots[number - 1] = Some(value.to_string());
        }
    }

    /// Set slots as `(key, value)`, `item1` first.
    pub fn iter(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_deref().map(|value| (slot_key(index + 1), value))
        })
    }
}

pub fn slot_key(number: usize) -> String {
    format!("item{number}")
}

fn slot_number(key: &str) -> Option<usize> {
    let number = key.strip_prefix("item")?.parse::<usize>().ok()?;
    if (1..=SLOT_COUNT).contains(&number) && slot_key(number) == key {
        Some(number)
    } else {
        None
    }
}

pub fn validate_activation_keyword(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Activation keyword is required.".to_string());
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err("Activation keyword must be a single word.".to_string());
    }
    Ok(trimmed.to_string())
}
