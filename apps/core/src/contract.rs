use serde::{Deserialize, Serialize};

use crate::presenter::{DisplayItem, ItemAction};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
    /// Current host preference mapping. Replaces the configured one for this
    /// query only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<toml::Table>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryResponse {
    pub items: Vec<DisplayItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivateRequest {
    pub action: ItemAction,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivateResponse {
    pub opened: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum CoreRequest {
    Query(QueryRequest),
    Activate(ActivateRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum CoreResponse {
    Query(QueryResponse),
    Activate(ActivateResponse),
}
