use std::borrow::Cow;

use log::{debug, warn};
use thiserror::Error;

use crate::action_executor::{open_path, LaunchError};
use crate::config::{self, validate, Config, SourceKind};
use crate::contract::{ActivateResponse, CoreRequest, CoreResponse, QueryResponse};
use crate::error::RecordValidationError;
use crate::filter::filter;
use crate::preferences::{
    validate_activation_keyword, FixedSlots, PreferenceLines, ACTIVATION_KEYWORD_KEY,
};
use crate::presenter::{DisplayItem, ItemAction, Presenter};
use crate::sources::{
    load_catalog, CatalogSource, FixedSlotSource, JsonFileSource, PreferenceLinesSource,
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("launch error: {0}")]
    Launch(#[from] LaunchError),
}

/// Builds the catalog source selected by `cfg`, validating the preference
/// mapping on the way in.
pub fn build_source(cfg: &Config) -> Box<dyn CatalogSource> {
    match cfg.source {
        SourceKind::JsonFile => Box::new(JsonFileSource::new(cfg.directories_path.clone())),
        SourceKind::PreferenceLines => {
            let (prefs, rejected) = PreferenceLines::from_table(&cfg.preferences);
            log_rejected_preferences(&rejected);
            check_activation_keyword(prefs.activation_keyword.as_deref());
            Box::new(PreferenceLinesSource::new(prefs))
        }
        SourceKind::FixedSlots => {
            let (prefs, rejected) = FixedSlots::from_table(&cfg.preferences);
            log_rejected_preferences(&rejected);
            check_activation_keyword(prefs.activation_keyword.as_deref());
            Box::new(FixedSlotSource::new(prefs))
        }
    }
}

fn log_rejected_preferences(rejected: &[RecordValidationError]) {
    for error in rejected {
        warn!("ignoring preference: {error}");
    }
}

fn check_activation_keyword(keyword: Option<&str>) {
    if let Some(Err(message)) = keyword.map(validate_activation_keyword) {
        warn!("{ACTIVATION_KEYWORD_KEY}: {message}");
    }
}

/// One query event: load, filter, present. Reads the source fresh each call.
pub fn handle_query(cfg: &Config, query: Option<&str>) -> Vec<DisplayItem> {
    let query = query.unwrap_or_default();
    let source = build_source(cfg);
    let catalog = load_catalog(source.as_ref());
    let results = filter(&catalog, query);
    debug!(
        "query '{query}' matched {} of {} entries",
        results.len(),
        catalog.len()
    );

    Presenter::new(cfg.source, cfg.browse_on_empty_query).present(&catalog, query, &results)
}

/// Runs an item action. Returns whether anything was opened.
pub fn activate(action: &ItemAction) -> Result<bool, ServiceError> {
    match action {
        ItemAction::NoOp => Ok(false),
        ItemAction::OpenPath { path } => {
            if path.trim().is_empty() {
                return Err(ServiceError::InvalidRequest(
                    "open_path action requires a path".to_string(),
                ));
            }
            open_path(path)?;
            Ok(true)
        }
    }
}

pub struct QueryService {
    config: Config,
    reload: bool,
}

impl QueryService {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        Ok(Self {
            config,
            reload: false,
        })
    }

    /// Like [`QueryService::new`], but re-reads `config.config_path` before
    /// every query. A failed reload keeps the last good config.
    pub fn reloading(config: Config) -> Result<Self, ServiceError> {
        let mut service = Self::new(config)?;
        service.reload = true;
        Ok(service)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn query(&self, query: Option<&str>) -> Vec<DisplayItem> {
        self.query_with(query, None)
    }

    /// Runs a query, with `preferences` standing in for the configured
    /// preference mapping when the host supplies one.
    pub fn query_with(
        &self,
        query: Option<&str>,
        preferences: Option<toml::Table>,
    ) -> Vec<DisplayItem> {
        let mut cfg = self.current_config();
        if let Some(preferences) = preferences {
            cfg.to_mut().preferences = preferences;
        }
        handle_query(&cfg, query)
    }

    fn current_config(&self) -> Cow<'_, Config> {
        if !self.reload {
            return Cow::Borrowed(&self.config);
        }
        match config::load(Some(&self.config.config_path)) {
            Ok(cfg) => Cow::Owned(cfg),
            Err(error) => {
                warn!("config reload failed, keeping previous: {error}");
                Cow::Borrowed(&self.config)
            }
        }
    }

    pub fn handle_command(&self, request: CoreRequest) -> Result<CoreResponse, ServiceError> {
        match request {
            CoreRequest::Query(request) => Ok(CoreResponse::Query(QueryResponse {
                items: self.query_with(request.query.as_deref(), request.preferences),
            })),
            CoreRequest::Activate(request) => {
                let opened = activate(&request.action)?;
                Ok(CoreResponse::Activate(ActivateResponse { opened }))
            }
        }
    }
}
