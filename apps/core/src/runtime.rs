use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;
use thiserror::Error;

use crate::action_executor::{open_path, LaunchError};
use crate::config::{self, Config, ConfigError};
use crate::helper::{self, HelperError, NewDirectory};
use crate::presenter::DisplayItem;
use crate::query_service::{QueryService, ServiceError};
use crate::{logging, transport};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
    #[error("helper error: {0}")]
    Helper(#[from] HelperError),
    #[error("launch error: {0}")]
    Launch(#[from] LaunchError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "favdirs", version, about = "Favorite directories for your launcher")]
pub struct Cli {
    /// Plugin config file (TOML, or JSON5 with a .json5 extension).
    #[arg(long, global = true, env = "FAVDIRS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter the configured directories and print the result items.
    Query {
        query: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Answer line-delimited JSON requests on stdin.
    Serve,
    /// Open a path with the default file manager.
    Open { path: String },
    /// Append a directory to directories.json, prompting for missing fields.
    Add(AddArgs),
    /// Write the default config file if none exists.
    InitConfig,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub keyword: Option<String>,
    #[arg(long)]
    pub path: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Target file; defaults to the configured directories_path.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub fn run(cli: Cli) -> Result<(), RuntimeError> {
    let cfg = config::load(cli.config.as_deref())?;
    if let Err(error) = logging::init(&logging::logs_dir(), config::log_level_filter(&cfg)) {
        eprintln!("[favdirs] file logging disabled: {error}");
    }
    info!(
        "startup source={:?} config_path={} directories_path={}",
        cfg.source,
        cfg.config_path.display(),
        cfg.directories_path.display()
    );

    match cli.command {
        Command::Query { query, json } => run_query(cfg, query.as_deref(), json),
        Command::Serve => {
            let service = QueryService::reloading(cfg)?;
            info!("serving {:?} requests on stdin", service.config().source);
            let stdin = std::io::stdin();
            let handled = transport::serve(&service, stdin.lock(), std::io::stdout().lock())?;
            info!("serve loop finished after {handled} requests");
            Ok(())
        }
        Command::Open { path } => open_path(&path).map_err(RuntimeError::from),
        Command::Add(args) => run_add(&cfg, args),
        Command::InitConfig => {
            if cfg.config_path.exists() {
                println!("config already present at {}", cfg.config_path.display());
            } else {
                config::save(&cfg)?;
                println!("wrote default config to {}", cfg.config_path.display());
            }
            Ok(())
        }
    }
}

fn run_query(cfg: Config, query: Option<&str>, json: bool) -> Result<(), RuntimeError> {
    let service = QueryService::new(cfg)?;
    let items = service.query(query);
    let mut out = std::io::stdout().lock();
    if json {
        let encoded = serde_json::to_string_pretty(&items)
            .map_err(|error| RuntimeError::Io(error.into()))?;
        writeln!(out, "{encoded}")?;
    } else {
        for item in &items {
            writeln!(out, "{}", format_item(item))?;
        }
    }
    Ok(())
}

pub fn format_item(item: &DisplayItem) -> String {
    format!("{}\t{}", item.title, item.subtitle)
}

fn run_add(cfg: &Config, args: AddArgs) -> Result<(), RuntimeError> {
    let target = args
        .file
        .unwrap_or_else(|| cfg.directories_path.clone());
    let partial = NewDirectory {
        keyword: args.keyword.unwrap_or_default(),
        path: args.path.unwrap_or_default(),
        description: args.description,
    };

    let stdin = std::io::stdin();
    let entry = helper::prompt_missing(stdin.lock(), std::io::stdout().lock(), partial)?;
    let total = helper::append_entry(&target, &entry)?;
    info!("added '{}' to {} ({total} entries)", entry.keyword.trim(), target.display());

    println!("Added '{}' -> '{}'", entry.keyword.trim(), entry.path.trim());
    println!("Reload the launcher extension to see changes.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{format_item, Cli, Command};
    use crate::presenter::{DisplayItem, Icon, ItemAction};
    use clap::Parser;

    #[test]
    fn parses_query_with_json_flag() {
        let cli = Cli::try_parse_from(["favdirs", "query", "pho", "--json"]).unwrap();
        match cli.command {
            Command::Query { query, json } => {
                assert_eq!(query.as_deref(), Some("pho"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_add_flags_and_global_config() {
        let cli = Cli::try_parse_from([
            "favdirs",
            "add",
            "--keyword",
            "music",
            "--config",
            "/tmp/favdirs.toml",
        ])
        .unwrap();
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("/tmp/favdirs.toml"))
        );
        assert!(matches!(cli.command, Command::Add(ref args) if args.keyword.as_deref() == Some("music")));
    }

    #[test]
    fn formats_item_as_tab_separated_line() {
        let item = DisplayItem {
            icon: Icon::Directory,
            title: "photos".to_string(),
            subtitle: "/home/u/Photos".to_string(),
            action: ItemAction::OpenPath {
                path: "/home/u/Photos".to_string(),
            },
        };
        assert_eq!(format_item(&item), "photos\t/home/u/Photos");
    }
}
