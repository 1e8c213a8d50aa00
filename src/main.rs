//! termquery - Entry Point

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use termquery::config::{self, ResolvedConfig};
use termquery::history::{self, QueryHistory};
use termquery::model::{AppError, DatasetError};
use termquery::query::{run_with_progress, DatabricksExecutor};
use termquery::state::TableLayout;
use termquery::view::{self, ColorConfig, TableStyles};
use tracing::{error, info};

/// termquery - write a SQL query in your editor and browse the result
#[derive(Parser, Debug)]
#[command(name = "termquery")]
#[command(version)]
#[command(about = "Write a SQL query in your editor, run it, and browse the result table")]
pub struct Args {
    /// Run this SQL file instead of opening the editor
    #[arg(conflicts_with = "last")]
    pub query_file: Option<PathBuf>,

    /// Re-run the most recent query from the history cache
    #[arg(short, long)]
    pub last: bool,

    /// Connection profile from profiles.toml
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Editor command used to write the query
    #[arg(short, long)]
    pub editor: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

const EMPTY_QUERY_MESSAGE: &str = "Empty query, nothing to run.";

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "termquery failed");
            eprintln!("termquery: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // Set NO_COLOR env var if --no-color flag is passed
    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let config_path = config::resolve_config_path(args.config.clone());
    // Only the default location is scaffolded; explicit paths are read as-is
    let mut created_config = false;
    if let Some(path) = config_path.as_deref() {
        if config_path == config::loader::default_config_path() {
            created_config = config::ensure_default_config(path)?;
        }
    }

    let config_file = match config_path.as_deref() {
        Some(path) => config::loader::load_config_file(path)?,
        None => None,
    };
    // before merging, which warns about rejected values
    termquery::logging::init(&config::log_file_path(config_file.as_ref()))?;
    if created_config {
        info!(path = ?config_path, "Created default config file");
    }

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged);
        config::apply_cli_overrides(with_env, args.profile.clone(), args.editor.clone())
    };
    info!(config = ?config, "Configuration loaded and resolved");

    let profiles_path = match config_path.as_deref() {
        Some(path) => config::profiles_path_for(path),
        None => PathBuf::from(config::loader::PROFILES_FILE_NAME),
    };
    let profile = config::load_profile(&profiles_path, &config.profile)?;
    let executor = DatabricksExecutor::new(&profile)?;

    let query_path = query_file(&args, &config)?;
    let sql = std::fs::read_to_string(&query_path)?;
    if sql.trim().is_empty() {
        info!(path = %query_path.display(), "Query file is empty");
        println!("{EMPTY_QUERY_MESSAGE}");
        return Ok(());
    }

    let result = run_with_progress(&executor, &sql, &mut io::stderr())?;
    let dataset = match result.into_dataset() {
        Ok(dataset) => dataset,
        Err(e @ DatasetError::NoRows) => {
            info!("Query returned no rows");
            println!("{e}");
            return Ok(());
        }
    };

    let layout = TableLayout {
        column_width: config.column_width,
        page_size: config.page_size,
        ..TableLayout::default()
    };
    let styles = TableStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));
    view::run_browser(dataset, layout, styles)?;

    Ok(())
}

/// The SQL file to run: the given file, the last history entry, or a new
/// history entry written in the editor.
fn query_file(args: &Args, config: &ResolvedConfig) -> Result<PathBuf, AppError> {
    if let Some(path) = &args.query_file {
        return Ok(path.clone());
    }

    let mut cache = QueryHistory::open(&config.cache_dir, config.max_historical_queries)?;
    if args.last {
        return Ok(cache.require_latest()?);
    }

    let path = cache.create_entry()?;
    let editor = history::resolve_editor(config.editor.as_deref(), config.force_use_neovim, |key| {
        std::env::var(key).ok()
    });
    history::open_in_editor(&editor, &path)?;
    Ok(path)
}
