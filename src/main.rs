//! Framestock CLI - optical frame inventory

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "framestock")]
#[command(version)]
#[command(about = "Personal inventory tracker for eyewear frames")]
#[command(long_about = r#"
Framestock keeps a small SQLite inventory of optical frames:
  • Add frames interactively or as field=value pairs
  • Search by partial brand/model/material/color, price range and lens width
  • Export to CSV, JSON or text
  • Run a chat bot that answers the same commands remotely

Example usage:
  framestock init-db
  framestock add model=RB1234 brand=RayBan material=plastic lens=52 price=120 stock=5
  framestock search brand=ray min_price=50 max_price=150 --format table
  framestock bot
"#)]
struct Cli {
    /// Path to the database file
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file (default: framestock.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchFormat {
    Lines,
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Json,
    Text,
    Txt,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the frames table
    InitDb {
        /// Drop the existing table first (deletes every frame)
        #[arg(long)]
        drop: bool,
    },

    /// Add a frame (prompts for each field when no FIELD=VALUE pairs are given)
    Add {
        /// Fields such as model=RB1234 brand=RayBan lens=52 price=120
        fields: Vec<String>,
    },

    /// Search frames (prompts for filters when none are given)
    Search {
        /// Filters such as brand=ray material=plastic min_price=50
        filters: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "lines")]
        format: SearchFormat,
    },

    /// Show every field of one frame
    Get {
        /// Frame id
        id: i64,
    },

    /// List frames by id
    List {
        /// Maximum number of frames
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show the most recently added frames
    Recent {
        /// Maximum number of frames
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Show inventory statistics
    Stats,

    /// Export frames
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormatArg,

        /// Maximum number of frames (1-2000)
        #[arg(short, long, default_value = "100")]
        limit: usize,

        /// Only frames of this brand (exact, ignoring case)
        #[arg(short, long)]
        brand: Option<String>,

        /// Only frames added on or after this date (YYYY-MM-DD)
        #[arg(short, long)]
        since: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the chat bot until Ctrl+C
    Bot,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = framestock::config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let database = framestock::config::resolve_database_path(cli.database.as_deref(), &config);
    tracing::debug!("Using database {}", database.display());

    match cli.command {
        Commands::InitDb { drop } => commands::run_init_db(&database, drop),
        Commands::Add { fields } => commands::run_add(&database, &fields),
        Commands::Search { filters, format } => commands::run_search(&database, &filters, format),
        Commands::Get { id } => commands::run_get(&database, id),
        Commands::List { limit } => commands::run_list(&database, limit),
        Commands::Recent { limit } => commands::run_recent(&database, limit),
        Commands::Stats => commands::run_stats(&database),
        Commands::Export { format, limit, brand, since, output } => {
            let opts = commands::export_options(format, limit, brand, since.as_deref())?;
            commands::run_export(&database, &opts, output.as_deref())
        }
        Commands::Bot => commands::run_bot(&database, &config),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        framestock::ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
