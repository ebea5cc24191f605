//! filmdeck - terminal movie discovery client.

/// One-shot subcommands.
mod commands;
/// Application configuration (TOML).
mod config;
/// Localized interface strings.
mod messages;
/// Terminal UI components.
mod tui;
/// Display formatting shared by the CLI and TUI.
mod view;

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use filmdeck_store::resolve_data_dir;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::commands::{
    AppContext, BrowseArgs, ConfigCommand, FavoritesCommand, HomeArgs, MovieArgs, SearchArgs,
    run_browse, run_config, run_favorites, run_home, run_movie, run_search,
};

/// Log file written while the browser owns the terminal.
const LOG_FILE_NAME: &str = "filmdeck.log";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Open the interactive browser.
    Browse(BrowseArgs),
    /// Print the home page rows.
    Home(HomeArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// Show movie details.
    Movie(MovieArgs),
    /// Manage the local favorites list.
    Favorites {
        /// Favorites operation.
        #[command(subcommand)]
        command: FavoritesCommand,
    },
    /// Inspect or create the config file.
    Config {
        /// Config operation.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Opens the append-only log file under the data directory.
fn open_log_file(dir: Option<&Path>) -> Result<File> {
    let data_dir = resolve_data_dir(dir)?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data dir: {}", data_dir.display()))?;
    let path = data_dir.join(LOG_FILE_NAME);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file: {}", path.display()))
}

/// Installs the global subscriber.
///
/// Output goes to `log_file` when given, stdout otherwise.
fn init_tracing(log_file: Option<File>) {
    let ansi = log_file.is_none();
    let writer = log_file.map_or_else(
        || BoxMakeWriter::new(io::stdout),
        |file| BoxMakeWriter::new(Mutex::new(file)),
    );

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match cli.command {
        Commands::Browse(_) => Some(open_log_file(cli.dir.as_deref())?),
        _ => None,
    };
    init_tracing(log_file);

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_owned();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let ctx = AppContext::load(cli.dir)?;
    match cli.command {
        Commands::Browse(ref args) => run_browse(args, &ctx).await,
        Commands::Home(ref args) => run_home(args, &ctx).await,
        Commands::Search(ref args) => run_search(args, &ctx).await,
        Commands::Movie(ref args) => run_movie(args, &ctx).await,
        Commands::Favorites { ref command } => run_favorites(command, &ctx).await,
        Commands::Config { ref command } => run_config(command, &ctx),
        Commands::Completions { .. } => Ok(()),
    }
}
