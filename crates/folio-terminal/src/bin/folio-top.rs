//! folio-top: the portfolio dashboard in a terminal.
//!
//! Run: cargo run -p folio-terminal --bin folio-top

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use folio_core::{seed, SyntheticCollector};
use folio_terminal::{render_once, ColorMode, DashboardApp, DashboardView, TuiConfig, TuiError};
use folio_yaml::{FolioConfig, ParseError, SiteManifest};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Far enough past start that every animation has settled.
const SETTLED: Duration = Duration::from_secs(3600);

/// Live portfolio dashboard
#[derive(Parser)]
#[command(name = "folio-top", version, about, long_about = None)]
struct Cli {
    /// Refresh interval in milliseconds (overrides config)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Seed for reproducible metrics (falls back to FOLIO_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Disable colors
    #[arg(long)]
    no_color: bool,

    /// Render one frame as plain text to stdout and exit
    #[arg(long)]
    render_once: bool,

    /// Width for render-once mode
    #[arg(long, default_value = "100")]
    width: u16,

    /// Height for render-once mode
    #[arg(long, default_value = "40")]
    height: u16,

    /// Path to config file (YAML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to site manifest (YAML); defaults to the bundled one
    #[arg(long, value_name = "PATH")]
    site: Option<PathBuf>,

    /// Dump default configuration to stdout and exit
    #[arg(long)]
    dump_config: bool,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

fn load_config(cli: &Cli) -> Result<FolioConfig, ParseError> {
    let mut config = match &cli.config {
        Some(path) => FolioConfig::load_from_file(path)?,
        None => FolioConfig::load(),
    };
    if let Some(ms) = cli.refresh {
        config.refresh_ms = ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.site.is_some() {
        config.site.clone_from(&cli.site);
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), TuiError> {
    let config = load_config(cli)?;
    let site = match &config.site {
        Some(path) => SiteManifest::load(path)?,
        None => SiteManifest::bundled(),
    };
    let seed = seed::resolve_seed(config.seed);
    let mut collector = SyntheticCollector::from_seed(seed);
    let mut view = DashboardView::new(site, &config.animation);

    if cli.render_once {
        view.apply_snapshot(collector.next_snapshot());
        return render_once(&view, cli.width, cli.height, SETTLED, &mut io::stdout());
    }

    let color_mode = if cli.no_color {
        ColorMode::Mono
    } else {
        ColorMode::from_choice(config.color)
    };
    tracing::info!(?seed, refresh_ms = config.refresh_ms, ?color_mode, "starting folio-top");

    let mut app = DashboardApp::new(
        view,
        TuiConfig {
            color_mode,
            ..TuiConfig::default()
        },
    );
    app.run(collector, config.refresh_interval())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    if cli.dump_config {
        print!("{}", FolioConfig::default_yaml());
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
