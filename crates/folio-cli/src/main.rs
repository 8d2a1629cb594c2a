//! folio CLI - serve the portfolio page and inspect its content.

mod error;
mod page;
mod server;

use clap::{Parser, Subcommand};
use error::ServeError;
use folio_core::{seed, SyntheticCollector};
use folio_yaml::{FolioConfig, SiteManifest};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Personal portfolio with a live synthetic metrics dashboard")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the portfolio page and its JSON endpoints
    Serve {
        /// Address to listen on (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Refresh interval in milliseconds (overrides config)
        #[arg(short, long)]
        refresh: Option<u64>,

        /// Seed for reproducible metrics (falls back to FOLIO_SEED)
        #[arg(long)]
        seed: Option<u64>,

        /// Site manifest (YAML); defaults to the bundled one
        #[arg(long, value_name = "PATH")]
        site: Option<PathBuf>,

        /// Config file (YAML)
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Print sampled snapshots as JSON lines
    Sample {
        /// Number of snapshots
        #[arg(short, long, default_value = "1")]
        ticks: u64,

        /// Seed for reproducible output (falls back to FOLIO_SEED)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Check a site manifest
    Check {
        /// Path to manifest file
        #[arg(default_value = "site.yaml")]
        manifest: PathBuf,
    },

    /// Print the default configuration
    Config,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

struct ServeArgs {
    host: Option<String>,
    port: Option<u16>,
    refresh: Option<u64>,
    seed: Option<u64>,
    site: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn serve_config(args: &ServeArgs) -> Result<FolioConfig, ServeError> {
    let mut config = match &args.config {
        Some(path) => FolioConfig::load_from_file(path)?,
        None => FolioConfig::load(),
    };
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ms) = args.refresh {
        config.refresh_ms = ms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.site.is_some() {
        config.site.clone_from(&args.site);
    }
    config.validate()?;
    Ok(config)
}

fn serve(args: &ServeArgs) -> Result<(), ServeError> {
    let config = serve_config(args)?;
    let site = match &config.site {
        Some(path) => SiteManifest::load(path)?,
        None => SiteManifest::bundled(),
    };
    server::serve(&config, site, seed::resolve_seed(config.seed))
}

fn sample<W: Write>(ticks: u64, explicit_seed: Option<u64>, out: &mut W) -> Result<(), ServeError> {
    let mut collector = SyntheticCollector::from_seed(seed::resolve_seed(explicit_seed));
    for _ in 0..ticks {
        let snapshot = collector.next_snapshot();
        serde_json::to_writer(&mut *out, &snapshot)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn check_manifest<W: Write>(path: &Path, out: &mut W) -> Result<(), ServeError> {
    writeln!(out, "Checking manifest: {}", path.display())?;
    let site = SiteManifest::load(path)?;
    writeln!(out, "Manifest valid!")?;
    writeln!(out, "  Name: {}", site.name)?;
    writeln!(out, "  Skills: {}", site.skills.len())?;
    writeln!(out, "  Stats: {}", site.stats.len())?;
    writeln!(out, "  Projects: {}", site.projects.len())?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), ServeError> {
    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Serve {
            host,
            port,
            refresh,
            seed,
            site,
            config,
        } => serve(&ServeArgs {
            host,
            port,
            refresh,
            seed,
            site,
            config,
        }),
        Commands::Sample { ticks, seed } => sample(ticks, seed, &mut stdout),
        Commands::Check { manifest } => check_manifest(&manifest, &mut stdout),
        Commands::Config => {
            write!(stdout, "{}", FolioConfig::default_yaml())?;
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
