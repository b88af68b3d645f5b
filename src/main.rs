mod commands;
mod config;
mod input;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::commands::new::NewArgs;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "icsdrop", version = icsdrop_core::VERSION)]
#[command(about = "Turn event lists into iCalendar (.ics) files")]
struct Cli {
    /// Config file (defaults to ~/.config/icsdrop/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Domain used in generated UIDs (overrides config)
    #[arg(long, global = true)]
    uid_domain: Option<String>,

    /// PRODID written into the calendar (overrides config)
    #[arg(long, global = true)]
    prod_id: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the calendar for an events file (TOML or JSON) to stdout
    Render {
        events_file: PathBuf,
    },
    /// Write the calendar for an events file to <name>.ics
    Export {
        events_file: PathBuf,

        /// File name without extension (defaults to the events file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Directory to write into (defaults to output_dir from config, then ".")
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Build a calendar holding a single event
    New(NewArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = Config::load(cli.config.as_deref())?;
    cfg.apply_overrides(cli.uid_domain, cli.prod_id);
    cfg.ics.validate()?;

    match cli.command {
        Commands::Render { events_file } => commands::render::run(&cfg, &events_file),
        Commands::Export {
            events_file,
            name,
            out_dir,
        } => commands::export::run(&cfg, &events_file, name, out_dir),
        Commands::New(args) => commands::new::run(&cfg, args),
    }
}
