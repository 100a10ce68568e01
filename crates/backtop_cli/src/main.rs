//! backtop CLI
//!
//! Replays scripted scroll/click sessions against a back-to-top widget and
//! prints the widget state after every step.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod simulate;

#[derive(Parser)]
#[command(name = "backtop", version, about = "Back-to-top widget simulator")]
struct Cli {
    /// Log widget transitions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay scroll offsets (and optionally a click) against a widget
    Simulate {
        /// Widget config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Attach inside a scrollable panel with this id instead of the page
        #[arg(long)]
        panel: Option<String>,

        /// Comma-separated scroll offsets to replay
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        scroll: Vec<f64>,

        /// Click the button after the last scroll
        #[arg(long)]
        click: bool,

        /// Frame length used to step scroll animations (ms)
        #[arg(long, default_value_t = 16)]
        frame_ms: u32,
    },

    /// Print the default widget config as TOML
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Simulate {
            config,
            panel,
            scroll,
            click,
            frame_ms,
        } => simulate::run(simulate::Session {
            config,
            panel,
            offsets: scroll,
            click,
            frame_ms,
        }),
        Commands::Defaults => {
            print!("{}", simulate::default_config_toml()?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
